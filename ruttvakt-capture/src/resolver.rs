//! OS-backed interface-name lookup.

use std::ffi::CStr;

use ruttvakt_wire::InterfaceResolver;

/// Resolves interface indices through `if_indextoname(3)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemInterfaceResolver;

impl InterfaceResolver for SystemInterfaceResolver {
    fn name_by_index(&self, index: u16) -> Option<String> {
        if index == 0 {
            return None;
        }
        let mut name = [0 as libc::c_char; libc::IF_NAMESIZE];
        // SAFETY: the buffer is IF_NAMESIZE bytes as the call requires.
        let ret = unsafe { libc::if_indextoname(index.into(), name.as_mut_ptr()) };
        if ret.is_null() {
            return None;
        }
        // SAFETY: on success the buffer holds a NUL-terminated name.
        let name = unsafe { CStr::from_ptr(name.as_ptr()) };
        name.to_str().ok().map(str::to_owned)
    }
}
