use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ruttvakt_wire::consts::{AF_INET, RTAX_IFA, RTM_NEWADDR};
use ruttvakt_wire::{
    InterfaceAddressHeader, InterfaceResolver, MessageDispatcher, RouteMessageHeader,
};

struct NullResolver;

impl InterfaceResolver for NullResolver {
    fn name_by_index(&self, _index: u16) -> Option<String> {
        None
    }
}

fn new_address_datagram() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&28u16.to_le_bytes());
    data.push(5);
    data.push(RTM_NEWADDR);
    data.extend_from_slice(&((1i32) << RTAX_IFA).to_le_bytes());
    data.extend_from_slice(&0i32.to_le_bytes());
    data.extend_from_slice(&4u16.to_le_bytes());
    data.extend_from_slice(&[0, 0]);
    data.extend_from_slice(&0i32.to_le_bytes());
    debug_assert_eq!(data.len(), InterfaceAddressHeader::SIZE);
    data.extend_from_slice(&[8, AF_INET, 0, 0, 192, 168, 1, 1]);
    data
}

fn bench_decode(c: &mut Criterion) {
    let datagram = new_address_datagram();
    let dispatcher = MessageDispatcher::new(NullResolver);

    c.bench_function("route_header_decode", |b| {
        b.iter(|| RouteMessageHeader::decode(black_box(&datagram)))
    });

    c.bench_function("new_address_dispatch", |b| {
        b.iter(|| dispatcher.dispatch(black_box(&datagram)))
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
