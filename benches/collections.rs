//! Benchmarks for the core collection operations.
//!
//! Compares keyed lookup/removal against the plain dynamic array and
//! measures the cost of the range re-sync on structural shifts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use slotkit::{DynamicArray, Keyed, KeyedArray, Slot, SlotArray, Slotted};

#[derive(Clone)]
struct Rec {
    id: u64,
    _payload: [u64; 4],
}

impl Rec {
    fn new(id: u64) -> Self {
        Self {
            id,
            _payload: [id; 4],
        }
    }
}

impl Keyed for Rec {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}

struct SlotRec {
    _payload: [u64; 4],
    slot: Slot,
}

impl SlotRec {
    fn new(id: u64) -> Self {
        Self {
            _payload: [id; 4],
            slot: Slot::NONE,
        }
    }
}

impl Slotted for SlotRec {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn set_slot(&mut self, slot: Slot) {
        self.slot = slot;
    }
}

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    for size in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("dynamic", size), &size, |b, &n| {
            b.iter(|| {
                let mut arr: DynamicArray<Rec> = DynamicArray::with_capacity(n);
                for i in 0..n {
                    arr.push(Rec::new(i as u64));
                }
                black_box(arr.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("keyed", size), &size, |b, &n| {
            b.iter(|| {
                let mut arr: KeyedArray<Rec> = KeyedArray::with_capacity(n);
                for i in 0..n {
                    arr.push(Rec::new(i as u64));
                }
                black_box(arr.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("slot", size), &size, |b, &n| {
            b.iter(|| {
                let mut arr: SlotArray<SlotRec> = SlotArray::with_capacity(n);
                for i in 0..n {
                    arr.push(SlotRec::new(i as u64));
                }
                black_box(arr.len())
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    const N: u64 = 10_000;

    let mut keyed: KeyedArray<Rec> = KeyedArray::with_capacity(N as usize);
    let mut dynamic: DynamicArray<u64> = DynamicArray::with_capacity(N as usize);
    for i in 0..N {
        keyed.push(Rec::new(i));
        dynamic.push(i);
    }

    group.bench_function("keyed_by_key", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 7) % N;
            black_box(keyed.get(&i).is_some())
        });
    });

    group.bench_function("dynamic_linear_scan", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 7) % N;
            black_box(dynamic.index_of(&i))
        });
    });

    group.finish();
}

fn bench_remove_resync(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_front");
    const N: usize = 1_000;
    group.throughput(Throughput::Elements(N as u64));

    // Front removal shifts the whole tail: worst case for the re-sync.
    group.bench_function("keyed", |b| {
        b.iter_batched(
            || {
                let mut arr: KeyedArray<Rec> = KeyedArray::with_capacity(N);
                for i in 0..N {
                    arr.push(Rec::new(i as u64));
                }
                arr
            },
            |mut arr| {
                while arr.len() > 0 {
                    black_box(arr.remove_at(0));
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("slot", |b| {
        b.iter_batched(
            || {
                let mut arr: SlotArray<SlotRec> = SlotArray::with_capacity(N);
                for i in 0..N {
                    arr.push(SlotRec::new(i as u64));
                }
                arr
            },
            |mut arr| {
                while arr.len() > 0 {
                    black_box(arr.remove(0));
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_relocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("relocate");
    const N: usize = 1_000;

    let mut keyed: KeyedArray<Rec> = KeyedArray::with_capacity(N);
    for i in 0..N {
        keyed.push(Rec::new(i as u64));
    }

    group.bench_function("keyed_full_span", |b| {
        b.iter(|| {
            keyed.relocate_index(0, N - 1);
            keyed.relocate_index(N - 1, 0);
        });
    });

    group.bench_function("keyed_swap", |b| {
        b.iter(|| black_box(keyed.swap_indices(0, N - 1)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push,
    bench_lookup,
    bench_remove_resync,
    bench_relocate
);
criterion_main!(benches);
