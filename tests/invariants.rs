//! Randomized operation sequences checking the sync invariants.
//!
//! After every single operation:
//! - KeyedArray: `index_of_key(item.key()) == Some(i)` for the item at `i`.
//! - SlotArray: `item.slot().index() == Some(i)`; removed items carry NONE.
//! - Both: `len <= capacity`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use slotkit::{Keyed, KeyedArray, Slot, SlotArray, Slotted};

#[derive(Debug, Clone, PartialEq)]
struct Record {
    id: u64,
    payload: u64,
}

impl Keyed for Record {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}

fn assert_keyed_synced(c: &KeyedArray<Record>) {
    assert!(c.len() <= c.capacity());
    for (i, item) in c.iter().enumerate() {
        assert_eq!(
            c.index_of_key(&item.key()),
            Some(i),
            "key {} mapped to the wrong index",
            item.id
        );
        assert_eq!(c.get(&item.key()), Some(item));
    }
}

#[test]
fn keyed_array_survives_random_operation_sequences() {
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    let mut c: KeyedArray<Record> = KeyedArray::with_capacity(8);
    let mut next_id = 0u64;

    for step in 0..2_000 {
        match rng.gen_range(0..8) {
            // push a fresh key
            0 | 1 => {
                let rec = Record {
                    id: next_id,
                    payload: rng.gen(),
                };
                next_id += 1;
                assert!(c.push(rec));
            }
            // push a duplicate: must reject and change nothing
            2 => {
                if c.len() > 0 {
                    let victim = c[rng.gen_range(0..c.len())].id;
                    let before = c.len();
                    assert!(!c.push(Record {
                        id: victim,
                        payload: 0,
                    }));
                    assert_eq!(c.len(), before);
                }
            }
            // remove by index, sometimes out of range
            3 => {
                let at = rng.gen_range(0..c.len() + 2);
                let was_live = at < c.len();
                assert_eq!(c.remove_at(at).is_some(), was_live);
            }
            // remove by key
            4 => {
                if c.len() > 0 {
                    let victim = c[rng.gen_range(0..c.len())].id;
                    assert!(c.remove_by_key(&victim).is_some());
                    assert!(!c.contains_key(&victim));
                }
            }
            // swap two random indices
            5 => {
                if c.len() > 1 {
                    let i = rng.gen_range(0..c.len());
                    let j = rng.gen_range(0..c.len());
                    assert!(c.swap_indices(i, j));
                }
            }
            // relocate across a random span
            6 => {
                if c.len() > 1 {
                    let old = rng.gen_range(0..c.len());
                    let new = rng.gen_range(0..c.len());
                    assert!(c.relocate_index(old, new));
                }
            }
            // insert at a random position
            _ => {
                let rec = Record {
                    id: next_id,
                    payload: rng.gen(),
                };
                next_id += 1;
                let at = rng.gen_range(0..c.len() + 1);
                assert!(c.try_insert(at, rec).is_ok());
            }
        }
        assert_keyed_synced(&c);
        if step % 500 == 499 {
            c.trim();
            assert_eq!(c.capacity(), c.len());
            assert_keyed_synced(&c);
        }
    }
}

#[derive(Debug)]
struct Token {
    value: u64,
    slot: Slot,
}

impl Token {
    fn new(value: u64) -> Self {
        Self {
            value,
            slot: Slot::NONE,
        }
    }
}

impl Slotted for Token {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn set_slot(&mut self, slot: Slot) {
        self.slot = slot;
    }
}

fn assert_slots_stamped(c: &SlotArray<Token>) {
    assert!(c.len() <= c.capacity());
    for (i, item) in c.iter().enumerate() {
        assert_eq!(
            item.slot().index(),
            Some(i),
            "value {} carries the wrong slot",
            item.value
        );
    }
}

#[test]
fn slot_array_survives_random_operation_sequences() {
    let mut rng = SmallRng::seed_from_u64(0xBADCAFE);
    let mut c: SlotArray<Token> = SlotArray::with_capacity(4);
    let mut counter = 0u64;

    for _ in 0..2_000 {
        match rng.gen_range(0..7) {
            0 | 1 => {
                counter += 1;
                assert!(c.try_push(Token::new(counter)).is_ok());
            }
            2 => {
                let at = rng.gen_range(0..c.len() + 2);
                let was_live = at < c.len();
                match c.remove(at) {
                    Some(gone) => {
                        assert!(was_live);
                        assert!(gone.slot().is_none(), "removed item kept a slot");
                    }
                    None => assert!(!was_live),
                }
            }
            3 => {
                if c.len() > 1 {
                    let i = rng.gen_range(0..c.len());
                    let j = rng.gen_range(0..c.len());
                    assert!(c.swap_indices(i, j));
                }
            }
            4 => {
                if c.len() > 1 {
                    let old = rng.gen_range(0..c.len());
                    let new = rng.gen_range(0..c.len());
                    assert!(c.relocate_index(old, new));
                }
            }
            5 => {
                counter += 1;
                let at = rng.gen_range(0..c.len() + 1);
                assert!(c.try_insert(at, Token::new(counter)).is_ok());
            }
            _ => {
                if c.len() > 0 {
                    counter += 1;
                    let at = rng.gen_range(0..c.len());
                    let old = c.replace(at, Token::new(counter)).unwrap();
                    assert!(old.slot().is_none());
                }
            }
        }
        assert_slots_stamped(&c);
    }

    c.clear();
    assert_eq!(c.len(), 0);
    c.clear();
    assert_eq!(c.len(), 0);
}

#[test]
fn round_trip_preserves_order_and_content() {
    let mut c: KeyedArray<Record> = KeyedArray::new();
    for id in 0..16 {
        c.push(Record {
            id,
            payload: id * 100,
        });
    }

    let exported = c.to_vec();
    let rebuilt: KeyedArray<Record> = exported.into_iter().collect();

    assert_eq!(rebuilt.len(), c.len());
    for i in 0..c.len() {
        assert_eq!(rebuilt[i], c[i]);
    }
    assert_keyed_synced(&rebuilt);
}
