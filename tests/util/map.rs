use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

use nullmap::map::{ConditionalMap, EntryStore};
use nullmap::nullable::Nullable;
use nullmap::ok_or;
use nullmap::util::random::Random;
use rand::prelude::SliceRandom;
use rand::prelude::ThreadRng;
use rand::{thread_rng, Rng};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Operation {
    Put,
    PutIfAbsent,
    Remove,
    RemoveExpected,
    Replace,
    ReplaceExpected,
    Compute,
    ComputeIfPresent,
    Merge,
    Get,
    GetOrDefault,
}

#[derive(PartialEq)]
enum OperationType {
    Some, // the operation for an existing key on the map
    None, // the operation for a not existing key on the map
}

const OPS: [Operation; 11] = [
    Operation::Put,
    Operation::PutIfAbsent,
    Operation::Remove,
    Operation::RemoveExpected,
    Operation::Replace,
    Operation::ReplaceExpected,
    Operation::Compute,
    Operation::ComputeIfPresent,
    Operation::Merge,
    Operation::Get,
    Operation::GetOrDefault,
];

fn gen_slot(rng: &mut ThreadRng) -> Nullable<u64> {
    if rng.gen_bool(0.2) {
        Nullable::Null
    } else {
        Nullable::Value(rng.gen())
    }
}

// The remapping functions are fixed so that the reference model can predict
// every outcome, and they hit both the remove and the update branch.
fn compute_step(slot: &Nullable<u64>) -> Nullable<u64> {
    match slot.as_ref() {
        None => Nullable::Value(0),
        Some(value) => {
            if value % 7 == 0 {
                Nullable::Null
            } else {
                Nullable::Value(value.wrapping_add(1))
            }
        }
    }
}

fn compute_if_present_step(value: &u64) -> Nullable<u64> {
    if value % 5 == 0 {
        Nullable::Null
    } else {
        Nullable::Value(value.wrapping_add(2))
    }
}

fn merge_step(old: &u64, new: &u64) -> Nullable<u64> {
    let sum = old.wrapping_add(*new);

    if sum % 13 == 0 {
        Nullable::Null
    } else {
        Nullable::Value(sum)
    }
}

// Drive random conditional operations against the map and a reference model
// at once, asserting the decision table on every step and the full contents
// at the end.
pub fn stress_conditional<K, M>(iter: u64)
where
    K: Ord + Eq + Hash + Clone + Random + Debug,
    M: ConditionalMap<K, u64>,
{
    // 10 times try to get a not existing key, or skip this iteration
    let gen_not_existing_key = |rng: &mut ThreadRng, model: &BTreeMap<K, Nullable<u64>>| {
        let mut key = K::gen(rng);

        for _ in 0..10 {
            if !model.contains_key(&key) {
                return Ok(key);
            }

            key = K::gen(rng);
        }

        Err(())
    };

    let types = [OperationType::Some, OperationType::None];

    let mut map = M::new();
    let mut model: BTreeMap<K, Nullable<u64>> = BTreeMap::new();
    let mut rng = thread_rng();

    for i in 1..=iter {
        let t = types.choose(&mut rng).unwrap();
        let model_keys = model.keys().collect::<Vec<&K>>();
        let existing_key = model_keys.choose(&mut rng).map(|key| (*key).clone());

        let key = if existing_key.is_none() || *t == OperationType::None {
            ok_or!(gen_not_existing_key(&mut rng, &model), continue)
        } else {
            existing_key.unwrap()
        };

        match OPS.choose(&mut rng).unwrap() {
            Operation::Put => {
                let value = gen_slot(&mut rng);

                println!("[{:0>10}] Put: ({:?}, {:?})", i, key, value);
                assert_eq!(map.put(&key, value.clone()), model.insert(key.clone(), value));
            }
            Operation::PutIfAbsent => {
                let value = gen_slot(&mut rng);

                println!("[{:0>10}] PutIfAbsent: ({:?}, {:?})", i, key, value);
                if model.contains_key(&key) {
                    // present keys reject, marker slots included
                    assert_eq!(map.put_if_absent(&key, value.clone()), Err(value));
                } else {
                    assert_eq!(map.put_if_absent(&key, value.clone()), Ok(()));
                    assert_eq!(model.insert(key.clone(), value), None);
                }
            }
            Operation::Remove => {
                println!("[{:0>10}] Remove: ({:?})", i, key);
                assert_eq!(map.remove(&key).ok(), model.remove(&key));
            }
            Operation::RemoveExpected => {
                // half the time aim at the current slot, otherwise at a random one
                let expected = if rng.gen_bool(0.5) {
                    model.get(&key).cloned().unwrap_or(Nullable::Null)
                } else {
                    gen_slot(&mut rng)
                };

                println!("[{:0>10}] RemoveExpected: ({:?}, {:?})", i, key, expected);
                if model.get(&key) == Some(&expected) {
                    assert!(map.remove_expected(&key, &expected));
                    assert_eq!(model.remove(&key), Some(expected));
                } else {
                    assert!(!map.remove_expected(&key, &expected));
                }
            }
            Operation::Replace => {
                let value = gen_slot(&mut rng);

                println!("[{:0>10}] Replace: ({:?}, {:?})", i, key, value);
                if model.contains_key(&key) {
                    let previous = model.insert(key.clone(), value.clone());
                    assert_eq!(map.replace(&key, value), Ok(previous.unwrap()));
                } else {
                    assert_eq!(map.replace(&key, value.clone()), Err(value));
                }
            }
            Operation::ReplaceExpected => {
                let expected = if rng.gen_bool(0.5) {
                    model.get(&key).cloned().unwrap_or(Nullable::Null)
                } else {
                    gen_slot(&mut rng)
                };
                let value = gen_slot(&mut rng);

                println!(
                    "[{:0>10}] ReplaceExpected: ({:?}, {:?} -> {:?})",
                    i, key, expected, value
                );
                if model.get(&key) == Some(&expected) {
                    assert_eq!(map.replace_expected(&key, &expected, value.clone()), Ok(()));
                    assert_eq!(model.insert(key.clone(), value), Some(expected));
                } else {
                    assert_eq!(
                        map.replace_expected(&key, &expected, value.clone()),
                        Err(value)
                    );
                }
            }
            Operation::Compute => {
                // the function sees the marker for an absent key and for a
                // key mapped to the marker alike
                let current = model.get(&key).cloned().unwrap_or(Nullable::Null);
                let result = compute_step(&current);

                println!(
                    "[{:0>10}] Compute: ({:?}, {:?} -> {:?})",
                    i, key, current, result
                );
                match result {
                    Nullable::Null => {
                        let _ = model.remove(&key);
                        assert_eq!(map.compute(&key, |_, slot| compute_step(slot)), None);
                    }
                    value => {
                        let _ = model.insert(key.clone(), value.clone());
                        assert_eq!(
                            map.compute(&key, |_, slot| compute_step(slot)),
                            Some(&mut value.clone())
                        );
                    }
                }
            }
            Operation::ComputeIfPresent => {
                println!("[{:0>10}] ComputeIfPresent: ({:?})", i, key);
                match model.get(&key).cloned() {
                    Some(Nullable::Value(current)) => match compute_if_present_step(&current) {
                        Nullable::Null => {
                            let _ = model.remove(&key);
                            assert_eq!(
                                map.compute_if_present(&key, |_, value| {
                                    compute_if_present_step(value)
                                }),
                                None
                            );
                        }
                        value => {
                            let _ = model.insert(key.clone(), value.clone());
                            assert_eq!(
                                map.compute_if_present(&key, |_, value| {
                                    compute_if_present_step(value)
                                }),
                                Some(&mut value.clone())
                            );
                        }
                    },
                    _ => {
                        // absent or mapped to the marker: never invoked
                        assert_eq!(
                            map.compute_if_present(&key, |_, value| compute_if_present_step(value)),
                            None
                        );
                    }
                }
            }
            Operation::Merge => {
                let proposed: u64 = rng.gen();

                println!("[{:0>10}] Merge: ({:?}, {})", i, key, proposed);
                match model.get(&key).cloned() {
                    Some(Nullable::Value(current)) => match merge_step(&current, &proposed) {
                        Nullable::Null => {
                            let _ = model.remove(&key);
                            assert_eq!(map.merge(&key, proposed, merge_step), None);
                        }
                        value => {
                            let _ = model.insert(key.clone(), value.clone());
                            assert_eq!(
                                map.merge(&key, proposed, merge_step),
                                Some(&mut value.clone())
                            );
                        }
                    },
                    _ => {
                        // absent or mapped to the marker: stored directly
                        let _ = model.insert(key.clone(), Nullable::Value(proposed));
                        assert_eq!(
                            map.merge(&key, proposed, merge_step),
                            Some(&mut Nullable::Value(proposed))
                        );
                    }
                }
            }
            Operation::Get => {
                println!("[{:0>10}] Get: ({:?})", i, key);
                assert_eq!(map.get(&key), model.get(&key));
            }
            Operation::GetOrDefault => {
                let default = gen_slot(&mut rng);
                let expected = model.get(&key).cloned().unwrap_or(default.clone());

                println!("[{:0>10}] GetOrDefault: ({:?}, {:?})", i, key, default);
                assert_eq!(map.get_or_default(&key, &default), &expected);
            }
        }
    }

    // the final states must agree, the slots mapped to the marker included
    assert_eq!(map.len(), model.len());

    let mut collected = BTreeMap::new();
    map.for_each(|key, value| {
        let _ = collected.insert(key.clone(), value.clone());
    });
    assert_eq!(collected, model);

    // one replace_all sweep: marker results stay stored, nothing is removed
    map.replace_all(|_, slot| compute_step(slot));

    let mut swept = BTreeMap::new();
    for (key, value) in &model {
        let _ = swept.insert(key.clone(), compute_step(value));
    }

    let mut collected = BTreeMap::new();
    map.for_each(|key, value| {
        let _ = collected.insert(key.clone(), value.clone());
    });
    assert_eq!(collected, swept);
    assert_eq!(map.len(), model.len());
}
