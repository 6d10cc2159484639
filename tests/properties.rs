#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::arithmetic_side_effects,
    clippy::cast_precision_loss
)]
use std::collections::HashMap;

use primal_maps::{
    ChainingMap, HashFn, MapExtensions, ProbingMap, hash_function_1, hash_function_2,
    prime::{is_prime, next_prime, normalize_capacity},
};
use proptest::{prelude::*, sample::select};

#[derive(Debug, Clone)]
enum Op {
    Put(String, u32),
    Remove(String),
    Resize(usize),
    Clear,
}

/// Keys from a small alphabet so updates, removals and collisions are common
fn key() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (key(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        4 => key().prop_map(Op::Remove),
        1 => (0_usize..64).prop_map(Op::Resize),
        1 => Just(Op::Clear),
    ]
}

fn any_hash_fn() -> impl Strategy<Value = HashFn> {
    let functions: Vec<HashFn> = vec![hash_function_1, hash_function_2];
    select(functions)
}

/// Sorted snapshot of the model, for comparing with a map's enumeration
fn sorted_model(model: &HashMap<String, u32>) -> Vec<(String, u32)> {
    let mut items: Vec<(String, u32)> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
    items.sort();
    items
}

/// Applies `ops` to both maps and a std `HashMap`, checking they agree after every step
fn run_ops(hash_fn: HashFn, capacity: usize, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut probing = ProbingMap::with_capacity(capacity, hash_fn);
    let mut chaining = ChainingMap::with_capacity(capacity, hash_fn);
    let mut model: HashMap<String, u32> = HashMap::new();

    for op in ops {
        match op {
            Op::Put(key, value) => {
                let expected = model.insert(key.clone(), value);
                prop_assert_eq!(probing.put(key.clone(), value), expected);
                prop_assert_eq!(chaining.put(key.clone(), value), expected);
                prop_assert_eq!(probing.get(&key), Some(&value));
                prop_assert_eq!(chaining.get(&key), Some(&value));

                // The insert only happened once the load was back under the threshold
                let before = probing.len() - usize::from(expected.is_none());
                prop_assert!((before as f64) / (probing.capacity() as f64) < 0.5);
                let before = chaining.len() - usize::from(expected.is_none());
                prop_assert!((before as f64) / (chaining.capacity() as f64) < 1.0);
            }
            Op::Remove(key) => {
                let expected = model.remove(&key).is_some();
                prop_assert_eq!(probing.remove(&key), expected);
                prop_assert_eq!(chaining.remove(&key), expected);
                prop_assert!(!probing.contains_key(&key));
                prop_assert!(!chaining.contains_key(&key));
                prop_assert_eq!(probing.get(&key), None);
                prop_assert_eq!(chaining.get(&key), None);
            }
            Op::Resize(capacity) => {
                let probing_before = probing.capacity();
                match probing.try_resize(capacity) {
                    Ok(resized) => {
                        prop_assert!(capacity > model.len());
                        prop_assert_eq!(resized, probing.capacity());
                    }
                    Err(_) => {
                        prop_assert!(capacity <= model.len());
                        prop_assert_eq!(probing.capacity(), probing_before);
                    }
                }
                chaining.resize(capacity);
            }
            Op::Clear => {
                model.clear();
                probing.clear();
                chaining.clear();
            }
        }

        prop_assert!(is_prime(probing.capacity()));
        prop_assert!(is_prime(chaining.capacity()));
        prop_assert_eq!(probing.len(), model.len());
        prop_assert_eq!(chaining.len(), model.len());
        prop_assert_eq!(probing.iter().count(), model.len());
        prop_assert_eq!(chaining.iter().count(), model.len());
        prop_assert_eq!(probing.empty_buckets() + probing.len(), probing.capacity());
    }

    let expected = sorted_model(&model);
    let mut from_probing = probing.keys_and_values();
    from_probing.sort();
    let mut from_chaining = chaining.keys_and_values();
    from_chaining.sort();
    prop_assert_eq!(from_probing, expected.clone());
    prop_assert_eq!(from_chaining, expected);

    Ok(())
}

proptest! {
    #[test]
    fn maps_agree_with_std(
        hash_fn in any_hash_fn(),
        capacity in 0_usize..40,
        ops in prop::collection::vec(op(), 0..200),
    ) {
        run_ops(hash_fn, capacity, ops)?;
    }

    #[test]
    fn resize_preserves_membership(
        hash_fn in any_hash_fn(),
        entries in prop::collection::hash_map("[a-z0-9]{1,8}", any::<u32>(), 0..60),
        capacity in 1_usize..500,
    ) {
        let mut probing = ProbingMap::with_capacity(11, hash_fn);
        let mut chaining = ChainingMap::with_capacity(11, hash_fn);
        for (key, value) in &entries {
            probing.put(key.as_str(), *value);
            chaining.put(key.as_str(), *value);
        }

        probing.resize(capacity);
        chaining.resize(capacity);

        prop_assert_eq!(probing.len(), entries.len());
        prop_assert_eq!(chaining.len(), entries.len());
        for (key, value) in &entries {
            prop_assert_eq!(probing.get(key), Some(value));
            prop_assert_eq!(chaining.get(key), Some(value));
        }
    }

    #[test]
    fn next_prime_is_the_first_prime_above(n in 0_usize..100_000) {
        let prime = next_prime(n);
        prop_assert!(is_prime(prime));
        prop_assert!(prime >= n);
        let start = if n % 2 == 0 { n + 1 } else { n };
        // The scan only visits odd candidates
        prop_assert!((start..prime).step_by(2).all(|candidate| !is_prime(candidate)));
    }

    #[test]
    fn normalized_capacity_is_prime(n in 1_usize..100_000) {
        let capacity = normalize_capacity(n);
        prop_assert!(is_prime(capacity));
        prop_assert!(capacity >= n);
    }
}
