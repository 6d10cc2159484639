//! Utility traits shared by `ProbingMap` and `ChainingMap`

use crate::{ChainingMap, ProbingMap};

/// Extension trait for the map implementations that provides owned snapshots of their contents.
///
/// Every method returns items in the map's enumeration order.
pub trait MapExtensions<V> {
    /// Returns the keys of the map as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the map as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns every key-value pair of the map as a Vec
    fn keys_and_values(&self) -> Vec<(String, V)>;
}

impl<V: Clone> MapExtensions<V> for ProbingMap<V> {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn keys_and_values(&self) -> Vec<(String, V)> {
        self.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect()
    }
}

impl<V: Clone> MapExtensions<V> for ChainingMap<V> {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn keys_and_values(&self) -> Vec<(String, V)> {
        self.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::hash_function_2;
    use test_log::test;

    #[test]
    fn test_keys_and_values() {
        let mut map = ProbingMap::with_capacity(11, hash_function_2);
        for i in 1..6 {
            map.put(i.to_string(), (i * 10).to_string());
        }

        let mut pairs = map.keys_and_values();
        pairs.sort();
        let expected: Vec<(String, String)> =
            (1..6).map(|i| (i.to_string(), (i * 10).to_string())).collect();
        assert_eq!(pairs, expected);

        // Shrinking to 2 is refused while 5 entries are live
        map.resize(2);
        assert_eq!(map.keys_and_values().len(), 5);

        map.put("20", "200".to_string());
        map.remove("1");
        map.resize(12);

        let mut keys = map.keys();
        keys.sort();
        assert_eq!(keys, vec!["2", "20", "3", "4", "5"]);
    }

    #[test]
    fn test_snapshots_follow_enumeration_order() {
        let mut map = ChainingMap::with_capacity(5, hash_function_2);
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);

        let from_iter: Vec<(String, i32)> = map.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        assert_eq!(map.keys_and_values(), from_iter);
        assert_eq!(map.keys(), from_iter.iter().map(|(k, _)| k.clone()).collect::<Vec<_>>());
        assert_eq!(map.values(), from_iter.iter().map(|(_, v)| *v).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_map() {
        let map: ChainingMap<i32> = ChainingMap::new();
        assert!(map.keys().is_empty());
        assert!(map.values().is_empty());
        assert!(map.keys_and_values().is_empty());
    }
}
