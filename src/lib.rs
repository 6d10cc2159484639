//! # Primal Maps
//!
//! String-keyed hash maps over prime-sized tables.
//!
//! This crate provides two hash map implementations sharing one contract:
//!
//! - `ProbingMap`: open addressing with quadratic probing and tombstone deletion
//! - `ChainingMap`: separate chaining with a singly linked list per bucket
//!
//! Both take the hash function as a plain `fn(&str) -> u64`, keep their capacity prime, and
//! rebuild the whole table when they grow. `find_mode` is built on top of `ChainingMap`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primal_maps::{hash_function_1, ProbingMap};
//!
//! // Create a new hash map with room for 11 slots
//! let mut map = ProbingMap::with_capacity(11, hash_function_1);
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.len(), 1);
//! ```
//!
//! ## Chaining and Resizing
//!
//! ```rust
//! use primal_maps::{hash_function_2, ChainingMap, MapExtensions};
//!
//! let mut map = ChainingMap::with_capacity(75, hash_function_2);
//! assert_eq!(map.capacity(), 79);
//!
//! for key in (25..1000).step_by(13) {
//!     map.put(key.to_string(), key * 42);
//! }
//!
//! // Capacities are normalized to the next prime
//! map.resize(111);
//! assert_eq!(map.capacity(), 113);
//! assert_eq!(map.get("38"), Some(&(38 * 42)));
//! assert_eq!(map.keys().len(), map.len());
//! ```

/// Singly linked list used for the buckets of `ChainingMap`
mod chain;
/// Module implementing the separate-chaining hash map
mod chaining_map;
/// Error types for the map operations
mod error;
/// Hash functions the maps can be built with
mod hashing;
/// Most-frequent-element search
mod mode;
/// Prime capacity selection
pub mod prime;
/// Module implementing the quadratic-probing hash map
mod probing_map;
/// Utility traits for the hash maps
mod utils;

/// Capacity used by `new` and `Default` for both maps
pub const DEFAULT_CAPACITY: usize = 11;

pub use chain::Chain;
pub use chaining_map::ChainingMap;
pub use error::ResizeError;
pub use hashing::{HashFn, hash_function_1, hash_function_2};
pub use mode::{Mode, find_mode};
pub use probing_map::ProbingMap;
pub use utils::MapExtensions;

/// Iterator types returned by the maps
pub mod iter {
    pub use crate::chain::{IntoIter as ChainIntoIter, Iter as ChainIter};
    pub use crate::chaining_map::Iter as ChainingIter;
    pub use crate::probing_map::Iter as ProbingIter;
}
