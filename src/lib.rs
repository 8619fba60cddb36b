//! A pair of hand-rolled maps: an ordered map on an unbalanced binary search
//! tree, and a separate-chaining hash map with a fixed number of buckets.
//!
//! ```
//! use chained_collections::{ChainedHashMap, OrderedMap};
//!
//! let mut tree = OrderedMap::new();
//! tree.insert(5, "a");
//! tree.insert(3, "b");
//! tree.insert(8, "c");
//! tree.insert(3, "z");
//! assert_eq!(3, tree.len());
//! assert_eq!(
//!     vec![(&3, &"z"), (&5, &"a"), (&8, &"c")],
//!     tree.iter().collect::<Vec<_>>()
//! );
//!
//! let mut table = ChainedHashMap::with_buckets(20);
//! for id in 0..1000u32 {
//!     table.insert(id, format!("Student{}", id));
//! }
//! assert_eq!(1000, table.bucket_sizes().iter().sum::<usize>());
//! assert_eq!(Some(&7), table.key_of_value(&"Student7".to_owned()));
//! ```

mod chain;
mod chained_hash_map;
mod error;
mod identity_hasher;
mod map;
mod ordered_map;
#[cfg(feature = "shared_map")]
mod shared_map;

pub use chained_hash_map::{ChainedHashMap, DEFAULT_BUCKET_COUNT};
pub use error::MapError;
pub use identity_hasher::{BuildIdentityHasher, IdentityHasher};
pub use map::Map;
pub use ordered_map::OrderedMap;
#[cfg(feature = "shared_map")]
pub use shared_map::SharedMap;

/// Iterator types, for naming in signatures.
pub mod iter {
    pub use crate::chained_hash_map::Iter as ChainedIter;
    pub use crate::ordered_map::Iter as OrderedIter;
}
