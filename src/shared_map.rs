use parking_lot::RwLock;
use std::{marker::PhantomData, sync::Arc};

use crate::map::Map;

/// Wrapper for a map which is shareable across thread boundaries.
///
/// The maps in this crate assume one writer at a time and have no locking of
/// their own. This puts one lock around the whole map: lookups take the read
/// side, anything that changes the map takes the write side.
pub struct SharedMap<M, K, V>(Arc<RwLock<M>>, PhantomData<K>, PhantomData<V>)
where
    M: Map<K, V>,
    V: Clone;

impl<M, K, V> SharedMap<M, K, V>
where
    M: Map<K, V>,
    V: Clone,
{
    /// Wraps a map into a shared map accessor, making it safe to move across
    /// thread boundaries. Enforces an additional constraint of Clone on
    /// values.
    pub fn with_map(map: M) -> Self {
        Self(Arc::from(RwLock::from(map)), PhantomData, PhantomData)
    }

    /// Inserts an item into the map, returning the previous value if the key
    /// was already there.
    pub fn insert(&self, k: K, v: V) -> Option<V> {
        self.0.write().insert(k, v)
    }

    /// Get an item from the map. This clones it to minimize the lock time of
    /// the map.
    pub fn get(&self, k: &K) -> Option<V> {
        self.0.read().get(k).cloned()
    }

    /// Runs `f` against the value under `k` while holding the write lock.
    /// Returns whatever `f` returns, or `None` if the key wasn't there.
    pub fn update<F, R>(&self, k: &K, f: F) -> Option<R>
    where
        F: FnOnce(&mut V) -> R,
    {
        self.0.write().get_mut(k).map(f)
    }

    /// Remove an item from the map, returning the removed item if it existed.
    pub fn remove(&self, k: &K) -> Option<V> {
        self.0.write().remove(k)
    }

    /// Clears the map.
    pub fn clear(&self) {
        self.0.write().clear()
    }

    /// The number of elements in the map at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Runs `f` with shared access to the whole map, for the operations the
    /// [`Map`] trait doesn't cover (traversals, bucket statistics and so on).
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&M) -> R,
    {
        f(&self.0.read())
    }
}

impl<M, K, V> Clone for SharedMap<M, K, V>
where
    M: Map<K, V>,
    V: Clone,
{
    fn clone(&self) -> Self {
        SharedMap(self.0.clone(), PhantomData, PhantomData)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::{ChainedHashMap, OrderedMap, SharedMap};

    #[test]
    fn test_across_threads() {
        let map: SharedMap<ChainedHashMap<usize, usize>, usize, usize> =
            SharedMap::with_map(ChainedHashMap::with_buckets(4));
        map.insert(1, 1);

        let thread_map = map.clone();
        let r = thread::spawn(move || thread_map.get(&1)).join();

        assert_eq!(Some(1), r.unwrap());
    }

    #[test]
    fn test_many_writers() {
        let map: SharedMap<OrderedMap<usize, usize>, usize, usize> =
            SharedMap::with_map(OrderedMap::new());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let map = map.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        map.insert(t * 100 + i, i);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(400, map.len());
        let keys: Vec<usize> =
            map.read(|m| m.iter().map(|(k, _)| *k).collect());
        assert_eq!((0..400).collect::<Vec<_>>(), keys);
    }

    #[test]
    fn test_update_and_remove() {
        let map: SharedMap<OrderedMap<&str, u32>, &str, u32> =
            SharedMap::with_map(OrderedMap::new());
        map.insert("hits", 0);

        assert_eq!(Some(1), map.update(&"hits", |v| {
            *v += 1;
            *v
        }));
        assert_eq!(None, map.update(&"misses", |v| *v));
        assert_eq!(Some(1), map.remove(&"hits"));
        assert!(map.is_empty());

        map.insert("a", 1);
        map.clear();
        assert_eq!(0, map.len());
    }

    #[test]
    fn test_bucket_stats_through_read() {
        let map: SharedMap<ChainedHashMap<u32, u32>, u32, u32> =
            SharedMap::with_map(ChainedHashMap::with_buckets(3));
        for i in 0..30 {
            map.insert(i, i);
        }

        let total: usize = map.read(|m| m.bucket_sizes().iter().sum());
        assert_eq!(30, total);
    }
}
