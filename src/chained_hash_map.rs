//! A hash map that resolves collisions by separate chaining: a fixed row of
//! buckets, each the head of a singly-linked chain of entries whose keys hash
//! there.

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash, Hasher},
    mem,
};

use crate::chain::{ChainStore, NodeHandle};
use crate::error::MapError;
use crate::map::Map;

/// How many buckets a table gets when nobody says otherwise.
pub const DEFAULT_BUCKET_COUNT: usize = 11;

/// A separate-chaining hash map with a fixed number of buckets.
///
/// The bucket count is chosen at construction and never changes: there is no
/// load factor and no rehashing. Lookups cost O(len / bucket_count) on
/// average and O(len) when everything hashes into the same bucket.
///
/// New keys are pushed onto the front of their bucket's chain. Keys must hash
/// consistently with their `Eq` implementation, and must not change either
/// while they're in the map; break that and lookups will quietly miss.
pub struct ChainedHashMap<K, V, S = RandomState>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// The head of each bucket's chain.
    buckets: Vec<Option<NodeHandle>>,
    chains: ChainStore<K, V>,
    size: usize,
    hash_builder: S,
}

impl<K, V> ChainedHashMap<K, V, RandomState>
where
    K: Eq + Hash,
{
    /// Makes a new map with [`DEFAULT_BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        ChainedHashMap::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// Makes a new map with a specified number of buckets.
    ///
    /// # Panics
    ///
    /// If `bucket_count` is zero. See [`try_with_buckets`] for a version
    /// that doesn't.
    ///
    /// [`try_with_buckets`]: ChainedHashMap::try_with_buckets
    pub fn with_buckets(bucket_count: usize) -> Self {
        ChainedHashMap::with_buckets_and_hasher(bucket_count, Default::default())
    }

    pub fn try_with_buckets(bucket_count: usize) -> Result<Self, MapError> {
        ChainedHashMap::try_with_buckets_and_hasher(
            bucket_count,
            Default::default(),
        )
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Makes a new map with a specified number of buckets, hashing keys with
    /// the given hasher builder.
    ///
    /// # Panics
    ///
    /// If `bucket_count` is zero.
    pub fn with_buckets_and_hasher(bucket_count: usize, hash_builder: S) -> Self {
        assert!(bucket_count > 0, "{}", MapError::ZeroBuckets);

        log::debug!("creating chained hash map with {} buckets", bucket_count);

        ChainedHashMap {
            buckets: vec![None; bucket_count],
            chains: ChainStore::new(),
            size: 0,
            hash_builder,
        }
    }

    pub fn try_with_buckets_and_hasher(
        bucket_count: usize,
        hash_builder: S,
    ) -> Result<Self, MapError> {
        if bucket_count == 0 {
            return Err(MapError::ZeroBuckets);
        }

        Ok(ChainedHashMap::with_buckets_and_hasher(bucket_count, hash_builder))
    }

    /// The number of buckets, fixed for the life of the map.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// The number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Which bucket a key belongs in: its hash modulo the bucket count.
    pub fn bucket_index<Q>(&self, k: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let mut h = self.hash_builder.build_hasher();
        k.hash(&mut h);

        // the hash is unsigned, so there's no sign to strip before the modulo
        (h.finish() % self.buckets.len() as u64) as usize
    }

    /// Finds the handle of the node holding `k`, if there is one.
    fn find<Q>(&self, k: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let head = self.buckets[self.bucket_index(k)];

        self.chains
            .chain(head)
            .find(|(_, node)| key_matches(&node.key, k))
            .map(|(handle, _)| handle)
    }

    /// Puts a value into the map. If the key is already in its bucket's chain
    /// the value is overwritten in place and the old one returned. Otherwise
    /// a new entry goes on the front of the chain.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        if let Some(handle) = self.find(&k) {
            let node = self.chains.node_mut(handle)?;
            return Some(mem::replace(&mut node.value, v));
        }

        let idx = self.bucket_index(&k);
        let head = self.buckets[idx];
        self.buckets[idx] = Some(self.chains.push_front(head, k, v));
        self.size += 1;
        debug_assert_eq!(self.chains.len(), self.size);

        log::trace!("new entry chained into bucket {}", idx);

        None
    }

    /// Looks up the value stored under a key.
    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.find(k)?;
        self.chains.node(handle).map(|node| &node.value)
    }

    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.find(k)?;
        self.chains.node_mut(handle).map(|node| &mut node.value)
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(k).is_some()
    }

    /// Takes a key out of the map, returning its value, or `None` if it
    /// wasn't there.
    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(k);

        // walk the chain remembering who points at the current node, so it
        // can be pointed past the match
        let mut prev = None;
        let mut found = None;
        for (handle, node) in self.chains.chain(self.buckets[idx]) {
            if key_matches(&node.key, k) {
                found = Some(handle);
                break;
            }
            prev = Some(handle);
        }

        let node = self.chains.take(found?)?;
        match prev {
            Some(prev) => {
                if let Some(prev) = self.chains.node_mut(prev) {
                    prev.next = node.next;
                }
            }
            // it was the head, so the bucket itself moves on
            None => self.buckets[idx] = node.next,
        }
        self.size -= 1;
        debug_assert_eq!(self.chains.len(), self.size);

        log::trace!("entry unlinked from bucket {}", idx);

        Some(node.value)
    }

    /// Drops every entry. The bucket count stays the same.
    pub fn clear(&mut self) {
        for head in self.buckets.iter_mut() {
            *head = None;
        }
        self.chains.clear();

        if self.size > 0 {
            log::trace!("cleared {} entries from chained hash map", self.size);
        }
        self.size = 0;
    }

    /// The number of entries chained at each bucket, in bucket order. Always
    /// [`bucket_count`](ChainedHashMap::bucket_count) long, and always sums
    /// to [`len`](ChainedHashMap::len).
    pub fn bucket_sizes(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|head| self.chains.chain(*head).count())
            .collect()
    }

    /// Every entry, bucket by bucket, each bucket from the head of its chain
    /// to the tail. Within a bucket that's newest first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            chains: &self.chains,
            buckets: self.buckets.iter(),
            cursor: None,
            remaining: self.size,
        }
    }

    /// Whether any entry holds a value equal to `v`. This looks at every
    /// entry in the map.
    pub fn contains_value(&self, v: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, value)| value == v)
    }

    /// The key of the first entry found holding a value equal to `v`, in
    /// [`iter`](ChainedHashMap::iter) order. If several keys share the value,
    /// which one wins depends on hashing and insertion order.
    pub fn key_of_value(&self, v: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.iter().find(|(_, value)| *value == v).map(|(key, _)| key)
    }
}

fn key_matches<K, Q>(key: &K, k: &Q) -> bool
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    let key: &Q = key.borrow();
    key == k
}

impl<K, V, S> Default for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        ChainedHashMap::with_buckets_and_hasher(
            DEFAULT_BUCKET_COUNT,
            Default::default(),
        )
    }
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Map<K, V> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, k: K, v: V) -> Option<V> {
        ChainedHashMap::insert(self, k, v)
    }

    fn get<'a>(&'a self, k: &K) -> Option<&'a V> {
        ChainedHashMap::get(self, k)
    }

    fn get_mut<'a>(&'a mut self, k: &K) -> Option<&'a mut V> {
        ChainedHashMap::get_mut(self, k)
    }

    fn remove(&mut self, k: &K) -> Option<V> {
        ChainedHashMap::remove(self, k)
    }

    fn clear(&mut self) {
        ChainedHashMap::clear(self)
    }

    fn len(&self) -> usize {
        self.size
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates over a [`ChainedHashMap`] bucket by bucket.
pub struct Iter<'a, K, V> {
    chains: &'a ChainStore<K, V>,
    buckets: std::slice::Iter<'a, Option<NodeHandle>>,
    cursor: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let chains = self.chains;

        loop {
            if let Some(node) = self.cursor.and_then(|h| chains.node(h)) {
                self.cursor = node.next;
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&node.key, &node.value));
            }

            // this chain's done, move on to the next bucket
            self.cursor = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
