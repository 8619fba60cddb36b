/// Describes what a map is. Both the tree and the hash table speak this, so
/// wrappers like [`SharedMap`](crate::SharedMap) can sit on top of either.
///
/// Key bounds differ between the two (`Ord` versus `Eq + Hash`), so they're
/// left to the implementors rather than baked in here.
pub trait Map<K, V> {
    /// Put a value into the map under the given key. If the key was already
    /// present its value is replaced in place and the old one handed back;
    /// otherwise a new entry is made and `None` is returned.
    fn insert(&mut self, k: K, v: V) -> Option<V>;

    /// Look up the value stored under a key.
    fn get<'a>(&'a self, k: &K) -> Option<&'a V>;

    /// Look up a mutable reference to the value stored under a key.
    fn get_mut<'a>(&'a mut self, k: &K) -> Option<&'a mut V>;

    /// Take a key out of the map, returning whatever was there.
    fn remove(&mut self, k: &K) -> Option<V>;

    /// Drops every entry.
    fn clear(&mut self);

    /// The number of entries in the map right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
