//! An ordered map on top of a plain, unbalanced binary search tree. Nothing
//! rotates, nothing rebalances: feed it sorted keys and it degrades into a
//! linked list with extra steps. In exchange every operation is short enough
//! to read in one sitting.

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    iter::{FromIterator, FusedIterator},
    mem,
};

use crate::error::MapError;
use crate::map::Map;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A node that lives in the tree. Owned by its parent, or by the map itself
/// if it's the root.
struct Node<K, V> {
    key: K,
    value: V,

    /// Everything under here sorts before `key`.
    left: Link<K, V>,

    /// Everything under here sorts after `key`.
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// A map which keeps its keys in order, backed by a binary search tree.
///
/// For each node with key `k`, every key in its left subtree compares less
/// than `k` and every key in its right subtree compares greater. Keys are
/// unique. Lookups, insertions and removals walk a single root-to-leaf path,
/// so they cost O(depth), which is O(log n) for friendly insertion orders and
/// O(n) for hostile ones.
pub struct OrderedMap<K, V> {
    root: Link<K, V>,
    size: usize,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty map.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of entries in the map. O(1).
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        // tear down with an explicit worklist; a degenerate tree is as deep as
        // it is long and recursive drop would happily blow the stack
        let mut pending: Vec<Box<Node<K, V>>> =
            self.root.take().into_iter().collect();

        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }

        if self.size > 0 {
            log::trace!("cleared {} entries from ordered map", self.size);
        }
        self.size = 0;
    }

    /// The entry with the smallest key, if there is one.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// The entry with the largest key, if there is one.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Starts a fresh in-order traversal over the map as it stands right
    /// now. Entries come out in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.size)
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Puts a value into the map. If the key is already present its value is
    /// overwritten in place and the old value is returned; the shape of the
    /// tree doesn't change. Otherwise a new leaf is hung off the end of the
    /// search path.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut link = &mut self.root;

        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => {
                    return Some(mem::replace(&mut node.value, value))
                }
            }
        }

        *link = Some(Box::new(Node::new(key, value)));
        self.size += 1;

        None
    }

    /// Looks up the value stored under a key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            match k.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }

        None
    }

    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();

        while let Some(node) = current {
            match k.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }

        None
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(k).is_some()
    }

    /// Takes a key out of the map, returning its value. Does nothing and
    /// returns `None` if the key isn't there.
    ///
    /// A leaf is simply cut off. A node with one child is replaced by that
    /// child. A node with two children takes over the key and value of its
    /// in-order successor (the leftmost node of its right subtree), and the
    /// successor, which has no left child, is cut out of the right subtree.
    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = &mut self.root;

        // walk down to the slot holding the match. the comparison only takes
        // a shared borrow so that breaking out leaves `link` free to use.
        loop {
            let ord = match link.as_ref() {
                Some(node) => k.cmp(node.key.borrow()),
                None => return None,
            };

            match ord {
                Ordering::Less => link = &mut link.as_mut()?.left,
                Ordering::Greater => link = &mut link.as_mut()?.right,
                Ordering::Equal => break,
            }
        }

        let node = link.as_mut()?;
        if node.left.is_some() && node.right.is_some() {
            log::trace!("removing interior node, splicing in its successor");

            let successor = take_leftmost(&mut node.right)?;
            let Node { key, value, .. } = *successor;
            node.key = key;
            self.size -= 1;

            return Some(mem::replace(&mut node.value, value));
        }

        // zero or one child: whichever child exists (if any) moves up
        let mut node = link.take()?;
        *link = node.left.take().or_else(|| node.right.take());
        self.size -= 1;

        let Node { value, .. } = *node;
        Some(value)
    }
}

/// Cuts the leftmost node out of the subtree rooted at `link`, moving its
/// right child (it can't have a left one) up into its place.
fn take_leftmost<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    while link.as_ref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }

    let mut node = link.take()?;
    *link = node.right.take();

    Some(node)
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Map<K, V> for OrderedMap<K, V>
where
    K: Ord,
{
    fn insert(&mut self, k: K, v: V) -> Option<V> {
        OrderedMap::insert(self, k, v)
    }

    fn get<'a>(&'a self, k: &K) -> Option<&'a V> {
        OrderedMap::get(self, k)
    }

    fn get_mut<'a>(&'a mut self, k: &K) -> Option<&'a mut V> {
        OrderedMap::get_mut(self, k)
    }

    fn remove(&mut self, k: &K) -> Option<V> {
        OrderedMap::remove(self, k)
    }

    fn clear(&mut self) {
        OrderedMap::clear(self)
    }

    fn len(&self) -> usize {
        self.size
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order cursor over an [`OrderedMap`].
///
/// Rather than recursing, the cursor keeps a stack of nodes whose left
/// subtrees have been descended but which haven't been yielded yet. Each step
/// pops the top of the stack, yields it, and pushes the left spine of its
/// right child. That makes it possible to stop after any entry and pick up
/// again later, and the stack never holds more than one root-to-leaf path.
///
/// The map can't be mutated while a cursor borrows it, so what a cursor sees
/// is always the tree as it was when the traversal started.
pub struct Iter<'a, K, V> {
    root: Option<&'a Node<K, V>>,
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
    len: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Self {
            root,
            stack: Vec::new(),
            remaining: len,
            len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }

    /// Whether there's anything left to yield.
    pub fn has_next(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Like [`Iterator::next`], but running off the end is an error rather
    /// than a quiet `None`. For callers who consider asking for an entry that
    /// isn't there a bug.
    pub fn try_next(&mut self) -> Result<(&'a K, &'a V), MapError> {
        self.next().ok_or(MapError::Exhausted)
    }

    /// Starts the traversal over from the smallest key.
    pub fn rewind(&mut self) {
        self.stack.clear();
        self.remaining = self.len;
        self.push_left_spine(self.root);
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root,
            stack: self.stack.clone(),
            remaining: self.remaining,
            len: self.len,
        }
    }
}
