//! Storage for collision chains. Rather than boxing every entry, all chain
//! nodes across all buckets are flattened onto one Vec and linked together by
//! index, gaining data locality at the expense of a little bookkeeping.

/// Alias for the index of a node in the chain store's Vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeHandle(usize);

/// One entry in a collision chain.
pub(crate) struct ChainNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,

    /// The next node in the same chain, if any.
    pub(crate) next: Option<NodeHandle>,
}

/// A single contiguous Vec of chain nodes, addressed by their position in the
/// Vec. Slots vacated by removals are freelisted and reused by later pushes.
/// There's no compaction; the store stays as large as the most entries it has
/// ever held at once.
///
/// The store knows nothing about buckets. It only hands out handles, and it's
/// up to the owning table to remember which handle heads which chain.
pub(crate) struct ChainStore<K, V> {
    /// The nodes in the store. `None` marks a freelisted slot.
    store: Vec<Option<ChainNode<K, V>>>,

    /// Slots which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,
}

impl<K, V> ChainStore<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            store: Vec::new(),
            free: Vec::new(),
        }
    }

    /// The number of live nodes in the store.
    pub(crate) fn len(&self) -> usize {
        self.store.len() - self.free.len()
    }

    pub(crate) fn node(&self, handle: NodeHandle) -> Option<&ChainNode<K, V>> {
        self.store.get(handle.0).and_then(Option::as_ref)
    }

    pub(crate) fn node_mut(
        &mut self,
        handle: NodeHandle,
    ) -> Option<&mut ChainNode<K, V>> {
        self.store.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Makes a new node in front of `head` and returns a handle to it. The
    /// returned handle is the new head of that chain.
    pub(crate) fn push_front(
        &mut self,
        head: Option<NodeHandle>,
        key: K,
        value: V,
    ) -> NodeHandle {
        let node = ChainNode {
            key,
            value,
            next: head,
        };

        // use the first available location in the storage vec, or infer what
        // the next location will be on push.
        match self.free.pop() {
            Some(handle) => {
                self.store[handle.0] = Some(node);
                handle
            }
            None => {
                self.store.push(Some(node));
                NodeHandle(self.store.len() - 1)
            }
        }
    }

    /// Takes a node out of the store and freelists its slot. Does not touch
    /// whatever pointed at it; relinking the chain is the caller's problem.
    pub(crate) fn take(&mut self, handle: NodeHandle) -> Option<ChainNode<K, V>> {
        let node = self.store.get_mut(handle.0)?.take()?;
        self.free.push(handle);
        Some(node)
    }

    /// Walks a chain from `head` to its tail.
    pub(crate) fn chain(&self, head: Option<NodeHandle>) -> Chain<'_, K, V> {
        Chain {
            store: self,
            cursor: head,
        }
    }

    /// Clears the store. Does not free the underlying buffers.
    pub(crate) fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
    }
}

/// Follows `next` links through a [`ChainStore`], yielding each node along
/// with its handle.
pub(crate) struct Chain<'a, K, V> {
    store: &'a ChainStore<K, V>,
    cursor: Option<NodeHandle>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = (NodeHandle, &'a ChainNode<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let node = self.store.node(handle)?;
        self.cursor = node.next;

        Some((handle, node))
    }
}
