//! The surface rendered lines are attached to.

use std::collections::BTreeMap;

/// Opaque handle to a node attached to a [`RenderTarget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

/// A surface that owns rendered line payloads.
pub trait RenderTarget<P> {
    /// Attach a payload, returning the handle of its node.
    fn attach(&mut self, payload: P) -> NodeHandle;

    /// Attach several payloads at once, in order.
    fn attach_batch(&mut self, payloads: Vec<P>) -> Vec<NodeHandle> {
        payloads.into_iter().map(|p| self.attach(p)).collect()
    }

    /// Replace the payload of an attached node in place.
    fn replace(&mut self, node: NodeHandle, payload: P);

    /// Move an attached node without touching its payload.
    fn set_position(&mut self, node: NodeHandle, top: f32, height: f32);

    fn detach(&mut self, node: NodeHandle);
}

/// A node held by a [`MemoryTarget`].
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryNode<P> {
    pub payload: P,
    /// Last position set through [`RenderTarget::set_position`].
    pub position: Option<(f32, f32)>,
}

/// Call counters of a [`MemoryTarget`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetCounters {
    pub attached: usize,
    pub batches: usize,
    pub replaced: usize,
    pub positioned: usize,
    pub detached: usize,
}

/// In-memory render target; handy for headless use and tests.
#[derive(Clone, Debug)]
pub struct MemoryTarget<P> {
    nodes: BTreeMap<NodeHandle, MemoryNode<P>>,
    next_id: u64,
    counters: TargetCounters,
}

impl<P> Default for MemoryTarget<P> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 1,
            counters: TargetCounters::default(),
        }
    }
}

impl<P> MemoryTarget<P> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&MemoryNode<P>> {
        self.nodes.get(&handle)
    }

    #[must_use]
    pub fn payload(&self, handle: NodeHandle) -> Option<&P> {
        self.nodes.get(&handle).map(|n| &n.payload)
    }

    /// Attached nodes in attach order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &MemoryNode<P>)> {
        self.nodes.iter().map(|(h, n)| (*h, n))
    }

    #[must_use]
    pub fn counters(&self) -> TargetCounters {
        self.counters
    }

    pub fn reset_counters(&mut self) {
        self.counters = TargetCounters::default();
    }
}

impl<P> RenderTarget<P> for MemoryTarget<P> {
    fn attach(&mut self, payload: P) -> NodeHandle {
        let handle = NodeHandle(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            handle,
            MemoryNode {
                payload,
                position: None,
            },
        );
        self.counters.attached += 1;
        handle
    }

    fn attach_batch(&mut self, payloads: Vec<P>) -> Vec<NodeHandle> {
        self.counters.batches += 1;
        payloads.into_iter().map(|p| self.attach(p)).collect()
    }

    fn replace(&mut self, node: NodeHandle, payload: P) {
        if let Some(existing) = self.nodes.get_mut(&node) {
            existing.payload = payload;
            self.counters.replaced += 1;
        }
    }

    fn set_position(&mut self, node: NodeHandle, top: f32, height: f32) {
        if let Some(existing) = self.nodes.get_mut(&node) {
            existing.position = Some((top, height));
            self.counters.positioned += 1;
        }
    }

    fn detach(&mut self, node: NodeHandle) {
        if self.nodes.remove(&node).is_some() {
            self.counters.detached += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_replace_detach() {
        let mut target = MemoryTarget::new();
        let a = target.attach("a");
        let b = target.attach("b");
        assert_ne!(a, b);
        assert_eq!(target.len(), 2);

        target.replace(a, "a2");
        assert_eq!(target.payload(a), Some(&"a2"));

        target.set_position(b, 19.0, 19.0);
        assert_eq!(target.node(b).and_then(|n| n.position), Some((19.0, 19.0)));

        target.detach(a);
        target.detach(a);
        assert_eq!(target.len(), 1);
        assert_eq!(
            target.counters(),
            TargetCounters {
                attached: 2,
                batches: 0,
                replaced: 1,
                positioned: 1,
                detached: 1,
            }
        );
    }

    #[test]
    fn batch_attach_keeps_order() {
        let mut target = MemoryTarget::new();
        let handles = target.attach_batch(vec![1, 2, 3]);
        let payloads: Vec<_> = handles.iter().filter_map(|&h| target.payload(h).copied()).collect();
        assert_eq!(payloads, [1, 2, 3]);
        assert_eq!(target.counters().batches, 1);
    }

    #[test]
    fn unknown_nodes_are_ignored() {
        let mut target: MemoryTarget<u8> = MemoryTarget::new();
        target.replace(NodeHandle(42), 1);
        target.set_position(NodeHandle(42), 0.0, 1.0);
        target.detach(NodeHandle(42));
        assert_eq!(target.counters(), TargetCounters::default());
    }
}
