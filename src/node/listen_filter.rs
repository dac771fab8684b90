use heapless::Vec;

use crate::node::NodeId;
use crate::Error;

const LISTEN_FILTER_CAPACITY: usize = 12;

/// Nodes whose heartbeats and SDO replies a slave surfaces to its listeners.
///
/// Ordered, duplicate free and append only.
#[derive(Debug, Clone, Default)]
pub struct ListenFilter {
    nodes: Vec<NodeId, LISTEN_FILTER_CAPACITY>,
}

impl ListenFilter {
    pub const CAPACITY: usize = LISTEN_FILTER_CAPACITY;

    pub const fn new() -> Self {
        ListenFilter { nodes: Vec::new() }
    }

    /// Adds `node_id`. Returns `Ok(false)` if it was already present.
    pub fn add(&mut self, node_id: NodeId) -> Result<bool, Error> {
        if self.contains(node_id) {
            return Ok(false);
        }
        self.nodes
            .push(node_id)
            .map_err(|_| Error::ListenFilterFull)?;
        Ok(true)
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.nodes.contains(&node_id)
    }

    /// True if `offset` (a COB-ID minus its function base) names a node in the filter.
    pub fn matches(&self, offset: u16) -> bool {
        self.nodes.iter().any(|node| node.raw() as u16 == offset)
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn is_full(&self) -> bool {
        self.nodes.is_full()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_ignored() {
        let mut filter = ListenFilter::new();
        let node = NodeId::new(0x0A).unwrap();
        assert_eq!(filter.add(node), Ok(true));
        assert_eq!(filter.add(node), Ok(false));
        assert_eq!(filter.len(), 1);
        assert!(filter.matches(0x0A));
        assert!(!filter.matches(0x0B));
    }

    #[test]
    fn capacity_is_reported() {
        let mut filter = ListenFilter::new();
        for raw in 1..=ListenFilter::CAPACITY as u8 {
            filter.add(NodeId::new(raw).unwrap()).unwrap();
        }
        assert_eq!(
            filter.add(NodeId::new(100).unwrap()),
            Err(Error::ListenFilterFull)
        );
        assert_eq!(filter.len(), ListenFilter::CAPACITY);
        assert!(filter.is_full());
        assert_eq!(filter.iter().next().map(NodeId::raw), Some(1));
    }
}
