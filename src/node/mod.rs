use core::fmt;

use crate::Error;

pub mod dispatch;
pub mod listen_filter;
pub mod local_node;

pub use dispatch::Route;
pub use listen_filter::ListenFilter;
pub use local_node::CanOpenNode;

/// A 7-bit CANopen node address in `1..=127`.
///
/// Address 0 is reserved for NMT broadcast and can't be a `NodeId`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u8);

impl NodeId {
    pub const MIN: NodeId = NodeId(1);
    pub const MAX: NodeId = NodeId(127);
    /// Address used when nothing else is configured
    pub const DEFAULT: NodeId = NodeId(0x5F);

    pub const fn new(raw: u8) -> Option<Self> {
        match raw & 0x7F {
            0 => None,
            masked if masked == raw => Some(NodeId(raw)),
            _ => None,
        }
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for NodeId {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        NodeId::new(raw).ok_or(Error::InvalidNodeId(raw))
    }
}

impl From<NodeId> for u8 {
    fn from(node_id: NodeId) -> Self {
        node_id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_range() {
        assert_eq!(NodeId::new(0), None);
        assert_eq!(NodeId::new(128), None);
        assert_eq!(NodeId::new(1).map(NodeId::raw), Some(1));
        assert_eq!(NodeId::new(127).map(NodeId::raw), Some(127));
        assert_eq!(NodeId::try_from(0x80), Err(Error::InvalidNodeId(0x80)));
    }
}
