//! Process data objects.
//!
//! PDO payloads are application defined and never interpreted here: inbound
//! PDOs are handed to listeners untouched, outbound PDOs are only checked
//! against the legal COB-ID range and the CAN data length.

use crate::frames::{PDO_BASE, PDO_FIRST, PDO_LAST};
use crate::node::NodeId;
use crate::Error;

/// Checks that a PDO may be sent on `cob_id` with `len` data bytes.
pub fn validate(cob_id: u16, len: usize) -> Result<(), Error> {
    if !(PDO_FIRST..=PDO_LAST).contains(&cob_id) {
        return Err(Error::InvalidPdoCobId(cob_id));
    }
    if len > 8 {
        return Err(Error::InvalidLength(len));
    }
    Ok(())
}

/// The pre-defined connection set of CiA 301
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u16)]
pub enum DefaultPdo {
    Tpdo1 = 0,
    Rpdo1 = 1,
    Tpdo2 = 2,
    Rpdo2 = 3,
    Tpdo3 = 4,
    Rpdo3 = 5,
    Tpdo4 = 6,
    Rpdo4 = 7,
}

impl DefaultPdo {
    /// Default COB-ID of this PDO for `node_id`
    pub const fn cob_id(self, node_id: NodeId) -> u16 {
        PDO_BASE + 0x80 * self as u16 + node_id.raw() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range() {
        assert_eq!(validate(0x180, 0), Err(Error::InvalidPdoCobId(0x180)));
        assert_eq!(validate(0x181, 0), Ok(()));
        assert_eq!(validate(0x57F, 8), Ok(()));
        assert_eq!(validate(0x580, 8), Err(Error::InvalidPdoCobId(0x580)));
        assert_eq!(validate(0x000, 1), Err(Error::InvalidPdoCobId(0x000)));
        assert_eq!(validate(0x7FF, 1), Err(Error::InvalidPdoCobId(0x7FF)));
        assert_eq!(validate(0x200, 9), Err(Error::InvalidLength(9)));
    }

    #[test]
    fn every_id_outside_the_range_is_rejected() {
        for cob_id in (0..0x181).chain(0x580..=0x7FF) {
            assert_eq!(validate(cob_id, 1), Err(Error::InvalidPdoCobId(cob_id)));
        }
    }

    #[test]
    fn default_cob_ids() {
        let node = NodeId::new(0x05).unwrap();
        assert_eq!(DefaultPdo::Tpdo1.cob_id(node), 0x185);
        assert_eq!(DefaultPdo::Rpdo1.cob_id(node), 0x205);
        assert_eq!(DefaultPdo::Tpdo2.cob_id(node), 0x285);
        assert_eq!(DefaultPdo::Rpdo4.cob_id(node), 0x505);
        assert_eq!(DefaultPdo::Rpdo4.cob_id(NodeId::MAX), 0x57F);
    }
}
