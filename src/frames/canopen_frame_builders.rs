use embedded_can::StandardId;

use super::*;
use crate::nmt::{Nmt, NmtCommand, NmtState};
use crate::node::NodeId;
use crate::sdo::SdoFrame;
use crate::Error;

/// NMT command for `target`, `None` addresses every node.
pub fn nmt_frame(command: NmtCommand, target: Option<NodeId>) -> CanFrame {
    let target = target.map_or(0, NodeId::raw);
    CanFrame::from_standard(Nmt::NMT_REQUEST_ID, &[command as u8, target])
}

pub fn heartbeat_frame(node_id: NodeId, state: NmtState) -> CanFrame {
    CanFrame::from_standard(
        node_cob_id(HEARTBEAT_BASE, node_id),
        &[state.heartbeat_code()],
    )
}

/// SDO request sent to the server `sdo.node_id`.
pub fn sdo_request_frame(sdo: &SdoFrame) -> CanFrame {
    CanFrame::from_standard(node_cob_id(SDO_REQUEST_BASE, sdo.node_id), &sdo.encode())
}

/// SDO response sent by the server `node_id`.
pub fn sdo_response_frame(node_id: NodeId, sdo: &SdoFrame) -> CanFrame {
    CanFrame::from_standard(node_cob_id(SDO_RESPONSE_BASE, node_id), &sdo.encode())
}

/// Validates a PDO and builds its frame.
pub fn pdo_frame(cob_id: u16, data: &[u8]) -> Result<CanFrame, Error> {
    crate::pdo::validate(cob_id, data.len())?;
    CanFrame::standard(cob_id, data)
}

#[inline]
fn node_cob_id(base: u16, node_id: NodeId) -> StandardId {
    // SAFETY: the highest base is 0x700 and the maximum node_id is 0x7F
    unsafe { StandardId::new_unchecked(base + node_id.raw() as u16) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdo::SdoCommand;
    use embedded_can::Frame;

    fn node(raw: u8) -> NodeId {
        NodeId::new(raw).unwrap()
    }

    #[test]
    fn nmt() {
        let frame = nmt_frame(NmtCommand::Reset, Some(node(0x10)));
        assert_eq!(frame.cob_id(), Some(0));
        assert_eq!(frame.data(), &[0x81, 0x10]);

        let frame = nmt_frame(NmtCommand::Start, None);
        assert_eq!(frame.data(), &[0x01, 0x00]);
    }

    #[test]
    fn heartbeat() {
        for (state, code) in [
            (NmtState::Operational, 0x05),
            (NmtState::Stopped, 0x04),
            (NmtState::PreOperational, 0x7F),
            (NmtState::BootUp, 0x00),
        ] {
            let frame = heartbeat_frame(node(0x22), state);
            assert_eq!(frame.cob_id(), Some(0x722));
            assert_eq!(frame.data(), &[code]);
        }
    }

    #[test]
    fn sdo_read_request() {
        let frame = sdo_request_frame(&SdoFrame::read(node(5), 0x1018, 1));
        assert_eq!(frame.cob_id(), Some(0x605));
        assert_eq!(frame.dlc(), 8);
        assert_eq!(frame.data(), &[0x40, 0x18, 0x10, 0x01, 0, 0, 0, 0]);
    }

    #[test]
    fn sdo_response_uses_server_address() {
        let sdo = SdoFrame::write_ack(node(9), 0x2000, 3);
        let frame = sdo_response_frame(node(0x12), &sdo);
        assert_eq!(frame.cob_id(), Some(0x592));
        assert_eq!(frame.data(), &[0x60, 0x00, 0x20, 0x03, 0, 0, 0, 0]);
        assert_eq!(sdo.command, SdoCommand::WriteAck);
    }

    #[test]
    fn pdo() {
        assert!(pdo_frame(0x181, &[1, 2, 3]).is_ok());
        assert_eq!(pdo_frame(0x180, &[]), Err(Error::InvalidPdoCobId(0x180)));
        assert_eq!(pdo_frame(0x201, &[0; 9]), Err(Error::InvalidLength(9)));
    }
}
