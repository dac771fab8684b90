//! Raw frames and the CANopen wire codec.

pub mod can_frame;
pub mod canopen_frame_builders;

pub use can_frame::CanFrame;
pub use canopen_frame_builders::*;

/// NMT node control
pub const NMT_ID: u16 = 0x000;
/// First COB-ID of the PDO address space (TPDO1 base)
pub const PDO_BASE: u16 = 0x180;
/// Lowest COB-ID a PDO may be sent on
pub const PDO_FIRST: u16 = 0x181;
/// Highest COB-ID a PDO may be sent on
pub const PDO_LAST: u16 = 0x57F;
/// SDO server to client, `+ node id`
pub const SDO_RESPONSE_BASE: u16 = 0x580;
/// SDO client to server, `+ node id`
pub const SDO_REQUEST_BASE: u16 = 0x600;
/// NMT error control (heartbeat), `+ node id`
pub const HEARTBEAT_BASE: u16 = 0x700;
