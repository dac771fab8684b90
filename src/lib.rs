//! A reduced CANopen protocol engine.
//!
//! Maps raw CAN frames to and from the CANopen message classes (NMT, PDO,
//! expedited SDO and heartbeat) and drives the node's NMT state machine, in
//! either master or slave role. The CAN controller, the clock and an optional
//! status indicator are provided by the application through the traits in
//! [`hal`].
//!
//! The engine is single threaded: [`CanOpenNode::on_rx_pending`] is meant to be
//! called from the receive interrupt and [`CanOpenNode::poll`] from the main
//! loop. Listeners run synchronously on whichever context dispatched the frame,
//! so they must be short and must not block.
#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod config;
pub mod error;
pub mod frames;
pub mod hal;
pub mod heartbeat;
pub mod listener;
pub mod nmt;
pub mod node;
pub mod pdo;
pub mod sdo;

pub use config::{Bitrate, Config, Role};
pub use error::Error;
pub use frames::CanFrame;
pub use hal::{CanBus, Clock, StatusIndicator};
pub use heartbeat::Heartbeat;
pub use listener::{
    HeartbeatListener, PdoListener, SdoReplyListener, SdoRequestListener, StateListener,
};
pub use nmt::{NmtCommand, NmtState};
pub use node::{CanOpenNode, ListenFilter, NodeId};
pub use sdo::{SdoCommand, SdoData, SdoFrame, SdoValue};
