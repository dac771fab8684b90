//! Services the engine needs from the platform.

use crate::config::Bitrate;
use crate::node::NodeId;

/// A CAN controller.
///
/// Frames are sent and received through [`embedded_can::nb::Can`]. A
/// `WouldBlock` from `transmit` counts as a failed transmission (nothing is
/// retried), a `WouldBlock` from `receive` means no frame is pending.
pub trait CanBus: embedded_can::nb::Can {
    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), Self::Error>;

    /// Brings the controller up for the node `node_id`.
    fn init(&mut self, node_id: NodeId) -> Result<(), Self::Error>;

    /// Adds an acceptance filter.
    ///
    /// - `id` and `mask` apply to the 11-bit identifier
    /// - a mask of `0` accepts every frame
    fn add_filter_mask(&mut self, id: u16, mask: u16) -> Result<(), Self::Error>;

    fn enable(&mut self);

    /// Leaves sleep mode.
    fn wake_up(&mut self);

    /// Arms the receive interrupt.
    ///
    /// The interrupt handler should call
    /// [`CanOpenNode::on_rx_pending`](crate::CanOpenNode::on_rx_pending).
    fn listen_rx_pending(&mut self);

    /// True if at least one received frame is waiting.
    fn is_rx_pending(&self) -> bool;
}

/// A monotonic millisecond clock, expected to wrap at `u32::MAX`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// Something that shows bus health, usually a LED.
pub trait StatusIndicator {
    fn set_bus_ok(&mut self, ok: bool);
}
