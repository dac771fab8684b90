#![allow(dead_code)]

use core::cell::Cell;
use std::collections::VecDeque;

use canopen_node::{Bitrate, CanBus, CanFrame, NodeId, StatusIndicator};
use embedded_can::{nb::Can, ErrorKind, Frame};

#[derive(Default)]
pub struct MockBus {
    pub sent: Vec<CanFrame>,
    pub rx: VecDeque<CanFrame>,
    pub filters: Vec<(u16, u16)>,
    pub bitrate: Option<Bitrate>,
    pub initialized_as: Option<NodeId>,
    pub enabled: bool,
    pub awake: bool,
    pub rx_interrupt: bool,
    /// Every transmit reports a full mailbox
    pub busy: bool,
    /// Every transmit reports a bus error
    pub bus_off: bool,
    /// Every acceptance filter is rejected
    pub filters_rejected: bool,
}

impl MockBus {
    /// `(cob_id, data)` of every transmitted frame
    pub fn sent_frames(&self) -> Vec<(u16, Vec<u8>)> {
        self.sent
            .iter()
            .map(|frame| (frame.cob_id().unwrap(), frame.data().to_vec()))
            .collect()
    }
}

impl Can for MockBus {
    type Frame = CanFrame;
    type Error = ErrorKind;

    fn transmit(&mut self, frame: &CanFrame) -> nb::Result<Option<CanFrame>, ErrorKind> {
        if self.busy {
            return Err(nb::Error::WouldBlock);
        }
        if self.bus_off {
            return Err(nb::Error::Other(ErrorKind::Other));
        }
        self.sent.push(*frame);
        Ok(None)
    }

    fn receive(&mut self) -> nb::Result<CanFrame, ErrorKind> {
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl CanBus for MockBus {
    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), ErrorKind> {
        self.bitrate = Some(bitrate);
        Ok(())
    }

    fn init(&mut self, node_id: NodeId) -> Result<(), ErrorKind> {
        self.initialized_as = Some(node_id);
        Ok(())
    }

    fn add_filter_mask(&mut self, id: u16, mask: u16) -> Result<(), ErrorKind> {
        if self.filters_rejected {
            return Err(ErrorKind::Other);
        }
        self.filters.push((id, mask));
        Ok(())
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn wake_up(&mut self) {
        self.awake = true;
    }

    fn listen_rx_pending(&mut self) {
        self.rx_interrupt = true;
    }

    fn is_rx_pending(&self) -> bool {
        !self.rx.is_empty()
    }
}

#[derive(Default)]
pub struct MockLed {
    pub history: Vec<bool>,
}

impl StatusIndicator for MockLed {
    fn set_bus_ok(&mut self, ok: bool) {
        self.history.push(ok);
    }
}

pub fn clock(now: &Cell<u32>) -> impl Fn() -> u32 + '_ {
    move || now.get()
}

pub fn node(raw: u8) -> NodeId {
    NodeId::new(raw).unwrap()
}

pub fn frame(cob_id: u16, data: &[u8]) -> CanFrame {
    CanFrame::standard(cob_id, data).unwrap()
}
