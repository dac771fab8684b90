//! Listener registry.
//!
//! Protocol events are pushed to application listeners synchronously, in
//! registration order, on the context that dispatched the frame. Each
//! category has a fixed number of slots; registering past that is an error.
//!
//! Every listener trait is implemented for matching `FnMut` closures.

use heapless::Vec;

use crate::frames::CanFrame;
use crate::nmt::NmtState;
use crate::sdo::SdoFrame;
use crate::Error;

/// Slots per event category
pub const MAX_LISTENERS: usize = 6;

pub trait StateListener {
    fn on_state_change(&mut self, state: NmtState);
}

pub trait PdoListener {
    fn on_pdo(&mut self, frame: &CanFrame);
}

pub trait SdoRequestListener {
    fn on_sdo_request(&mut self, request: &SdoFrame);
}

pub trait SdoReplyListener {
    fn on_sdo_reply(&mut self, reply: &SdoFrame);
}

pub trait HeartbeatListener {
    fn on_heartbeat(&mut self, frame: &CanFrame);
}

impl<F: FnMut(NmtState)> StateListener for F {
    fn on_state_change(&mut self, state: NmtState) {
        self(state)
    }
}

impl<F: FnMut(&CanFrame)> PdoListener for F {
    fn on_pdo(&mut self, frame: &CanFrame) {
        self(frame)
    }
}

impl<F: FnMut(&SdoFrame)> SdoRequestListener for F {
    fn on_sdo_request(&mut self, request: &SdoFrame) {
        self(request)
    }
}

impl<F: FnMut(&SdoFrame)> SdoReplyListener for F {
    fn on_sdo_reply(&mut self, reply: &SdoFrame) {
        self(reply)
    }
}

impl<F: FnMut(&CanFrame)> HeartbeatListener for F {
    fn on_heartbeat(&mut self, frame: &CanFrame) {
        self(frame)
    }
}

/// Ordered, append-only listener slots of one category.
pub struct Slots<'a, L: ?Sized> {
    listeners: Vec<&'a mut L, MAX_LISTENERS>,
}

impl<'a, L: ?Sized> Slots<'a, L> {
    pub const fn new() -> Self {
        Slots {
            listeners: Vec::new(),
        }
    }

    pub fn register(&mut self, listener: &'a mut L) -> Result<(), Error> {
        self.listeners
            .push(listener)
            .map_err(|_| Error::ListenersFull)
    }

    /// Calls `f` on every listener in slot order.
    pub fn notify(&mut self, mut f: impl FnMut(&mut L)) {
        for listener in self.listeners.iter_mut() {
            f(&mut **listener);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<L: ?Sized> Default for Slots<'_, L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener slots for every event category of a node.
#[derive(Default)]
pub struct Listeners<'a> {
    pub state: Slots<'a, dyn StateListener + 'a>,
    pub pdo: Slots<'a, dyn PdoListener + 'a>,
    pub sdo_request: Slots<'a, dyn SdoRequestListener + 'a>,
    pub sdo_reply: Slots<'a, dyn SdoReplyListener + 'a>,
    pub heartbeat: Slots<'a, dyn HeartbeatListener + 'a>,
}

impl<'a> Listeners<'a> {
    pub fn state_changed(&mut self, state: NmtState) {
        self.state.notify(|l| l.on_state_change(state));
    }

    pub fn pdo_received(&mut self, frame: &CanFrame) {
        self.pdo.notify(|l| l.on_pdo(frame));
    }

    pub fn sdo_request_received(&mut self, request: &SdoFrame) {
        self.sdo_request.notify(|l| l.on_sdo_request(request));
    }

    pub fn sdo_reply_received(&mut self, reply: &SdoFrame) {
        self.sdo_reply.notify(|l| l.on_sdo_reply(reply));
    }

    pub fn heartbeat_received(&mut self, frame: &CanFrame) {
        self.heartbeat.notify(|l| l.on_heartbeat(frame));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    struct Recorder<'r> {
        id: u8,
        log: &'r RefCell<std::vec::Vec<(u8, NmtState)>>,
    }

    impl StateListener for Recorder<'_> {
        fn on_state_change(&mut self, state: NmtState) {
            self.log.borrow_mut().push((self.id, state));
        }
    }

    #[test]
    fn notifies_in_registration_order() {
        let log = RefCell::new(std::vec::Vec::new());
        let mut first = Recorder { id: 1, log: &log };
        let mut second = Recorder { id: 2, log: &log };
        let mut listeners = Listeners::default();
        listeners.state.register(&mut first).unwrap();
        listeners.state.register(&mut second).unwrap();

        listeners.state_changed(NmtState::Stopped);
        assert_eq!(
            *log.borrow(),
            [(1, NmtState::Stopped), (2, NmtState::Stopped)]
        );
    }

    #[test]
    fn overflow_is_an_error() {
        let calls = RefCell::new(0);
        let count = &calls;
        let mut closures: [_; MAX_LISTENERS + 1] =
            core::array::from_fn(|_| move |_: &CanFrame| *count.borrow_mut() += 1);
        let mut slots: Slots<'_, dyn PdoListener + '_> = Slots::new();
        let (last, rest) = closures.split_last_mut().unwrap();
        for closure in rest {
            slots.register(closure).unwrap();
        }
        assert_eq!(slots.register(last), Err(Error::ListenersFull));
        assert_eq!(slots.len(), MAX_LISTENERS);

        let frame = CanFrame::standard(0x181, &[1]).unwrap();
        slots.notify(|l| l.on_pdo(&frame));
        assert_eq!(*calls.borrow(), MAX_LISTENERS);
    }

    #[test]
    fn empty_registry_is_silent() {
        let mut listeners = Listeners::default();
        assert!(listeners.heartbeat.is_empty());
        listeners.heartbeat_received(&CanFrame::standard(0x701, &[0x05]).unwrap());
    }
}
