//! Heartbeat producer timing and consumer decoding.

use crate::frames::{CanFrame, HEARTBEAT_BASE};
use crate::nmt::NmtState;
use crate::node::NodeId;

/// Decides when the next heartbeat is due.
///
/// Times are milliseconds of a wrapping `u32` clock.
#[derive(Debug, Copy, Clone)]
pub struct HeartbeatProducer {
    interval_ms: u32,
    last_sent: u32,
}

impl HeartbeatProducer {
    pub const fn new(interval_ms: u32) -> Self {
        HeartbeatProducer {
            interval_ms,
            last_sent: 0,
        }
    }

    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// An interval of 0 disables the producer.
    pub fn is_due(&self, now: u32) -> bool {
        self.interval_ms != 0 && now.wrapping_sub(self.last_sent) >= self.interval_ms
    }

    /// Restarts the interval at `now`.
    pub fn mark_sent(&mut self, now: u32) {
        self.last_sent = now;
    }
}

/// A decoded heartbeat message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Heartbeat {
    pub node_id: NodeId,
    pub state: NmtState,
}

impl Heartbeat {
    /// Decodes a heartbeat frame, `None` if it isn't one.
    pub fn parse(frame: &CanFrame) -> Option<Self> {
        let cob_id = frame.cob_id()?;
        let node_id = NodeId::new(cob_id.checked_sub(HEARTBEAT_BASE)?.try_into().ok()?)?;
        let code = *embedded_can::Frame::data(frame).first()?;
        Some(Heartbeat {
            node_id,
            state: NmtState::from_heartbeat_code(code)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn producer_interval() {
        let mut producer = HeartbeatProducer::new(1000);
        producer.mark_sent(500);
        assert!(!producer.is_due(1499));
        assert!(producer.is_due(1500));
        producer.mark_sent(1500);
        assert!(!producer.is_due(1501));
    }

    #[test]
    fn producer_survives_clock_wrap() {
        let mut producer = HeartbeatProducer::new(100);
        producer.mark_sent(u32::MAX - 10);
        assert!(!producer.is_due(50));
        assert!(producer.is_due(89));
    }

    #[test]
    fn zero_interval_disables() {
        let producer = HeartbeatProducer::new(0);
        assert!(!producer.is_due(u32::MAX));
    }

    #[test]
    fn parse() {
        let frame = CanFrame::standard(0x70A, &[0x85]).unwrap();
        assert_eq!(
            Heartbeat::parse(&frame),
            Some(Heartbeat {
                node_id: NodeId::new(0x0A).unwrap(),
                state: NmtState::Operational,
            })
        );
        assert_eq!(Heartbeat::parse(&CanFrame::standard(0x70A, &[]).unwrap()), None);
        assert_eq!(Heartbeat::parse(&CanFrame::standard(0x700, &[0]).unwrap()), None);
        assert_eq!(Heartbeat::parse(&CanFrame::standard(0x7E5, &[0]).unwrap()), None);
        assert_eq!(Heartbeat::parse(&CanFrame::standard(0x60A, &[0]).unwrap()), None);
    }
}
