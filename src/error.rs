use embedded_can::ErrorKind;
use thiserror::Error;

/// Errors reported by the engine.
///
/// Nothing here is fatal: a failed operation is reported once and abandoned.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The CAN controller rejected the request (bus-off, arbitration loss, ...)
    #[error("CAN controller error: {0:?}")]
    Bus(ErrorKind),
    /// No free transmit mailbox
    #[error("transmit mailbox busy")]
    Busy,
    #[error("COB-ID 0x{0:X} is not a valid 11-bit identifier")]
    InvalidCobId(u32),
    #[error("COB-ID 0x{0:03X} is outside the PDO range 0x181..=0x57F")]
    InvalidPdoCobId(u16),
    #[error("data length should not exceed 8 bytes ({0} > 8)")]
    InvalidLength(usize),
    /// Only expedited transfers are supported
    #[error("SDO payload of {0} bytes does not fit an expedited transfer (max 4)")]
    SdoTooLong(usize),
    #[error("invalid node id {0}, must be in 1..=127")]
    InvalidNodeId(u8),
    #[error("only a master may send NMT commands")]
    NotMaster,
    #[error("all listener slots of this category are taken")]
    ListenersFull,
    #[error("listen filter is full")]
    ListenFilterFull,
    #[error("node has not been started")]
    NotStarted,
}

impl<E: embedded_can::Error> From<nb::Error<E>> for Error {
    fn from(err: nb::Error<E>) -> Self {
        match err {
            nb::Error::WouldBlock => Error::Busy,
            nb::Error::Other(err) => Error::Bus(err.kind()),
        }
    }
}
