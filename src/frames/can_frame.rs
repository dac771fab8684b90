use core::fmt;

use embedded_can::{Frame, Id, StandardId};

use crate::Error;

/// A raw CAN frame as exchanged with the transport and handed to listeners.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CanFrame {
    id: Id,
    dlc: u8,
    data: [u8; 8],
    is_remote: bool,
}

impl CanFrame {
    /// Builds a standard (11-bit) data frame.
    pub fn standard(cob_id: u16, data: &[u8]) -> Result<Self, Error> {
        let id = StandardId::new(cob_id).ok_or(Error::InvalidCobId(cob_id as u32))?;
        if data.len() > 8 {
            return Err(Error::InvalidLength(data.len()));
        }
        let mut frame_data = [0; 8];
        frame_data[..data.len()].copy_from_slice(data);
        Ok(CanFrame {
            id: Id::Standard(id),
            dlc: data.len() as u8,
            data: frame_data,
            is_remote: false,
        })
    }

    /// Frame from a known-good identifier, `data` beyond 8 bytes is dropped.
    pub(crate) fn from_standard(id: StandardId, data: &[u8]) -> Self {
        let len = data.len().min(8);
        let mut frame_data = [0; 8];
        frame_data[..len].copy_from_slice(&data[..len]);
        CanFrame {
            id: Id::Standard(id),
            dlc: len as u8,
            data: frame_data,
            is_remote: false,
        }
    }

    /// Copies any `embedded_can` frame into a `CanFrame`.
    pub fn from_frame<F: Frame>(frame: &F) -> Self {
        let data = frame.data();
        let len = data.len().min(8);
        let mut frame_data = [0; 8];
        frame_data[..len].copy_from_slice(&data[..len]);
        CanFrame {
            id: frame.id(),
            dlc: frame.dlc().min(8) as u8,
            data: frame_data,
            is_remote: frame.is_remote_frame(),
        }
    }

    /// Converts into the transport's frame type.
    pub fn to_frame<F: Frame>(&self) -> Option<F> {
        if self.is_remote {
            F::new_remote(self.id, self.dlc as usize)
        } else {
            F::new(self.id, self.data())
        }
    }

    /// The 11-bit identifier, `None` for extended frames.
    pub fn cob_id(&self) -> Option<u16> {
        match self.id {
            Id::Standard(id) => Some(id.as_raw()),
            Id::Extended(_) => None,
        }
    }

    /// The identifier as a number, standard or extended.
    pub fn raw_id(&self) -> u32 {
        match self.id {
            Id::Standard(id) => id.as_raw() as u32,
            Id::Extended(id) => id.as_raw(),
        }
    }

    /// All eight payload bytes, zero past the data length.
    pub fn raw_data(&self) -> &[u8; 8] {
        &self.data
    }
}

impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        let mut frame_data = [0; 8];
        frame_data[..data.len()].copy_from_slice(data);
        Some(CanFrame {
            id: id.into(),
            dlc: data.len() as u8,
            data: frame_data,
            is_remote: false,
        })
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }
        Some(CanFrame {
            id: id.into(),
            dlc: dlc as u8,
            data: [0; 8],
            is_remote: true,
        })
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.is_remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc as usize
    }

    fn data(&self) -> &[u8] {
        if self.is_remote {
            &[]
        } else {
            &self.data[..self.dlc as usize]
        }
    }
}

impl fmt::Display for CanFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Id::Standard(id) => write!(f, "{:03X}", id.as_raw())?,
            Id::Extended(id) => write!(f, "{:08X}", id.as_raw())?,
        }
        write!(f, " [{}]", self.dlc)?;
        if self.is_remote {
            return write!(f, " RTR");
        }
        for byte in self.data() {
            write!(f, " {:02X}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_can::ExtendedId;

    #[test]
    fn standard_frame_rejects_bad_input() {
        assert_eq!(CanFrame::standard(0x800, &[]), Err(Error::InvalidCobId(0x800)));
        assert_eq!(CanFrame::standard(0x181, &[0; 9]), Err(Error::InvalidLength(9)));
    }

    #[test]
    fn data_is_cut_at_dlc() {
        let frame = CanFrame::standard(0x705, &[0x7F]).unwrap();
        assert_eq!(frame.cob_id(), Some(0x705));
        assert_eq!(frame.data(), &[0x7F]);
        assert_eq!(frame.raw_data(), &[0x7F, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn extended_frames_have_no_cob_id() {
        let id = ExtendedId::new(0x1234_5678).unwrap();
        let frame = CanFrame::new(id, &[1, 2]).unwrap();
        assert!(frame.is_extended());
        assert_eq!(frame.cob_id(), None);
    }

    #[test]
    fn display() {
        let frame = CanFrame::standard(0x605, &[0x40, 0x18, 0x10, 0x01]).unwrap();
        assert_eq!(format!("{}", frame), "605 [4] 40 18 10 01");
    }
}
