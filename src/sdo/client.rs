use core::array::TryFromSliceError;

use super::*;

impl SdoFrame {
    /// Upload request for `index`/`sub_index` on `node_id`.
    pub fn read(node_id: NodeId, index: u16, sub_index: u8) -> Self {
        SdoFrame::new(node_id, SdoCommand::Read, index, sub_index, SdoData::EMPTY)
    }

    /// Expedited download request writing `value` to `index`/`sub_index` on `node_id`.
    pub fn write<T: SdoValue>(
        node_id: NodeId,
        index: u16,
        sub_index: u8,
        value: T,
    ) -> Result<Self, Error> {
        Ok(SdoFrame::new(
            node_id,
            SdoCommand::Write,
            index,
            sub_index,
            SdoData::from_value(value)?,
        ))
    }

    /// Expedited download request with raw payload bytes.
    ///
    /// `data` needs 1 to 4 bytes. An empty download has no expedited encoding,
    /// a bare `0x20` command byte reads as a 4-byte write.
    pub fn write_bytes(
        node_id: NodeId,
        index: u16,
        sub_index: u8,
        data: &[u8],
    ) -> Result<Self, Error> {
        if data.is_empty() {
            return Err(Error::InvalidLength(0));
        }
        Ok(SdoFrame::new(
            node_id,
            SdoCommand::Write,
            index,
            sub_index,
            SdoData::new(data)?,
        ))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseError;

impl From<TryFromSliceError> for ParseError {
    fn from(_: TryFromSliceError) -> Self {
        ParseError
    }
}

/// Conversion trait for values that fit an expedited transfer
///
/// Values whose `Bytes` are longer than four bytes are rejected with
/// [`Error::SdoTooLong`] when a frame is built from them.
pub trait SdoValue: Sized {
    /// `Self` as bytes
    type Bytes: AsRef<[u8]>;
    /// Convert from little endian bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError>;
    /// Convert to little endian bytes
    fn to_bytes(self) -> Self::Bytes;
}

macro_rules! sdo_value {
    ($typ:ty) => {
        impl SdoValue for $typ {
            type Bytes = [u8; core::mem::size_of::<$typ>()];
            fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
                let bytes: Self::Bytes = bytes.try_into()?;
                Ok(Self::from_le_bytes(bytes))
            }

            fn to_bytes(self) -> Self::Bytes {
                self.to_le_bytes()
            }
        }
    };
}

sdo_value!(u8);
sdo_value!(u16);
sdo_value!(u32);
sdo_value!(i8);
sdo_value!(i16);
sdo_value!(i32);
sdo_value!(f32);

impl SdoValue for bool {
    type Bytes = [u8; 1];
    fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let bytes: [u8; 1] = bytes.try_into()?;
        match bytes[0] {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(ParseError),
        }
    }

    fn to_bytes(self) -> Self::Bytes {
        [self as u8]
    }
}
