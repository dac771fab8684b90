//! Expedited SDO transfers.
//!
//! Only single-frame transfers carrying up to 4 bytes are supported. A
//! request and its response share the same 8-byte layout:
//!
//! ```text
//! byte 0     command | expedited | size specified | (4 - len) << 2
//! byte 1..3  index (little endian)
//! byte 3     sub-index
//! byte 4..8  payload, zero padded
//! ```

pub mod client;
pub mod server;

pub use client::SdoValue;

use crate::node::NodeId;
use crate::Error;

const COMMAND_MASK: u8 = 0xF0;
const EXPEDITED: u8 = 0x2;
const SIZE_SPECIFIED: u8 = 0x1;
const SIZE_BITS: u8 = 0xC;

/// Maximum payload of an expedited transfer
pub const MAX_EXPEDITED_SIZE: usize = 4;

/// High nibble of the SDO command byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SdoCommand {
    /// Download (write) request
    Write,
    /// Upload (read) request, or its reply
    Read,
    /// Download acknowledgement
    WriteAck,
    /// Any other command specifier, kept as its masked value
    Other(u8),
}

impl SdoCommand {
    pub const fn as_u8(self) -> u8 {
        match self {
            SdoCommand::Write => 0x20,
            SdoCommand::Read => 0x40,
            SdoCommand::WriteAck => 0x60,
            SdoCommand::Other(code) => code & COMMAND_MASK,
        }
    }
}

impl From<u8> for SdoCommand {
    fn from(command_byte: u8) -> Self {
        match command_byte & COMMAND_MASK {
            0x20 => SdoCommand::Write,
            0x40 => SdoCommand::Read,
            0x60 => SdoCommand::WriteAck,
            other => SdoCommand::Other(other),
        }
    }
}

/// Up to four payload bytes of an expedited transfer.
///
/// The `to_*` views reinterpret the (zero padded) little-endian bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SdoData {
    bytes: [u8; MAX_EXPEDITED_SIZE],
    len: u8,
}

impl SdoData {
    pub const EMPTY: SdoData = SdoData {
        bytes: [0; MAX_EXPEDITED_SIZE],
        len: 0,
    };

    pub fn new(data: &[u8]) -> Result<Self, Error> {
        if data.len() > MAX_EXPEDITED_SIZE {
            return Err(Error::SdoTooLong(data.len()));
        }
        let mut bytes = [0; MAX_EXPEDITED_SIZE];
        bytes[..data.len()].copy_from_slice(data);
        Ok(SdoData {
            bytes,
            len: data.len() as u8,
        })
    }

    /// Payload holding `value`, `SdoTooLong` if it encodes to more than four bytes.
    pub fn from_value<T: SdoValue>(value: T) -> Result<Self, Error> {
        SdoData::new(value.to_bytes().as_ref())
    }

    /// Converts the payload into `T`, `None` if the length doesn't match.
    pub fn value<T: SdoValue>(&self) -> Option<T> {
        T::from_bytes(self.as_bytes()).ok()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_u8(&self) -> u8 {
        self.bytes[0]
    }

    pub fn to_i8(&self) -> i8 {
        self.bytes[0] as i8
    }

    pub fn to_u16(&self) -> u16 {
        u16::from_le_bytes([self.bytes[0], self.bytes[1]])
    }

    pub fn to_i16(&self) -> i16 {
        i16::from_le_bytes([self.bytes[0], self.bytes[1]])
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_le_bytes(self.bytes)
    }

    pub fn to_i32(&self) -> i32 {
        i32::from_le_bytes(self.bytes)
    }

    pub fn to_f32(&self) -> f32 {
        f32::from_le_bytes(self.bytes)
    }

    /// The bytes as four flags
    pub fn to_bools(&self) -> [bool; MAX_EXPEDITED_SIZE] {
        self.bytes.map(|byte| byte != 0)
    }
}

/// One expedited SDO request or reply.
///
/// `node_id` is the server a request is sent to. Decoded frames carry the
/// receiving node's own address.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SdoFrame {
    pub node_id: NodeId,
    pub command: SdoCommand,
    pub index: u16,
    pub sub_index: u8,
    pub data: SdoData,
}

impl SdoFrame {
    pub fn new(
        node_id: NodeId,
        command: SdoCommand,
        index: u16,
        sub_index: u8,
        data: SdoData,
    ) -> Self {
        SdoFrame {
            node_id,
            command,
            index,
            sub_index,
            data,
        }
    }

    /// Encodes the 8 data bytes of the frame.
    pub fn encode(&self) -> [u8; 8] {
        let len = self.data.len();
        let mut frame = [0; 8];
        frame[0] = self.command.as_u8();
        if len > 0 {
            frame[0] |= EXPEDITED | SIZE_SPECIFIED | ((MAX_EXPEDITED_SIZE - len) << 2) as u8;
        }
        frame[1..3].copy_from_slice(&self.index.to_le_bytes());
        frame[3] = self.sub_index;
        frame[4..4 + len].copy_from_slice(self.data.as_bytes());
        frame
    }

    /// Decodes the data bytes of a received SDO frame.
    ///
    /// Plain read requests (`0x40`) and write acknowledgements (`0x60`) carry no
    /// payload; for every other command byte the size bits give the length.
    pub fn decode(node_id: NodeId, data: &[u8; 8]) -> Self {
        let command_byte = data[0];
        let len = match command_byte {
            0x40 | 0x60 => 0,
            _ => MAX_EXPEDITED_SIZE - ((command_byte & SIZE_BITS) >> 2) as usize,
        };
        let mut bytes = [0; MAX_EXPEDITED_SIZE];
        bytes[..len].copy_from_slice(&data[4..4 + len]);
        SdoFrame {
            node_id,
            command: SdoCommand::from(command_byte),
            index: u16::from_le_bytes([data[1], data[2]]),
            sub_index: data[3],
            data: SdoData {
                bytes,
                len: len as u8,
            },
        }
    }
}
