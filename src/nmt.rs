use embedded_can::StandardId;

use crate::config::Role;
use crate::node::NodeId;

/// Operational state of a node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NmtState {
    BootUp,
    PreOperational,
    Operational,
    Stopped,
    Reset,
}

impl NmtState {
    /// Value carried in the heartbeat frame.
    ///
    /// `Reset` has no code of its own; a resetting node announces itself as booting.
    pub const fn heartbeat_code(self) -> u8 {
        match self {
            NmtState::BootUp | NmtState::Reset => 0x00,
            NmtState::Stopped => 0x04,
            NmtState::Operational => 0x05,
            NmtState::PreOperational => 0x7F,
        }
    }

    /// Inverse of [`heartbeat_code`](NmtState::heartbeat_code), the toggle bit is ignored.
    pub const fn from_heartbeat_code(code: u8) -> Option<Self> {
        match code & 0x7F {
            0x00 => Some(NmtState::BootUp),
            0x04 => Some(NmtState::Stopped),
            0x05 => Some(NmtState::Operational),
            0x7F => Some(NmtState::PreOperational),
            _ => None,
        }
    }
}

/// NMT node control commands
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum NmtCommand {
    Start = 0x01,
    Stop = 0x02,
    EnterPreOperational = 0x80,
    Reset = 0x81,
}

impl NmtCommand {
    pub const fn target_state(self) -> NmtState {
        match self {
            NmtCommand::Start => NmtState::Operational,
            NmtCommand::Stop => NmtState::Stopped,
            NmtCommand::EnterPreOperational => NmtState::PreOperational,
            NmtCommand::Reset => NmtState::Reset,
        }
    }
}

impl TryFrom<u8> for NmtCommand {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x01 => Ok(NmtCommand::Start),
            0x02 => Ok(NmtCommand::Stop),
            0x80 => Ok(NmtCommand::EnterPreOperational),
            0x81 => Ok(NmtCommand::Reset),
            other => Err(other),
        }
    }
}

/// The node's NMT state machine.
///
/// Slaves boot into `BootUp` and advance to `PreOperational` once the boot
/// sequence completes; masters are not governed by anyone and start `Operational`.
pub struct Nmt {
    role: Role,
    state: NmtState,
}

impl Nmt {
    pub const NMT_REQUEST_ID: StandardId = StandardId::ZERO;

    pub fn new(role: Role) -> Self {
        Nmt {
            role,
            state: match role {
                Role::Master => NmtState::Operational,
                Role::Slave => NmtState::BootUp,
            },
        }
    }

    #[inline]
    pub fn state(&self) -> NmtState {
        self.state
    }

    /// Handles the payload of a frame on COB-ID 0.
    ///
    /// Returns the new state if the command was addressed to `node_id` (or
    /// broadcast) and recognized. Unknown commands are ignored.
    pub fn on_request(&mut self, node_id: NodeId, data: &[u8]) -> Option<NmtState> {
        let (command, target) = match data {
            [command, target, ..] => (*command, *target),
            _ => return None,
        };
        if target != node_id.raw() && target != 0 {
            return None;
        }
        let command = NmtCommand::try_from(command).ok()?;
        self.state = command.target_state();
        Some(self.state)
    }

    /// Completes a pending boot sequence.
    ///
    /// `Reset` falls back to `BootUp`, `BootUp` moves on to the role's boot
    /// target. Returns the new state if one of these transitions happened.
    pub fn advance_boot(&mut self) -> Option<NmtState> {
        let next = match self.state {
            NmtState::Reset => NmtState::BootUp,
            NmtState::BootUp => match self.role {
                Role::Master => NmtState::Operational,
                Role::Slave => NmtState::PreOperational,
            },
            _ => return None,
        };
        self.state = next;
        Some(next)
    }
}
