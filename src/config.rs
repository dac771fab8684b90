use crate::node::NodeId;

/// Whether the engine governs the network or is governed by it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Role {
    Master,
    #[default]
    Slave,
}

/// CiA 301 standard bit rates
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Bitrate {
    Kbps1000,
    Kbps800,
    Kbps500,
    #[default]
    Kbps250,
    Kbps125,
    Kbps100,
    Kbps50,
    Kbps20,
    Kbps10,
}

impl Bitrate {
    pub const fn kbps(self) -> u16 {
        match self {
            Bitrate::Kbps1000 => 1000,
            Bitrate::Kbps800 => 800,
            Bitrate::Kbps500 => 500,
            Bitrate::Kbps250 => 250,
            Bitrate::Kbps125 => 125,
            Bitrate::Kbps100 => 100,
            Bitrate::Kbps50 => 50,
            Bitrate::Kbps20 => 20,
            Bitrate::Kbps10 => 10,
        }
    }
}

/// Start-up configuration of a [`CanOpenNode`](crate::CanOpenNode).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub node_id: NodeId,
    pub role: Role,
    pub bitrate: Bitrate,
    /// Heartbeat producer period in milliseconds, `0` disables the producer.
    pub heartbeat_interval_ms: u32,
    /// Trace unparsed frames through `log`
    pub debug: bool,
}

impl Config {
    pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u32 = 1000;

    pub fn master(node_id: NodeId) -> Self {
        Config {
            node_id,
            role: Role::Master,
            ..Config::default()
        }
    }

    pub fn slave(node_id: NodeId) -> Self {
        Config {
            node_id,
            role: Role::Slave,
            ..Config::default()
        }
    }

    pub fn with_bitrate(mut self, bitrate: Bitrate) -> Self {
        self.bitrate = bitrate;
        self
    }

    pub fn with_heartbeat_interval(mut self, interval_ms: u32) -> Self {
        self.heartbeat_interval_ms = interval_ms;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[inline]
    pub fn is_master(&self) -> bool {
        self.role == Role::Master
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            node_id: NodeId::DEFAULT,
            role: Role::Slave,
            bitrate: Bitrate::Kbps250,
            heartbeat_interval_ms: Config::DEFAULT_HEARTBEAT_INTERVAL_MS,
            debug: false,
        }
    }
}
