use log::{debug, info, trace, warn};

use crate::config::{Config, Role};
use crate::frames::{self, CanFrame};
use crate::hal::{CanBus, Clock, StatusIndicator};
use crate::heartbeat::HeartbeatProducer;
use crate::listener::{
    HeartbeatListener, Listeners, PdoListener, SdoReplyListener, SdoRequestListener,
    StateListener,
};
use crate::nmt::{Nmt, NmtCommand, NmtState};
use crate::node::dispatch::{self, Route};
use crate::node::{ListenFilter, NodeId};
use crate::sdo::{SdoFrame, SdoValue};
use crate::Error;

/// Mask matching the node-id bits of a COB-ID
const NODE_ID_MASK: u16 = 0x7F;

/// A CANopen node on one bus.
///
/// Owns the CAN controller and the clock. Inbound frames enter through
/// [`on_rx_pending`](CanOpenNode::on_rx_pending) (receive interrupt),
/// [`poll`](CanOpenNode::poll) (main loop) or
/// [`process_frame`](CanOpenNode::process_frame).
///
/// Listeners only get borrowed data, never the node, so they can't feed
/// frames back into it while a frame is being dispatched.
pub struct CanOpenNode<'a, B: CanBus, C: Clock> {
    bus: B,
    clock: C,
    config: Config,
    nmt: Nmt,
    listen_filter: ListenFilter,
    listeners: Listeners<'a>,
    heartbeat: HeartbeatProducer,
    indicator: Option<&'a mut dyn StatusIndicator>,
    started: bool,
}

impl<'a, B: CanBus, C: Clock> CanOpenNode<'a, B, C> {
    pub fn new(bus: B, clock: C, config: Config) -> Self {
        CanOpenNode {
            bus,
            clock,
            nmt: Nmt::new(config.role),
            heartbeat: HeartbeatProducer::new(config.heartbeat_interval_ms),
            config,
            listen_filter: ListenFilter::new(),
            listeners: Listeners::default(),
            indicator: None,
            started: false,
        }
    }

    /// Configures and enables the controller.
    ///
    /// A master accepts every frame, a slave only frames for its own address
    /// and broadcasts, plus the nodes it listens to. A slave announces itself
    /// with a boot-up heartbeat.
    ///
    /// Does nothing once the node is started.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.started {
            return Ok(());
        }
        let node_id = self.config.node_id;
        self.bus
            .set_bitrate(self.config.bitrate)
            .map_err(bus_error)?;
        self.bus.init(node_id).map_err(bus_error)?;

        match self.config.role {
            Role::Master => self.add_filter_mask(0, 0)?,
            Role::Slave => {
                self.add_filter_mask(node_id.raw() as u16, NODE_ID_MASK)?;
                self.add_filter_mask(0, NODE_ID_MASK)?;
            }
        }
        let listened = self.listen_filter.clone();
        for node in listened.iter() {
            self.add_filter_mask(node.raw() as u16, NODE_ID_MASK)?;
        }

        self.bus.enable();
        self.bus.wake_up();
        self.bus.listen_rx_pending();
        self.started = true;
        self.heartbeat.mark_sent(self.clock.now_ms());

        info!(
            "CANopen {:?} {} started at {} kbit/s",
            self.config.role,
            node_id,
            self.config.bitrate.kbps()
        );

        if self.config.role == Role::Slave {
            // failures are already reported by send_heartbeat
            let _ = self.send_heartbeat();
        }
        Ok(())
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[inline]
    pub fn node_id(&self) -> NodeId {
        self.config.node_id
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.config.role
    }

    #[inline]
    pub fn nmt_state(&self) -> NmtState {
        self.nmt.state()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn listen_filter(&self) -> &ListenFilter {
        &self.listen_filter
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn set_heartbeat_interval(&mut self, interval_ms: u32) {
        self.config.heartbeat_interval_ms = interval_ms;
        self.heartbeat.set_interval(interval_ms);
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    pub fn set_status_indicator(&mut self, indicator: &'a mut dyn StatusIndicator) {
        self.indicator = Some(indicator);
    }

    pub fn add_state_listener(&mut self, listener: &'a mut dyn StateListener) -> Result<(), Error> {
        self.listeners.state.register(listener)
    }

    pub fn add_pdo_listener(&mut self, listener: &'a mut dyn PdoListener) -> Result<(), Error> {
        self.listeners.pdo.register(listener)
    }

    pub fn add_sdo_request_listener(
        &mut self,
        listener: &'a mut dyn SdoRequestListener,
    ) -> Result<(), Error> {
        self.listeners.sdo_request.register(listener)
    }

    pub fn add_sdo_reply_listener(
        &mut self,
        listener: &'a mut dyn SdoReplyListener,
    ) -> Result<(), Error> {
        self.listeners.sdo_reply.register(listener)
    }

    pub fn add_heartbeat_listener(
        &mut self,
        listener: &'a mut dyn HeartbeatListener,
    ) -> Result<(), Error> {
        self.listeners.heartbeat.register(listener)
    }

    /// Surfaces heartbeats and SDO replies of `node_id` to the listeners.
    ///
    /// Once started, an acceptance filter for the node is added as well. The
    /// node only joins the listen filter if that filter could be programmed.
    pub fn listen_to(&mut self, node_id: NodeId) -> Result<(), Error> {
        if self.listen_filter.contains(node_id) {
            return Ok(());
        }
        if self.listen_filter.is_full() {
            return Err(Error::ListenFilterFull);
        }
        if self.started {
            self.add_filter_mask(node_id.raw() as u16, NODE_ID_MASK)?;
        }
        self.listen_filter.add(node_id)?;
        Ok(())
    }

    /// Sends an NMT command to `target`, `None` addresses all nodes.
    ///
    /// Only a master may do this.
    pub fn send_nmt(&mut self, command: NmtCommand, target: Option<NodeId>) -> Result<(), Error> {
        if self.config.role != Role::Master {
            return Err(Error::NotMaster);
        }
        self.transmit(&frames::nmt_frame(command, target))
    }

    pub fn start_node(&mut self, target: Option<NodeId>) -> Result<(), Error> {
        self.send_nmt(NmtCommand::Start, target)
    }

    pub fn stop_node(&mut self, target: Option<NodeId>) -> Result<(), Error> {
        self.send_nmt(NmtCommand::Stop, target)
    }

    pub fn enter_pre_operational(&mut self, target: Option<NodeId>) -> Result<(), Error> {
        self.send_nmt(NmtCommand::EnterPreOperational, target)
    }

    pub fn reset_node(&mut self, target: Option<NodeId>) -> Result<(), Error> {
        self.send_nmt(NmtCommand::Reset, target)
    }

    /// Sends a PDO after checking its COB-ID and length.
    pub fn send_pdo(&mut self, cob_id: u16, data: &[u8]) -> Result<(), Error> {
        let frame = frames::pdo_frame(cob_id, data)?;
        self.transmit(&frame)
    }

    /// Sends `request` to the server `request.node_id`.
    pub fn send_sdo_request(&mut self, request: &SdoFrame) -> Result<(), Error> {
        self.transmit(&frames::sdo_request_frame(request))
    }

    /// Sends `response` on this node's SDO response COB-ID.
    pub fn send_sdo_response(&mut self, response: &SdoFrame) -> Result<(), Error> {
        self.transmit(&frames::sdo_response_frame(self.config.node_id, response))
    }

    pub fn sdo_read(&mut self, target: NodeId, index: u16, sub_index: u8) -> Result<(), Error> {
        self.send_sdo_request(&SdoFrame::read(target, index, sub_index))
    }

    pub fn sdo_write<T: SdoValue>(
        &mut self,
        target: NodeId,
        index: u16,
        sub_index: u8,
        value: T,
    ) -> Result<(), Error> {
        let request = SdoFrame::write(target, index, sub_index, value)?;
        self.send_sdo_request(&request)
    }

    /// Sends a heartbeat with the current state and restarts the interval.
    ///
    /// The status indicator, if any, shows the outcome.
    pub fn send_heartbeat(&mut self) -> Result<(), Error> {
        let frame = frames::heartbeat_frame(self.config.node_id, self.nmt.state());
        let result = self.transmit(&frame);
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.set_bus_ok(result.is_ok());
        }
        self.heartbeat.mark_sent(self.clock.now_ms());
        result
    }

    /// Receives and dispatches one pending frame.
    ///
    /// Meant to be called from the receive interrupt.
    pub fn on_rx_pending(&mut self) {
        match self.bus.receive() {
            Ok(frame) => {
                self.process_frame(&CanFrame::from_frame(&frame));
            }
            Err(nb::Error::WouldBlock) => {}
            Err(err) => warn!("CAN receive failed: {}", Error::from(err)),
        }
    }

    /// Routes `frame` to every matching handler.
    ///
    /// Returns `false` if the frame was not for this node; that is ordinary
    /// bus traffic, not an error.
    pub fn process_frame(&mut self, frame: &CanFrame) -> bool {
        let Some(cob_id) = frame.cob_id() else {
            self.trace_unparsed(frame);
            return false;
        };
        let routes = dispatch::routes(
            cob_id,
            self.config.node_id,
            self.config.role,
            &self.listen_filter,
        );

        for route in &routes {
            match route {
                Route::Nmt => self.on_nmt(frame),
                Route::Pdo => self.listeners.pdo_received(frame),
                Route::Heartbeat => self.listeners.heartbeat_received(frame),
                Route::SdoRequest => {
                    let request = SdoFrame::decode(self.config.node_id, frame.raw_data());
                    self.listeners.sdo_request_received(&request);
                }
                Route::SdoReply => {
                    let reply = SdoFrame::decode(self.config.node_id, frame.raw_data());
                    self.listeners.sdo_reply_received(&reply);
                }
            }
        }

        if routes.is_empty() {
            self.trace_unparsed(frame);
            return false;
        }
        true
    }

    /// Main loop entry.
    ///
    /// Drains a pending frame the interrupt may have missed, finishes a boot
    /// sequence and sends the heartbeat when it is due.
    pub fn poll(&mut self) {
        if !self.started {
            return;
        }
        if self.bus.is_rx_pending() {
            self.on_rx_pending();
        }

        if self.nmt.state() == NmtState::Reset {
            self.advance_boot();
            let _ = self.send_heartbeat();
        }

        if self.heartbeat.is_due(self.clock.now_ms()) {
            let _ = self.send_heartbeat();
        }

        if self.nmt.state() == NmtState::BootUp {
            self.advance_boot();
        }
    }

    fn on_nmt(&mut self, frame: &CanFrame) {
        use embedded_can::Frame;

        if let Some(state) = self.nmt.on_request(self.config.node_id, frame.data()) {
            trace!("NMT: {} entered {:?}", self.config.node_id, state);
            self.listeners.state_changed(state);
        }
    }

    fn advance_boot(&mut self) {
        if let Some(state) = self.nmt.advance_boot() {
            trace!("NMT: {} entered {:?}", self.config.node_id, state);
            self.listeners.state_changed(state);
        }
    }

    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Error> {
        if !self.started {
            return Err(Error::NotStarted);
        }
        let Some(bus_frame) = frame.to_frame::<B::Frame>() else {
            return Err(Error::InvalidCobId(frame.raw_id()));
        };
        match self.bus.transmit(&bus_frame) {
            Ok(_) => Ok(()),
            Err(err) => {
                let err = Error::from(err);
                warn!("CAN transmit of {} failed: {}", frame, err);
                Err(err)
            }
        }
    }

    fn add_filter_mask(&mut self, id: u16, mask: u16) -> Result<(), Error> {
        self.bus.add_filter_mask(id, mask).map_err(|err| {
            let err = bus_error(err);
            warn!("CAN filter setup for 0x{:03X}/0x{:03X} failed: {}", id, mask, err);
            err
        })
    }

    fn trace_unparsed(&self, frame: &CanFrame) {
        if self.config.debug {
            debug!("The following message could not be parsed: {}", frame);
        }
    }
}

fn bus_error<E: embedded_can::Error>(err: E) -> Error {
    Error::Bus(err.kind())
}
