//! Classification of inbound frames by COB-ID.
//!
//! Every predicate is evaluated on its own, a frame is routed to all handlers
//! whose address range matches. With the CiA 301 ranges used here at most one
//! of them fires, but nothing relies on that.

use heapless::Vec;

use crate::config::Role;
use crate::frames::{HEARTBEAT_BASE, NMT_ID, PDO_BASE, SDO_REQUEST_BASE, SDO_RESPONSE_BASE};
use crate::node::{ListenFilter, NodeId};

/// Handler an inbound frame is routed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Route {
    Nmt,
    Pdo,
    Heartbeat,
    /// SDO request addressed to this node
    SdoRequest,
    /// SDO reply addressed to this node or from a node it listens to
    SdoReply,
}

pub type Routes = Vec<Route, 5>;

/// Returns the handlers `cob_id` is routed to, in evaluation order.
///
/// An empty result means the frame is not for this node.
pub fn routes(cob_id: u16, node_id: NodeId, role: Role, filter: &ListenFilter) -> Routes {
    let mut routes = Routes::new();
    let mut route = |r| {
        // five distinct routes fit by construction
        let _ = routes.push(r);
    };
    let own = node_id.raw() as u16;
    let is_master = role == Role::Master;
    let in_sdo_reply_range = (SDO_RESPONSE_BASE..SDO_REQUEST_BASE).contains(&cob_id);

    if cob_id == NMT_ID {
        route(Route::Nmt);
    }
    if (PDO_BASE..SDO_RESPONSE_BASE).contains(&cob_id) {
        route(Route::Pdo);
    }
    if cob_id > HEARTBEAT_BASE && (is_master || filter.matches(cob_id - HEARTBEAT_BASE)) {
        route(Route::Heartbeat);
    }
    if cob_id == SDO_REQUEST_BASE + own {
        route(Route::SdoRequest);
    }
    if !is_master
        && in_sdo_reply_range
        && (cob_id == SDO_RESPONSE_BASE + own || filter.matches(cob_id - SDO_RESPONSE_BASE))
    {
        route(Route::SdoReply);
    }
    if is_master && in_sdo_reply_range {
        route(Route::SdoReply);
    }
    routes
}
