//! # Order Events
//!
//! Topic-based fan-out of committed order state changes.
//!
//! ## Topics & Audiences
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Event Topics                                     │
//! │                                                                         │
//! │  NewPendingOrder  ── once, after a new order commits                   │
//! │       payload: order + restaurant owner id                             │
//! │       audience: that owner's active subscriptions                      │
//! │                                                                         │
//! │  NewCookedOrder   ── when status transitions to Cooked                 │
//! │       payload: order                                                   │
//! │       audience: all subscribed drivers (broadcast)                     │
//! │                                                                         │
//! │  OrderUpdate      ── every committed status change + successful claim  │
//! │       payload: updated order                                           │
//! │       audience: the order's customer, driver (if set), owner           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Audience *filtering* (by owner id, by order id) is the real-time
//! transport's responsibility; this module only guarantees that nothing
//! is published before the corresponding commit, and that publish
//! failures never fail the triggering operation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use savor_core::Order;

/// Default buffer size for broadcast channels.
///
/// Slow subscribers that fall further behind than this lose the oldest
/// events; the transport layer is expected to resync from storage.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

// =============================================================================
// Topics & Payloads
// =============================================================================

/// The event channels used by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    NewPendingOrder,
    NewCookedOrder,
    OrderUpdate,
}

/// A committed order state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    /// A new order was persisted. Carries the owner's identity so the
    /// delivery layer can target only that owner's subscriptions.
    NewPendingOrder { order: Order, owner_id: String },
    /// An order reached Cooked; drivers may want to claim it.
    NewCookedOrder { order: Order },
    /// Any committed status change or successful claim.
    OrderUpdate { order: Order },
}

impl OrderEvent {
    /// The topic this event belongs to.
    pub fn topic(&self) -> Topic {
        match self {
            OrderEvent::NewPendingOrder { .. } => Topic::NewPendingOrder,
            OrderEvent::NewCookedOrder { .. } => Topic::NewCookedOrder,
            OrderEvent::OrderUpdate { .. } => Topic::OrderUpdate,
        }
    }

    /// The order the event is about.
    pub fn order(&self) -> &Order {
        match self {
            OrderEvent::NewPendingOrder { order, .. }
            | OrderEvent::NewCookedOrder { order }
            | OrderEvent::OrderUpdate { order } => order,
        }
    }
}

// =============================================================================
// Publisher Seam
// =============================================================================

/// Abstraction over the publish mechanism.
///
/// The orchestrator holds this as an explicit dependency rather than a
/// process-wide singleton, so tests can substitute a capturing fake and
/// assert exact topic/payload pairs.
///
/// Implementations must be best-effort: a failed publish is the
/// implementation's problem to log, never the caller's to handle.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: OrderEvent);
}

// =============================================================================
// Broadcast Publisher
// =============================================================================

/// In-process publisher backed by per-topic `tokio::sync::broadcast`
/// channels. The real-time transport subscribes to the topics it serves
/// and forwards events to its own connections.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    pending: broadcast::Sender<OrderEvent>,
    cooked: broadcast::Sender<OrderEvent>,
    updates: broadcast::Sender<OrderEvent>,
}

impl BroadcastPublisher {
    /// Creates a publisher with the given per-topic buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (pending, _) = broadcast::channel(capacity);
        let (cooked, _) = broadcast::channel(capacity);
        let (updates, _) = broadcast::channel(capacity);
        BroadcastPublisher {
            pending,
            cooked,
            updates,
        }
    }

    /// Subscribes to `NewPendingOrder` events.
    pub fn subscribe_pending(&self) -> broadcast::Receiver<OrderEvent> {
        self.pending.subscribe()
    }

    /// Subscribes to `NewCookedOrder` events.
    pub fn subscribe_cooked(&self) -> broadcast::Receiver<OrderEvent> {
        self.cooked.subscribe()
    }

    /// Subscribes to `OrderUpdate` events.
    pub fn subscribe_updates(&self) -> broadcast::Receiver<OrderEvent> {
        self.updates.subscribe()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<OrderEvent> {
        match topic {
            Topic::NewPendingOrder => &self.pending,
            Topic::NewCookedOrder => &self.cooked,
            Topic::OrderUpdate => &self.updates,
        }
    }
}

impl Default for BroadcastPublisher {
    fn default() -> Self {
        BroadcastPublisher::with_capacity(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventPublisher for BroadcastPublisher {
    fn publish(&self, event: OrderEvent) {
        let topic = event.topic();
        let order_id = event.order().id.clone();

        // send() errs only when there are no active receivers; the state
        // change is already committed, so this is not a failure.
        match self.sender(topic).send(event) {
            Ok(receivers) => {
                debug!(?topic, order_id = %order_id, receivers, "Event published");
            }
            Err(_) => {
                debug!(?topic, order_id = %order_id, "No subscribers for event");
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
