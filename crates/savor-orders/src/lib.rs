//! # savor-orders: Order Lifecycle Engine
//!
//! This crate drives an order from creation through delivery: pricing,
//! role-scoped authorization, the multi-party status state machine, the
//! driver claim, and event fan-out to exactly the right subscriber
//! populations - never announcing a state that was not durably committed.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      OrderService Operation                             │
//! │                                                                         │
//! │  Actor {id, role}  (resolved by the auth collaborator)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Load entities (savor-db) ── absent? ──► NotFound                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Gate (savor-core policy) ── mismatch? ──► PermissionDenied            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Validate transition (savor-core state machine)                        │
//! │       │              ── off-chain? ──► InvalidTransition               │
//! │       ▼                                                                 │
//! │  Conditional persist (savor-db) ── lost race? ──► InvalidTransition /  │
//! │       │                                           AlreadyAssigned      │
//! │       ▼                                                                 │
//! │  COMMIT, then publish (events) - best-effort, never fails the op       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`service`] - The `OrderService` orchestrator
//! - [`events`] - Topics, payloads, `EventPublisher` seam
//! - [`error`] - The caller-facing `OrderError` taxonomy

pub mod error;
pub mod events;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use events::{BroadcastPublisher, EventPublisher, OrderEvent, Topic};
pub use service::OrderService;
