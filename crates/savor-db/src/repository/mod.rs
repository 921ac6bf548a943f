//! # Repository Module
//!
//! Database repository implementations for the Savor order engine.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  OrderService operation                                                │
//! │       │                                                                 │
//! │       │  db.orders().assign_driver_if_unset(&id, &driver_id)           │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── create_atomically(&self, order, items)                            │
//! │  ├── find_by_id(&self, id)                                             │
//! │  ├── update_status_if_current(&self, id, expected, new)                │
//! │  └── assign_driver_if_unset(&self, id, driver_id)                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Lookups return Option - "absent" is not an error                    │
//! │  • Conditional updates surface lost races as plain bool                │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`order::OrderRepository`] - Order lifecycle rows and items
//! - [`dish::DishRepository`] - Dish reads (reference data for pricing)
//! - [`restaurant::RestaurantRepository`] - Restaurant reads

pub mod dish;
pub mod order;
pub mod restaurant;
