//! # Domain Types
//!
//! Core domain types used throughout the Savor order engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Restaurant    │   │      Dish       │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  owner_id       │◄──│  restaurant_id  │   │  customer_id    │       │
//! │  │  name           │   │  price_cents    │   │  driver_id?     │       │
//! │  └─────────────────┘   │  options[]      │   │  status, total  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   DishOption    │   │   OrderStatus   │   │      Role       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  Pending        │   │  Customer       │       │
//! │  │  extra? (flat)  │   │  Cooking        │   │  RestaurantOwner│       │
//! │  │  choices[]?     │   │  Cooked         │   │  DeliveryDriver │       │
//! │  └─────────────────┘   │  PickedUp       │   └─────────────────┘       │
//! │                        │  Delivered      │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Notes
//! - Dish/DishOption/DishChoice are shared read-only reference data
//! - Each OrderItem belongs to exactly one Order
//! - `Order.driver_id` is set at most once, by a successful claim

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Role & Actor
// =============================================================================

/// The role of an authenticated identity.
///
/// Roles are resolved by the authentication collaborator; an identity has
/// exactly one role for the lifetime of this subsystem's reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Places orders and watches their progress.
    Customer,
    /// Owns one or more restaurants; cooks.
    RestaurantOwner,
    /// Claims cooked orders and transports them.
    DeliveryDriver,
}

/// An already-authenticated caller.
///
/// Token verification and role resolution happen outside this workspace;
/// every service operation receives the resolved identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Actor {
            id: id.into(),
            role,
        }
    }
}

// =============================================================================
// Restaurant
// =============================================================================

/// A restaurant on the platform.
///
/// Mutated by collaborators outside this engine; treated as read-only
/// reference data here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Restaurant {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Identity of the owning RestaurantOwner.
    pub owner_id: String,

    /// Display name.
    pub name: String,

    /// When the restaurant was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Dish
// =============================================================================

/// A dish on a restaurant's menu.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dish {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Restaurant this dish belongs to.
    pub restaurant_id: String,

    /// Display name shown on the menu.
    pub name: String,

    /// Base price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Customization axes, in menu order.
    pub options: Vec<DishOption>,

    /// When the dish was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Dish {
    /// Finds an option by name, if present.
    pub fn option(&self, name: &str) -> Option<&DishOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

/// A named customization axis on a dish (e.g. "Size", "Spiciness").
///
/// Carries either a flat `extra_cents` surcharge or a set of choices.
/// If a flat extra is present it takes precedence and the choices are
/// not consulted during pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DishOption {
    /// Unique within the dish.
    pub name: String,

    /// Flat surcharge in cents, if this option prices as a whole.
    pub extra_cents: Option<i64>,

    /// Choices under this option, in menu order.
    pub choices: Option<Vec<DishChoice>>,
}

impl DishOption {
    /// Finds a choice by name, if present.
    pub fn choice(&self, name: &str) -> Option<&DishChoice> {
        self.choices
            .as_deref()
            .and_then(|cs| cs.iter().find(|c| c.name == name))
    }
}

/// A named value under a dish option (e.g. "Large"), optionally carrying
/// its own surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DishChoice {
    /// Unique within its option.
    pub name: String,

    /// Surcharge in cents for picking this choice.
    pub extra_cents: Option<i64>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
///
/// Status only moves forward along the chain defined in
/// [`crate::state_machine`]; driver assignment is orthogonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Just placed, waiting for the restaurant.
    Pending,
    /// The restaurant is cooking.
    Cooking,
    /// Ready for pickup by a driver.
    Cooked,
    /// A driver has the order in transit.
    PickedUp,
    /// Handed to the customer (terminal).
    Delivered,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer's order against one restaurant.
///
/// Customer and restaurant references are immutable after creation;
/// `driver_id` is set at most once by a successful claim; `total_cents`
/// is fixed at creation and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub restaurant_id: String,
    /// Unset until a driver claims the order.
    pub driver_id: Option<String>,
    pub status: OrderStatus,
    /// Total in cents, computed once at creation.
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order, referencing the live dish plus the
/// customer's selections.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub dish_id: String,
    /// Selected `(option, choice?)` pairs chosen at order time.
    pub options: Vec<OrderItemOption>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A single `(optionName, choiceName?)` selection on an order item.
///
/// `extra_cents` is a client-supplied display hint; pricing always
/// recomputes from the dish and never trusts this figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItemOption {
    pub name: String,
    pub choice: Option<String>,
    pub extra_cents: Option<i64>,
}

impl OrderItemOption {
    /// Selection of an option priced as a whole (flat extra).
    pub fn flat(name: impl Into<String>) -> Self {
        OrderItemOption {
            name: name.into(),
            choice: None,
            extra_cents: None,
        }
    }

    /// Selection of a specific choice under an option.
    pub fn with_choice(name: impl Into<String>, choice: impl Into<String>) -> Self {
        OrderItemOption {
            name: name.into(),
            choice: Some(choice.into()),
            extra_cents: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
