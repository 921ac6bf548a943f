//! # Price Calculator
//!
//! Pure pricing of a dish with the customer's selected options.
//!
//! ## Pricing Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing One Item                                 │
//! │                                                                         │
//! │  price = dish.price_cents                                              │
//! │                                                                         │
//! │  for each selected (optionName, choiceName?):                          │
//! │       │                                                                 │
//! │       ├── no option with that name on the dish?  → +0                  │
//! │       │                                                                 │
//! │       ├── option has a flat extra?               → +extra              │
//! │       │    (choices are NOT consulted)                                 │
//! │       │                                                                 │
//! │       └── otherwise, choiceName names a choice                         │
//! │            with an extra?                        → +extra              │
//! │            no such choice / no extra?            → +0                  │
//! │                                                                         │
//! │  Unknown names are silently ignored: clients may send extra hints      │
//! │  and the server simply prices what it recognizes.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic is integer cents. No I/O, no side effects.

use crate::types::{Dish, OrderItemOption};

/// Prices a single dish with the given selections.
///
/// Starts from the dish base price and adds the applicable extras per the
/// algorithm above. Deterministic; selection order does not matter.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use savor_core::pricing::dish_price;
/// use savor_core::types::{Dish, DishChoice, DishOption, OrderItemOption};
///
/// let dish = Dish {
///     id: "d".into(),
///     restaurant_id: "r".into(),
///     name: "Bibimbap".into(),
///     price_cents: 8000,
///     options: vec![DishOption {
///         name: "Size".into(),
///         extra_cents: None,
///         choices: Some(vec![DishChoice { name: "Large".into(), extra_cents: Some(1000) }]),
///     }],
///     created_at: Utc::now(),
/// };
///
/// let selected = vec![OrderItemOption::with_choice("Size", "Large")];
/// assert_eq!(dish_price(&dish, &selected), 9000);
/// ```
pub fn dish_price(dish: &Dish, selected: &[OrderItemOption]) -> i64 {
    let mut price = dish.price_cents;

    for selection in selected {
        let Some(option) = dish.option(&selection.name) else {
            // Unknown option name: contributes nothing.
            continue;
        };

        if let Some(extra) = option.extra_cents {
            // Flat extra takes precedence; any supplied choice is ignored.
            price += extra;
        } else if let Some(choice_name) = selection.choice.as_deref() {
            if let Some(choice) = option.choice(choice_name) {
                if let Some(extra) = choice.extra_cents {
                    price += extra;
                }
            }
        }
    }

    price
}

/// Sums priced items into an order total.
///
/// Item ordering is irrelevant to the total.
pub fn order_total(item_prices: &[i64]) -> i64 {
    item_prices.iter().sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
