//! # Validation Module
//!
//! Input validation for the order manager and the menu catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View                                                         │
//! │  └── Quantity stepper never goes below 1                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (deserialization of the request)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── quantity bounds                                                   │
//! │  ├── note and table-name lengths                                       │
//! │  └── catalog entries (code, price)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Save-readiness (empty order, blank table name) is deliberately NOT here:
//! those are ordinary outcomes of a save, see [`crate::manager::SaveOutcome`].

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Dish;
use crate::{MAX_DISH_PRICE_CENTS, MAX_ITEM_QUANTITY, MAX_NOTE_LEN, MAX_TABLE_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates how many copies of a dish are added at once.
///
/// ## Rules
/// - Must be positive (>= 1)
/// - Must not exceed MAX_ITEM_QUANTITY
///
/// ```rust
/// use mesa_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a free-text note (item modification or order requests).
pub fn validate_note(field: &str, text: &str) -> ValidationResult<()> {
    if text.trim().chars().count() > MAX_NOTE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NOTE_LEN,
        });
    }
    Ok(())
}

/// Validates the length of a table-name input.
///
/// Blank input is allowed here: a draft may be built before the table is
/// known.
pub fn validate_table_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() > MAX_TABLE_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "table name".to_string(),
            max: MAX_TABLE_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates a unit price: between zero (free refills) and
/// [`MAX_DISH_PRICE_CENTS`].
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if !(0..=MAX_DISH_PRICE_CENTS).contains(&price.cents()) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_DISH_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a single catalog entry.
///
/// ## Rules
/// - Code and name must not be blank
/// - Price must pass [`validate_price`]
pub fn validate_dish(dish: &Dish) -> ValidationResult<()> {
    if dish.code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if dish.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: format!("name of dish {}", dish.code),
        });
    }

    validate_price(&format!("price of dish {}", dish.code), dish.price)
}
