//! # Cart & Pricing
//!
//! The pure half of the pricing and line-item resolver.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      From Cart to Priced Order                          │
//! │                                                                         │
//! │  Cart (this module)            name → quantity, repeated names summed   │
//! │       │  validate()            quantities checked BEFORE any lookup     │
//! │       ▼                                                                 │
//! │  catalog lookup (bistro-db)    exact, case-sensitive name match         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LineItem::price()             unit_price × quantity (checked)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricedCart::from_lines()      Σ line totals (checked)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here touches storage, so it can be retried freely.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::MenuItem;
use crate::validation::{validate_cart_size, validate_item_name, validate_quantity};

// =============================================================================
// Cart
// =============================================================================

/// One requested item in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub name: String,
    pub quantity: i64,
}

/// Item names mapped to requested quantities, in first-seen order.
///
/// ## Invariants
/// - Names are unique (adding a name again sums the quantities)
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` distinct names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Builds a cart from `(name, quantity)` pairs, summing repeats.
    ///
    /// ```rust
    /// use bistro_core::cart::Cart;
    ///
    /// let cart = Cart::from_pairs([("Naan", 2), ("Butter Chicken", 1), ("Naan", 1)]).unwrap();
    /// assert_eq!(cart.quantity_of("Naan"), Some(3));
    /// assert_eq!(cart.len(), 2);
    /// ```
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut cart = Cart::new();
        for (name, quantity) in pairs {
            cart.add(name, quantity)?;
        }
        Ok(cart)
    }

    /// Adds `quantity` of `name`, summing with any existing entry.
    ///
    /// Names are kept exactly as given (only surrounding whitespace is
    /// trimmed); `"naan"` and `"Naan"` are different items.
    pub fn add(&mut self, name: impl Into<String>, quantity: i64) -> Result<(), ValidationError> {
        let name = name.into().trim().to_string();
        validate_item_name(&name)?;
        validate_quantity(quantity)?;

        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            let summed = entry
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| ValidationError::Overflow {
                    field: "quantity".to_string(),
                })?;
            validate_quantity(summed)?;
            entry.quantity = summed;
            return Ok(());
        }

        validate_cart_size(self.entries.len())?;
        self.entries.push(CartEntry { name, quantity });
        Ok(())
    }

    /// Checks the cart as a whole before it is priced.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.entries.is_empty() {
            return Err(ValidationError::Required {
                field: "cart".to_string(),
            });
        }
        for entry in &self.entries {
            validate_quantity(entry.quantity)?;
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn quantity_of(&self, name: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.quantity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// A cart entry resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: i64,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

impl LineItem {
    /// Prices `quantity` of `item` at its current catalog price.
    pub fn price(item: &MenuItem, quantity: i64) -> Result<Self, ValidationError> {
        validate_quantity(quantity)?;
        let line_total = item
            .unit_price
            .checked_mul_quantity(quantity)
            .ok_or_else(|| ValidationError::Overflow {
                field: format!("line total for {}", item.name),
            })?;

        Ok(LineItem {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity,
            line_total,
        })
    }
}

/// Priced line items plus their exact total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedCart {
    lines: Vec<LineItem>,
    total: Money,
}

impl PricedCart {
    /// Sums the line totals.
    ///
    /// ```rust
    /// use bistro_core::cart::{LineItem, PricedCart};
    /// use bistro_core::{MenuItem, Money};
    ///
    /// let naan = MenuItem {
    ///     id: 2,
    ///     name: "Naan".into(),
    ///     category: "Breads".into(),
    ///     description: None,
    ///     unit_price: Money::from_minor(4_000),
    /// };
    /// let priced = PricedCart::from_lines(vec![LineItem::price(&naan, 3).unwrap()]).unwrap();
    /// assert_eq!(priced.total(), Money::from_minor(12_000));
    /// ```
    pub fn from_lines(lines: Vec<LineItem>) -> Result<Self, ValidationError> {
        if lines.is_empty() {
            return Err(ValidationError::Required {
                field: "cart".to_string(),
            });
        }

        let total = lines
            .iter()
            .try_fold(Money::zero(), |acc, line| acc.checked_add(line.line_total))
            .ok_or_else(|| ValidationError::Overflow {
                field: "order total".to_string(),
            })?;

        Ok(PricedCart { lines, total })
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn into_lines(self) -> Vec<LineItem> {
        self.lines
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_ITEM_QUANTITY;

    fn item(id: i64, name: &str, minor: i64) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            category: "Mains".to_string(),
            description: None,
            unit_price: Money::from_minor(minor),
        }
    }

    #[test]
    fn test_repeated_names_are_summed() {
        let mut cart = Cart::new();
        cart.add("Naan", 2).unwrap();
        cart.add("Butter Chicken", 1).unwrap();
        cart.add("Naan", 1).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity_of("Naan"), Some(3));
        assert_eq!(cart.entries()[0].name, "Naan");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let cart = Cart::from_pairs([("Naan", 1), ("naan", 1)]).unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_names_are_trimmed() {
        let cart = Cart::from_pairs([("  Naan ", 1), ("Naan", 1)]).unwrap();
        assert_eq!(cart.quantity_of("Naan"), Some(2));
    }

    #[test]
    fn test_non_positive_quantities_rejected() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add("Naan", 0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(cart.add("Naan", -3).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_summed_quantity_respects_limit() {
        let mut cart = Cart::new();
        cart.add("Naan", MAX_ITEM_QUANTITY).unwrap();
        assert!(cart.add("Naan", 1).is_err());
        assert_eq!(cart.quantity_of("Naan"), Some(MAX_ITEM_QUANTITY));
    }

    #[test]
    fn test_empty_cart_fails_validation() {
        assert!(matches!(
            Cart::new().validate(),
            Err(ValidationError::Required { .. })
        ));
        assert!(Cart::from_pairs([("Naan", 1)]).unwrap().validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(Cart::new().add("   ", 1).is_err());
    }

    #[test]
    fn test_butter_chicken_and_naan_total() {
        let butter_chicken = item(1, "Butter Chicken", 25_000);
        let naan = item(2, "Naan", 4_000);

        let priced = PricedCart::from_lines(vec![
            LineItem::price(&butter_chicken, 2).unwrap(),
            LineItem::price(&naan, 3).unwrap(),
        ])
        .unwrap();

        assert_eq!(priced.lines().len(), 2);
        assert_eq!(priced.total(), Money::from_minor(62_000));
        assert_eq!(priced.total().to_string(), "620.00");
    }

    #[test]
    fn test_total_equals_sum_of_lines() {
        let menu = [item(1, "A", 1), item(2, "B", 333), item(3, "C", 99_999)];
        for qty in [1, 2, 7, 999] {
            let lines: Vec<LineItem> = menu
                .iter()
                .map(|m| LineItem::price(m, qty).unwrap())
                .collect();
            let expected: i64 = menu.iter().map(|m| m.unit_price.minor_units() * qty).sum();
            let priced = PricedCart::from_lines(lines).unwrap();
            assert_eq!(priced.total().minor_units(), expected);
        }
    }

    #[test]
    fn test_overflow_is_a_validation_error() {
        let huge = item(1, "Gold Thali", i64::MAX / 2);
        assert!(matches!(
            LineItem::price(&huge, 3),
            Err(ValidationError::Overflow { .. })
        ));

        let line = LineItem::price(&huge, 1).unwrap();
        assert!(PricedCart::from_lines(vec![line.clone(), line.clone(), line]).is_err());
    }
}
