//! # Input Parsing
//!
//! Turns typed lines into menu choices, carts and order ids.
//!
//! ## Cart Text
//! ```text
//! "Butter Chicken X 2, Naan X 3, Naan X 1"
//!        │
//!        ▼  split on ','  then on the last " X "
//! [("Butter Chicken", 2), ("Naan", 3), ("Naan", 1)]
//!        │
//!        ▼  Cart::add (repeats summed)
//! { Butter Chicken: 2, Naan: 4 }
//! ```
//!
//! Parts that don't parse are collected as [`RejectedPart`]s and skipped;
//! the rest of the cart is still used.

use bistro_core::validation::validate_order_id;
use bistro_core::Cart;

/// Top-level menu options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ShowMenu,
    CreateOrder,
    CancelOrder,
    TransactionHistory,
    OrderStatus,
    Exit,
}

impl MenuChoice {
    /// Parses a choice; `exit` is accepted in any case.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") {
            return Some(MenuChoice::Exit);
        }

        match input {
            "1" => Some(MenuChoice::ShowMenu),
            "2" => Some(MenuChoice::CreateOrder),
            "3" => Some(MenuChoice::CancelOrder),
            "4" => Some(MenuChoice::TransactionHistory),
            "5" => Some(MenuChoice::OrderStatus),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// A cart part that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedPart {
    pub part: String,
    pub reason: String,
}

/// Result of parsing a cart line.
#[derive(Debug, Clone, Default)]
pub struct ParsedCart {
    pub cart: Cart,
    pub rejected: Vec<RejectedPart>,
}

const SEPARATOR: &str = " X ";

/// Parses `Item Name X Quantity` parts separated by commas.
///
/// ```rust
/// use bistro_cli::input::parse_cart;
///
/// let parsed = parse_cart("Butter Chicken X 2, Naan X 3");
/// assert_eq!(parsed.cart.quantity_of("Naan"), Some(3));
/// assert!(parsed.rejected.is_empty());
/// ```
pub fn parse_cart(text: &str) -> ParsedCart {
    let mut parsed = ParsedCart::default();

    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        // rsplit so names containing " X " still work
        let Some((name, quantity)) = part.rsplit_once(SEPARATOR) else {
            parsed.rejected.push(RejectedPart {
                part: part.to_string(),
                reason: "use 'Item Name X Quantity' format".to_string(),
            });
            continue;
        };

        let quantity = match quantity.trim().parse::<i64>() {
            Ok(quantity) => quantity,
            Err(_) => {
                parsed.rejected.push(RejectedPart {
                    part: part.to_string(),
                    reason: format!("'{}' is not a whole number", quantity.trim()),
                });
                continue;
            }
        };

        if let Err(err) = parsed.cart.add(name.trim(), quantity) {
            parsed.rejected.push(RejectedPart {
                part: part.to_string(),
                reason: err.to_string(),
            });
        }
    }

    parsed
}

/// Parses a positive order id.
pub fn parse_order_id(input: &str) -> Option<i64> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| validate_order_id(*id).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::ShowMenu));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::CreateOrder));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::OrderStatus));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("EXIT"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_parse_cart_sums_repeats() {
        let parsed = parse_cart("Naan X 2, Butter Chicken X 1, Naan X 1");
        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.cart.len(), 2);
        assert_eq!(parsed.cart.quantity_of("Naan"), Some(3));
    }

    #[test]
    fn test_parse_cart_skips_malformed_parts() {
        let parsed = parse_cart("Butter Chicken X 2, Naan 3, Rasmalai X two, Samosa X 0");

        assert_eq!(parsed.cart.len(), 1);
        assert_eq!(parsed.cart.quantity_of("Butter Chicken"), Some(2));

        let parts: Vec<&str> = parsed.rejected.iter().map(|r| r.part.as_str()).collect();
        assert_eq!(parts, vec!["Naan 3", "Rasmalai X two", "Samosa X 0"]);
        assert_eq!(parsed.rejected[2].reason, "quantity must be positive");
    }

    #[test]
    fn test_separator_is_case_sensitive() {
        let parsed = parse_cart("Naan x 2");
        assert!(parsed.cart.is_empty());
        assert_eq!(parsed.rejected.len(), 1);
    }

    #[test]
    fn test_empty_line() {
        let parsed = parse_cart("  ,  ");
        assert!(parsed.cart.is_empty());
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_parse_order_id() {
        assert_eq!(parse_order_id(" 8 "), Some(8));
        assert_eq!(parse_order_id("0"), None);
        assert_eq!(parse_order_id("-3"), None);
        assert_eq!(parse_order_id("eight"), None);
    }
}
