//! # Display Formatting
//!
//! Renders engine results as text. Every function returns a `String` so the
//! output can be asserted on without a terminal.

use std::fmt::Write;

use bistro_core::{
    CancellationReceipt, MenuItem, OrderDetails, OrderReceipt, TransactionHistory,
};

use crate::config::AppConfig;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Menu grouped under category headings, in catalog order.
pub fn render_menu(items: &[MenuItem], config: &AppConfig) -> String {
    if items.is_empty() {
        return "The menu is empty. Run the seed tool to add items.".to_string();
    }

    let mut out = String::from("Menu:");
    let mut category: Option<&str> = None;

    for item in items {
        if category != Some(item.category.as_str()) {
            let _ = write!(out, "\n\n  {}", item.category);
            category = Some(item.category.as_str());
        }
        let _ = write!(
            out,
            "\n    {} - {}",
            item.name,
            config.format_currency(item.unit_price)
        );
    }

    out
}

pub fn render_receipt(receipt: &OrderReceipt, config: &AppConfig) -> String {
    let mut out = format!(
        "Order confirmed. Order ID: {}. Total amount: {}",
        receipt.order_id,
        config.format_currency(receipt.total)
    );

    for line in &receipt.lines {
        let _ = write!(
            out,
            "\n  {} X {} @ {} = {}",
            line.name,
            line.quantity,
            config.format_currency(line.unit_price),
            config.format_currency(line.line_total)
        );
    }

    out
}

pub fn render_cancellation(receipt: &CancellationReceipt, config: &AppConfig) -> String {
    format!(
        "Order {} cancelled successfully. Refund of {} recorded.",
        receipt.order_id,
        config.format_currency(receipt.refund_amount)
    )
}

pub fn render_history(history: &TransactionHistory, config: &AppConfig) -> String {
    let entries = match history {
        TransactionHistory::Empty => return "No transaction history found.".to_string(),
        TransactionHistory::Entries(entries) => entries,
    };

    let mut out = String::from("Transaction History:");
    for view in entries {
        let _ = write!(
            out,
            "\nTransaction ID: {}, Order ID: {}, Items: {}, Amount: {}, Date: {}, Status: {}",
            view.transaction_id,
            view.order_id,
            view.items,
            config.format_currency(view.amount),
            view.recorded_at.format(DATE_FORMAT),
            view.status
        );
    }

    out
}

/// Order summary. Lines show item ids; names come from `menu` when known.
pub fn render_order(details: &OrderDetails, menu: &[MenuItem], config: &AppConfig) -> String {
    let order = &details.order;
    let mut out = format!(
        "Order {} for {} ({})\n  Deliver to: {}\n  Status: {}\n  Placed: {}\n  Total: {}",
        order.id,
        order.customer_name,
        order.phone,
        order.delivery_address,
        order.status,
        order.created_at.format(DATE_FORMAT),
        config.format_currency(order.total_amount)
    );

    for line in &details.lines {
        let name = menu
            .iter()
            .find(|item| item.id == line.item_id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| format!("item #{}", line.item_id));
        let _ = write!(
            out,
            "\n    {} X {} @ {}",
            name,
            line.quantity,
            config.format_currency(line.unit_price)
        );
    }

    if let Some(cancellation) = &details.cancellation {
        let _ = write!(
            out,
            "\n  Cancelled: {} ({})",
            cancellation.cancelled_at.format(DATE_FORMAT),
            cancellation.reason
        );
    }

    if let Some(refund) = &details.refund {
        let _ = write!(out, "\n  Refund: {}", config.format_currency(refund.amount));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::{LineItem, Money, OrderStatus, TransactionView};
    use chrono::{TimeZone, Utc};

    fn item(id: i64, name: &str, category: &str, minor: i64) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            category: category.to_string(),
            description: None,
            unit_price: Money::from_minor(minor),
        }
    }

    #[test]
    fn test_render_menu_groups_categories() {
        let config = AppConfig::default();
        let menu = [
            item(2, "Naan", "Breads", 4_000),
            item(1, "Butter Chicken", "Mains", 25_000),
            item(3, "Dal Makhani", "Mains", 18_000),
        ];

        let text = render_menu(&menu, &config);
        assert_eq!(
            text,
            "Menu:\n\n  Breads\n    Naan - ₹40.00\n\n  Mains\n    Butter Chicken - ₹250.00\n    Dal Makhani - ₹180.00"
        );
        assert!(render_menu(&[], &config).contains("empty"));
    }

    #[test]
    fn test_render_receipt() {
        let config = AppConfig::default();
        let naan = item(2, "Naan", "Breads", 4_000);
        let receipt = OrderReceipt {
            order_id: 8,
            total: Money::from_minor(12_000),
            lines: vec![LineItem::price(&naan, 3).unwrap()],
        };

        let text = render_receipt(&receipt, &config);
        assert!(text.starts_with("Order confirmed. Order ID: 8. Total amount: ₹120.00"));
        assert!(text.contains("Naan X 3 @ ₹40.00 = ₹120.00"));
    }

    #[test]
    fn test_render_cancellation() {
        let receipt = CancellationReceipt {
            order_id: 8,
            refund_amount: Money::from_minor(62_000),
        };
        assert_eq!(
            render_cancellation(&receipt, &AppConfig::default()),
            "Order 8 cancelled successfully. Refund of ₹620.00 recorded."
        );
    }

    #[test]
    fn test_render_history() {
        let config = AppConfig::default();
        assert_eq!(
            render_history(&TransactionHistory::Empty, &config),
            "No transaction history found."
        );

        let history = TransactionHistory::Entries(vec![TransactionView {
            transaction_id: 3,
            order_id: 8,
            amount: Money::from_minor(62_000),
            recorded_at: Utc.with_ymd_and_hms(2026, 10, 18, 19, 30, 0).unwrap(),
            status: OrderStatus::Cancelled,
            items: "Butter Chicken (250.00), Naan (40.00)".to_string(),
        }]);

        assert_eq!(
            render_history(&history, &config),
            "Transaction History:\nTransaction ID: 3, Order ID: 8, Items: Butter Chicken (250.00), Naan (40.00), Amount: ₹620.00, Date: 2026-10-18 19:30:00, Status: cancelled"
        );
    }
}
