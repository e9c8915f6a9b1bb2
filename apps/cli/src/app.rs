//! # Interactive Session
//!
//! The prompt loop. Generic over its input and output so tests can script
//! a whole conversation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  print options ──► read choice ──┬─► 1 Show Menu        engine.menu()   │
//! │        ▲                         ├─► 2 Create Order     create_order()  │
//! │        │                         ├─► 3 Cancel Order     cancel_order()  │
//! │        │                         ├─► 4 History          history()       │
//! │        │                         ├─► 5 Order Status     get_order()     │
//! │        └─────────────────────────┴─► 6 / exit / EOF     return          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use bistro_core::OrderError;
use bistro_db::{MenuCatalog, OrderEngine};
use tracing::debug;

use crate::config::AppConfig;
use crate::display;
use crate::error::CliError;
use crate::input::{parse_cart, parse_order_id, MenuChoice};

const OPTIONS: &str = "\nOptions:\n1. Show Menu\n2. Create Order\n3. Cancel Order\n4. View Transaction History\n5. Order Status\n6. Exit";

/// One interactive session over an engine.
pub struct Session<'a, C: MenuCatalog, R: BufRead, W: Write> {
    engine: &'a OrderEngine<C>,
    config: &'a AppConfig,
    input: R,
    output: W,
}

impl<'a, C: MenuCatalog, R: BufRead, W: Write> Session<'a, C, R, W> {
    pub fn new(engine: &'a OrderEngine<C>, config: &'a AppConfig, input: R, output: W) -> Self {
        Session {
            engine,
            config,
            input,
            output,
        }
    }

    /// Runs until the user exits or input ends.
    pub async fn run(&mut self) -> Result<(), CliError> {
        writeln!(self.output, "Welcome to Bistro!")?;
        writeln!(self.output, "Choose an option, or type 'exit' to quit.")?;

        loop {
            writeln!(self.output, "{OPTIONS}")?;
            let Some(line) = self.prompt("\nYou: ")? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice. Please choose a valid option.")?;
                continue;
            };
            debug!(?choice, "Menu choice");

            match choice {
                MenuChoice::ShowMenu => self.show_menu().await?,
                MenuChoice::CreateOrder => self.create_order().await?,
                MenuChoice::CancelOrder => self.cancel_order().await?,
                MenuChoice::TransactionHistory => self.show_history().await?,
                MenuChoice::OrderStatus => self.show_order().await?,
                MenuChoice::Exit => break,
            }
        }

        writeln!(self.output, "Exiting...")?;
        Ok(())
    }

    /// Prints `label` and reads one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, message: impl std::fmt::Display) -> Result<(), CliError> {
        writeln!(self.output, "Bot: {message}")?;
        Ok(())
    }

    async fn show_menu(&mut self) -> Result<(), CliError> {
        match self.engine.menu().await {
            Ok(items) => {
                let text = display::render_menu(&items, self.config);
                writeln!(self.output, "\n{text}")?;
            }
            Err(err) => self.say(err)?,
        }
        Ok(())
    }

    async fn create_order(&mut self) -> Result<(), CliError> {
        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(());
        };
        let Some(address) = self.prompt("Enter delivery address: ")? else {
            return Ok(());
        };
        let Some(phone) = self.prompt("Enter your phone number: ")? else {
            return Ok(());
        };

        self.show_menu().await?;

        let Some(order_text) = self.prompt(
            "\nEnter item name and quantity (e.g., Butter Chicken X 2) separated by commas: ",
        )?
        else {
            return Ok(());
        };

        let parsed = parse_cart(&order_text);
        for rejected in &parsed.rejected {
            writeln!(
                self.output,
                "Invalid input for item: {} ({}). Please use 'Item Name X Quantity' format.",
                rejected.part, rejected.reason
            )?;
        }

        match self
            .engine
            .create_order(&name, &address, &phone, &parsed.cart)
            .await
        {
            Ok(receipt) => {
                let text = display::render_receipt(&receipt, self.config);
                self.say(text)?;
            }
            Err(err) => self.say(err)?,
        }
        Ok(())
    }

    async fn cancel_order(&mut self) -> Result<(), CliError> {
        let Some(raw_id) = self.prompt("Enter order ID to cancel: ")? else {
            return Ok(());
        };
        let Some(order_id) = parse_order_id(&raw_id) else {
            writeln!(self.output, "Invalid input. Please enter a valid order ID.")?;
            return Ok(());
        };
        let Some(reason) = self.prompt("Enter cancellation reason: ")? else {
            return Ok(());
        };

        match self.engine.cancel_order(order_id, &reason).await {
            Ok(receipt) => {
                let text = display::render_cancellation(&receipt, self.config);
                self.say(text)?;
            }
            Err(err @ OrderError::InvalidTransition { .. }) => {
                self.say(format!(
                    "{err} Only pending orders can be cancelled."
                ))?;
            }
            Err(err) => self.say(err)?,
        }
        Ok(())
    }

    async fn show_history(&mut self) -> Result<(), CliError> {
        match self.engine.transaction_history().await {
            Ok(history) => {
                let text = display::render_history(&history, self.config);
                writeln!(self.output, "\n{text}")?;
            }
            Err(err) => self.say(err)?,
        }
        Ok(())
    }

    async fn show_order(&mut self) -> Result<(), CliError> {
        let Some(raw_id) = self.prompt("Enter order ID: ")? else {
            return Ok(());
        };
        let Some(order_id) = parse_order_id(&raw_id) else {
            writeln!(self.output, "Invalid input. Please enter a valid order ID.")?;
            return Ok(());
        };

        let details = match self.engine.get_order(order_id).await {
            Ok(Some(details)) => details,
            Ok(None) => return self.say(OrderError::OrderNotFound(order_id)),
            Err(err) => return self.say(err),
        };

        // Names are cosmetic here; a failed menu read falls back to item ids
        let menu = self.engine.menu().await.unwrap_or_default();
        let text = display::render_order(&details, &menu, self.config);
        writeln!(self.output, "\n{text}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::{Money, NewMenuItem, OrderStatus};
    use bistro_db::{Database, DbConfig, MenuRepository};

    async fn engine() -> (Database, OrderEngine<MenuRepository>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.menu()
            .insert_all(&[
                NewMenuItem::new("Butter Chicken", "Mains", Money::from_minor(25_000)),
                NewMenuItem::new("Naan", "Breads", Money::from_minor(4_000)),
            ])
            .await
            .unwrap();
        let engine = db.engine();
        (db, engine)
    }

    async fn run_script(engine: &OrderEngine<MenuRepository>, script: &str) -> String {
        let config = AppConfig::default();
        let mut output = Vec::new();
        Session::new(engine, &config, script.as_bytes(), &mut output)
            .run()
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_history() {
        let (_db, engine) = engine().await;

        let out = run_script(
            &engine,
            "2\nAsha\n12 MG Road\n9876543210\nButter Chicken X 2, Naan X 3\n4\n6\n",
        )
        .await;

        assert!(out.contains("Bot: Order confirmed. Order ID: 1. Total amount: ₹620.00"));
        assert!(out.contains("Transaction ID: 1, Order ID: 1, Items: "));
        assert!(out.contains("Amount: ₹620.00"));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[tokio::test]
    async fn test_unknown_item_message() {
        let (db, engine) = engine().await;

        let out = run_script(&engine, "2\nAsha\n12 MG Road\n9876543210\nButter Chicken X 2, Dosa X 1\nexit\n").await;

        assert!(out.contains(
            "Bot: Item 'Dosa' not found in the menu. Please check the item name and try again."
        ));
        assert_eq!(db.orders().count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_parts_are_reported_and_skipped() {
        let (_db, engine) = engine().await;

        let out = run_script(&engine, "2\nAsha\n12 MG Road\n9876543210\nNaan 3, Naan X 2\n6\n").await;

        assert!(out.contains("Invalid input for item: Naan 3"));
        assert!(out.contains("Total amount: ₹80.00"));
    }

    #[tokio::test]
    async fn test_cancel_flow() {
        let (db, engine) = engine().await;
        let cart = bistro_core::Cart::from_pairs([("Butter Chicken", 2), ("Naan", 3)]).unwrap();
        let receipt = engine
            .create_order("Asha", "12 MG Road", "9876543210", &cart)
            .await
            .unwrap();

        let script = format!(
            "3\n{id}\ncustomer request\n3\n{id}\nagain\n3\nabc\n6\n",
            id = receipt.order_id
        );
        let out = run_script(&engine, &script).await;

        assert!(out.contains(&format!(
            "Bot: Order {} cancelled successfully. Refund of ₹620.00 recorded.",
            receipt.order_id
        )));
        assert!(out.contains("it is already cancelled. Only pending orders can be cancelled."));
        assert!(out.contains("Invalid input. Please enter a valid order ID."));
        assert_eq!(
            db.orders().get_status(receipt.order_id).await.unwrap(),
            Some(OrderStatus::Cancelled)
        );
    }

    #[tokio::test]
    async fn test_order_status_flow() {
        let (_db, engine) = engine().await;
        let cart = bistro_core::Cart::from_pairs([("Naan", 3)]).unwrap();
        let receipt = engine
            .create_order("Asha", "12 MG Road", "9876543210", &cart)
            .await
            .unwrap();

        let script = format!("5\n{}\n5\n99\n6\n", receipt.order_id);
        let out = run_script(&engine, &script).await;

        assert!(out.contains("Status: pending"));
        assert!(out.contains("Naan X 3 @ ₹40.00"));
        assert!(out.contains("Bot: Order 99 not found."));
    }

    #[tokio::test]
    async fn test_invalid_choice_and_eof() {
        let (_db, engine) = engine().await;

        let out = run_script(&engine, "9\n4\n").await;
        assert!(out.contains("Invalid choice. Please choose a valid option."));
        assert!(out.contains("No transaction history found."));
        assert!(out.ends_with("Exiting...\n"));
    }
}
