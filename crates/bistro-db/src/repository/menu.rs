//! # Menu Repository
//!
//! The menu catalog: read-only to the order engine, writable by seeding.
//!
//! ## Catalog Seam
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  OrderEngine<C: MenuCatalog>                                           │
//! │       │                                                                 │
//! │       │  find_by_name("Butter Chicken")                                │
//! │       ▼                                                                 │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │   MenuRepository     │   or   │   test stub catalog  │              │
//! │  │   (SQLite, here)     │        │   (in-memory Vec)    │              │
//! │  └──────────────────────┘        └──────────────────────┘              │
//! │                                                                         │
//! │  Names are matched exactly: "naan" does not find "Naan".               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bistro_core::{MenuItem, Money, NewMenuItem};

/// Read-only access to the menu.
///
/// The order engine only ever sees this trait, so tests can hand it a
/// catalog that disagrees with the database.
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    /// All items, grouped by category.
    async fn list_items(&self) -> DbResult<Vec<MenuItem>>;

    /// Exact, case-sensitive name lookup.
    async fn find_by_name(&self, name: &str) -> DbResult<Option<MenuItem>>;

    async fn find_by_id(&self, id: i64) -> DbResult<Option<MenuItem>>;
}

/// Repository for menu database operations.
///
/// ## Usage
/// ```rust,ignore
/// let menu = db.menu();
/// let naan = menu.find_by_name("Naan").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Inserts a menu item and returns it with its assigned id.
    ///
    /// A name that already exists is reported as `UniqueViolation`.
    pub async fn insert(&self, item: &NewMenuItem) -> DbResult<MenuItem> {
        debug!(name = %item.name, price = %item.unit_price, "Inserting menu item");

        if item.unit_price.is_negative() {
            return Err(DbError::CheckViolation {
                message: format!("negative price for {}", item.name),
            });
        }

        let result = sqlx::query(
            r#"
            INSERT INTO menu_items (name, category, description, unit_price)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&item.name)
        .bind(&item.category)
        .bind(&item.description)
        .bind(item.unit_price)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, item.name.clone()),
            other => other,
        })?;

        Ok(MenuItem {
            id: result.last_insert_rowid(),
            name: item.name.clone(),
            category: item.category.clone(),
            description: item.description.clone(),
            unit_price: item.unit_price,
        })
    }

    /// Inserts several items in one transaction; none are kept if any fails.
    pub async fn insert_all(&self, items: &[NewMenuItem]) -> DbResult<usize> {
        let mut tx = self.pool.begin().await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO menu_items (name, category, description, unit_price)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(&item.name)
            .bind(&item.category)
            .bind(&item.description)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(count = items.len(), "Inserted menu items");
        Ok(items.len())
    }

    /// Changes an item's catalog price.
    ///
    /// Orders already placed keep the price frozen on their lines.
    pub async fn update_price(&self, id: i64, unit_price: Money) -> DbResult<()> {
        debug!(id, price = %unit_price, "Updating menu price");

        let result = sqlx::query("UPDATE menu_items SET unit_price = ?2 WHERE id = ?1")
            .bind(id)
            .bind(unit_price)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        Ok(())
    }

    /// Counts menu items (for seeding and diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl MenuCatalog for MenuRepository {
    async fn list_items(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, category, description, unit_price
            FROM menu_items
            ORDER BY category, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed menu items");
        Ok(items)
    }

    async fn find_by_name(&self, name: &str) -> DbResult<Option<MenuItem>> {
        // `=` on TEXT uses the BINARY collation, so the match is case-sensitive
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, category, description, unit_price
            FROM menu_items
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, category, description, unit_price
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn menu() -> MenuRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().menu()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let menu = menu().await;
        let naan = menu
            .insert(&NewMenuItem::new("Naan", "Breads", Money::from_minor(4_000)))
            .await
            .unwrap();

        let by_name = menu.find_by_name("Naan").await.unwrap().unwrap();
        assert_eq!(by_name, naan);

        let by_id = menu.find_by_id(naan.id).await.unwrap().unwrap();
        assert_eq!(by_id.unit_price, Money::from_minor(4_000));
    }

    #[tokio::test]
    async fn test_find_by_name_is_exact() {
        let menu = menu().await;
        menu.insert(&NewMenuItem::new("Naan", "Breads", Money::from_minor(4_000)))
            .await
            .unwrap();

        assert!(menu.find_by_name("naan").await.unwrap().is_none());
        assert!(menu.find_by_name("Naa").await.unwrap().is_none());
        assert!(menu.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let menu = menu().await;
        let item = NewMenuItem::new("Naan", "Breads", Money::from_minor(4_000));
        menu.insert(&item).await.unwrap();

        let err = menu.insert(&item).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { value, .. } if value == "Naan"));
    }

    #[tokio::test]
    async fn test_insert_all_is_atomic() {
        let menu = menu().await;
        let items = vec![
            NewMenuItem::new("Naan", "Breads", Money::from_minor(4_000)),
            NewMenuItem::new("Naan", "Breads", Money::from_minor(4_500)),
        ];

        assert!(menu.insert_all(&items).await.is_err());
        assert_eq!(menu.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_groups_by_category() {
        let menu = menu().await;
        menu.insert_all(&[
            NewMenuItem::new("Butter Chicken", "Mains", Money::from_minor(25_000)),
            NewMenuItem::new("Naan", "Breads", Money::from_minor(4_000)),
            NewMenuItem::new("Dal Makhani", "Mains", Money::from_minor(18_000)),
        ])
        .await
        .unwrap();

        let names: Vec<String> = menu
            .list_items()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Naan", "Butter Chicken", "Dal Makhani"]);
    }

    #[tokio::test]
    async fn test_update_price() {
        let menu = menu().await;
        let naan = menu
            .insert(&NewMenuItem::new("Naan", "Breads", Money::from_minor(4_000)))
            .await
            .unwrap();

        menu.update_price(naan.id, Money::from_minor(4_500)).await.unwrap();
        let naan = menu.find_by_id(naan.id).await.unwrap().unwrap();
        assert_eq!(naan.unit_price, Money::from_minor(4_500));

        assert!(matches!(
            menu.update_price(999, Money::from_minor(1)).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
