//! # Drinkery SQLite Store
//!
//! A relational backend for drinkery.
//!
//! This crate implements the [`DrinkStore`] trait on top of a single `drink`
//! table managed through an `sqlx` connection pool. Recipes are kept in a
//! JSON text column and mapped through [`sqlx::types::Json`].
//!
//! ## Usage
//!
//! ```no_run
//! use drinkery_sqlite::SqliteDrinkStore;
//!
//! # async fn run() -> Result<(), drinkery_core::error::StoreError> {
//! let store = SqliteDrinkStore::connect("sqlite://database.db?mode=rwc").await?;
//! store.ensure_schema().await?;
//! # Ok(())
//! # }
//! ```

use drinkery_core::prelude::*;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use tracing::{info, warn};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS drink (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    recipe TEXT NOT NULL
)";

#[derive(sqlx::FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: Json<Vec<Ingredient>>,
}

impl From<DrinkRow> for Drink {
    fn from(row: DrinkRow) -> Self {
        Drink {
            id: row.id,
            title: row.title,
            recipe: row.recipe.0,
        }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn write_error(err: sqlx::Error, title: Option<&str>) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(title.unwrap_or_default().to_string())
        }
        _ => backend(err),
    }
}

#[derive(Clone)]
pub struct SqliteDrinkStore {
    pool: SqlitePool,
}

impl SqliteDrinkStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for the given connection string, e.g. `sqlite://database.db?mode=rwc`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect(url).await.map_err(backend)?;
        Ok(Self::new(pool))
    }

    /// A private in-memory database with the schema already in place.
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the
    /// pool is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(backend)?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Creates the `drink` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// Drops and recreates the `drink` table, then seeds it with a single drink.
    ///
    /// **NOTE:** This deletes every record!
    pub async fn reset(&self) -> Result<(), StoreError> {
        warn!("Dropping and recreating the drink table");

        let mut tx = self.pool.begin().await.map_err(backend)?;
        sqlx::query("DROP TABLE IF EXISTS drink")
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
        sqlx::query(CREATE_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        let water = vec![Ingredient {
            name: "water".into(),
            color: "blue".into(),
            parts: 1,
        }];
        sqlx::query("INSERT INTO drink (title, recipe) VALUES (?, ?)")
            .bind("water")
            .bind(Json(water))
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        tx.commit().await.map_err(backend)
    }
}

impl DrinkStore for SqliteDrinkStore {
    async fn list_all(&self) -> Result<Vec<Drink>, StoreError> {
        let rows = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drink ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        Ok(rows.into_iter().map(Drink::from).collect())
    }

    async fn create(&self, input: DrinkInput) -> Result<Drink, StoreError> {
        let title = input
            .title()?
            .ok_or_else(|| StoreError::Validation("title is required".into()))?;
        let recipe = input.recipe.clone().unwrap_or_default();

        let row = sqlx::query_as::<_, DrinkRow>(
            "INSERT INTO drink (title, recipe) VALUES (?, ?) RETURNING id, title, recipe",
        )
        .bind(title)
        .bind(Json(recipe))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, Some(title)))?;

        info!(id = row.id, title, "Created drink");
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<Drink>, StoreError> {
        let row = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drink WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        Ok(row.map(Drink::from))
    }

    async fn update(&self, id: i64, input: DrinkInput) -> Result<Drink, StoreError> {
        let title = input.title()?;

        let row = sqlx::query_as::<_, DrinkRow>(
            "UPDATE drink SET title = COALESCE(?, title), recipe = COALESCE(?, recipe) \
             WHERE id = ? RETURNING id, title, recipe",
        )
        .bind(title)
        .bind(input.recipe.clone().map(Json))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, title))?
        .ok_or(StoreError::NotFound(id))?;

        info!(id, "Updated drink");
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<i64, StoreError> {
        let result = sqlx::query("DELETE FROM drink WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!(id, "Deleted drink");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, color: &str, parts: i64) -> Ingredient {
        Ingredient {
            name: name.into(),
            color: color.into(),
            parts,
        }
    }

    fn input(title: &str, recipe: Vec<Ingredient>) -> DrinkInput {
        DrinkInput {
            title: Some(title.into()),
            recipe: Some(recipe),
        }
    }

    async fn store_with_espresso() -> (SqliteDrinkStore, Drink) {
        let store = SqliteDrinkStore::in_memory().await.unwrap();
        let drink = store
            .create(input("espresso", vec![ingredient("shot", "brown", 1)]))
            .await
            .unwrap();
        (store, drink)
    }

    #[tokio::test]
    async fn create_assigns_ids_and_lists_in_order() {
        let (store, espresso) = store_with_espresso().await;
        let latte = store
            .create(input(
                "latte",
                vec![ingredient("milk", "white", 3), ingredient("shot", "brown", 1)],
            ))
            .await
            .unwrap();

        assert!(latte.id > espresso.id);
        let all = store.list_all().await.unwrap();
        assert_eq!(all, vec![espresso, latte.clone()]);
        assert_eq!(store.get(latte.id).await.unwrap(), Some(latte));
    }

    #[tokio::test]
    async fn duplicate_title_conflicts() {
        let (store, _) = store_with_espresso().await;
        let err = store
            .create(input("espresso", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(title) if title == "espresso"));
    }

    #[tokio::test]
    async fn missing_title_is_rejected() {
        let store = SqliteDrinkStore::in_memory().await.unwrap();
        let err = store.create(DrinkInput::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_recipe_defaults_to_empty() {
        let store = SqliteDrinkStore::in_memory().await.unwrap();
        let drink = store
            .create(DrinkInput {
                title: Some("tap water".into()),
                recipe: None,
            })
            .await
            .unwrap();
        assert!(drink.recipe.is_empty());
    }

    #[tokio::test]
    async fn update_only_touches_supplied_fields() {
        let (store, espresso) = store_with_espresso().await;

        let renamed = store
            .update(
                espresso.id,
                DrinkInput {
                    title: Some("ristretto".into()),
                    recipe: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.title, "ristretto");
        assert_eq!(renamed.recipe, espresso.recipe);

        let doubled = vec![ingredient("shot", "brown", 2)];
        let updated = store
            .update(
                espresso.id,
                DrinkInput {
                    title: None,
                    recipe: Some(doubled.clone()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "ristretto");
        assert_eq!(updated.recipe, doubled);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = SqliteDrinkStore::in_memory().await.unwrap();
        let err = store.update(42, input("mocha", vec![])).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
    }

    #[tokio::test]
    async fn update_into_existing_title_conflicts() {
        let (store, _) = store_with_espresso().await;
        let latte = store.create(input("latte", vec![])).await.unwrap();
        let err = store
            .update(latte.id, input("espresso", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let (store, espresso) = store_with_espresso().await;
        assert_eq!(store.delete(espresso.id).await.unwrap(), espresso.id);
        assert_eq!(store.get(espresso.id).await.unwrap(), None);
        assert!(matches!(
            store.delete(espresso.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn reset_seeds_water() {
        let (store, _) = store_with_espresso().await;
        store.reset().await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "water");
        assert_eq!(all[0].recipe, vec![ingredient("water", "blue", 1)]);
    }
}
