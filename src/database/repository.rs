use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;
use super::models::drink::{Drink, Ingredient};

/// Row-level access to the drinks table.
pub struct DrinkRepository {
    pool: PgPool,
}

impl DrinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every stored drink. Unpaginated; the menu is expected to stay small.
    pub async fn list_all(&self) -> Result<Vec<Drink>, DatabaseError> {
        let drinks =
            sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(drinks)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Drink>, DatabaseError> {
        let drink =
            sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drinks WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(drink)
    }

    /// Insert a new row; the recipe is serialized to text before storage.
    pub async fn create(
        &self,
        title: &str,
        recipe: &[Ingredient],
    ) -> Result<Drink, DatabaseError> {
        let raw = serde_json::to_string(recipe)?;

        let drink = sqlx::query_as::<_, Drink>(
            "INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id, title, recipe",
        )
        .bind(title)
        .bind(raw)
        .fetch_one(&self.pool)
        .await?;
        Ok(drink)
    }

    /// Persist in-place mutation of an already-loaded drink.
    pub async fn update(&self, drink: &Drink) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE drinks SET title = $1, recipe = $2 WHERE id = $3")
            .bind(&drink.title)
            .bind(&drink.recipe)
            .bind(drink.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove a row. Existence is the caller's concern; deleting an absent
    /// id is not an error at this layer.
    pub async fn delete_by_id(&self, id: i32) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Drop and recreate the drinks table, optionally seeding two example
    /// rows. Irreversible against a populated store; reachable only from
    /// the operator CLI, never from a route.
    pub async fn reset_schema(&self, seed: bool) -> Result<(), DatabaseError> {
        sqlx::query("DROP TABLE IF EXISTS drinks")
            .execute(&self.pool)
            .await?;
        sqlx::query(
            "CREATE TABLE drinks (
                id SERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                recipe TEXT
            )",
        )
        .execute(&self.pool)
        .await?;
        info!("Recreated drinks table");

        if seed {
            self.create(
                "Water",
                &[Ingredient {
                    color: "blue".to_string(),
                    parts: 1,
                }],
            )
            .await?;
            self.create(
                "Matcha Latte",
                &[
                    Ingredient {
                        color: "green".to_string(),
                        parts: 1,
                    },
                    Ingredient {
                        color: "white".to_string(),
                        parts: 3,
                    },
                ],
            )
            .await?;
            info!("Seeded example drinks");
        }

        Ok(())
    }
}
