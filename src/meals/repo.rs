use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::repo_types::{Meal, MealRow};

const MEAL_COLUMNS: &str = "id, user_id, name, description, consumed_at, is_inside_diet, created_at, updated_at";

impl Meal {
    /// All meals of one user, newest first. Feeds the day-grouping view.
    pub async fn list_by_user_desc(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
            FROM meals
            WHERE user_id = $1
            ORDER BY consumed_at DESC
            "#,
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Meal::from).collect())
    }

    /// All meals of one user, oldest first. Feeds the metrics scan.
    pub async fn history_by_user_asc(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
            FROM meals
            WHERE user_id = $1
            ORDER BY consumed_at ASC
            "#,
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Meal::from).collect())
    }

    pub async fn find(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
            FROM meals
            WHERE id = $1 AND user_id = $2
            "#,
        ))
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row.map(Meal::from))
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        description: &str,
        consumed_at: OffsetDateTime,
        is_inside_diet: bool,
    ) -> anyhow::Result<Meal> {
        let row = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            INSERT INTO meals (id, user_id, name, description, consumed_at, is_inside_diet)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MEAL_COLUMNS}
            "#,
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(name)
        .bind(description)
        .bind(consumed_at)
        .bind(i16::from(is_inside_diet))
        .fetch_one(db)
        .await?;
        Ok(Meal::from(row))
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        meal_id: Uuid,
        name: &str,
        description: &str,
        consumed_at: OffsetDateTime,
        is_inside_diet: bool,
    ) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            UPDATE meals
            SET name = $1, description = $2, consumed_at = $3, is_inside_diet = $4, updated_at = now()
            WHERE id = $5 AND user_id = $6
            RETURNING {MEAL_COLUMNS}
            "#,
        ))
        .bind(name)
        .bind(description)
        .bind(consumed_at)
        .bind(i16::from(is_inside_diet))
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row.map(Meal::from))
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
