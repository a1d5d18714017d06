//! Patrons repository for database operations

use chrono::Utc;
use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{error::AppResult, models::patron::Patron};

#[derive(Clone)]
pub struct PatronsRepository {
    pool: Pool<Sqlite>,
}

impl PatronsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List patrons in creation order
    pub async fn list(&self) -> AppResult<Vec<Patron>> {
        let patrons = sqlx::query_as::<_, Patron>(
            "SELECT id, name, created_at FROM patrons ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(patrons)
    }

    /// Return the patron's id, creating the row on first use
    pub(crate) async fn ensure(conn: &mut SqliteConnection, name: &str) -> AppResult<i64> {
        sqlx::query("INSERT INTO patrons (name, created_at) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .bind(Utc::now())
            .execute(&mut *conn)
            .await?;

        let id: i64 = sqlx::query_scalar("SELECT id FROM patrons WHERE name = ?")
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;
        Ok(id)
    }
}
