//! Record store for the `items` table.
//!
//! An [`ItemStore`] wraps a single pooled connection. Handlers obtain one per
//! request, either through its [`FromRequestParts`] impl or via
//! [`ItemStore::acquire`] once the body is parsed; the connection goes back to
//! the pool when the store is dropped, whether the request succeeded or not.

use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::{pool::PoolConnection, Sqlite, SqlitePool};

use crate::error::AppError;
use crate::state::AppState;

/// A persisted row of the `items` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ItemRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Field set of a record that has not been inserted yet.
#[derive(Debug, Clone)]
pub struct NewItemRecord {
    pub name: String,
    pub description: Option<String>,
}

/// Field set written by [`ItemStore::update`]. `name` is nullable here so that a
/// full overwrite with an absent name reaches the NOT NULL constraint.
#[derive(Debug, Clone)]
pub struct ItemRecordFields {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct ItemStore {
    conn: PoolConnection<Sqlite>,
}

impl ItemStore {
    /// Checks a connection out of the pool for the lifetime of the store.
    pub async fn acquire(pool: &SqlitePool) -> sqlx::Result<Self> {
        let conn = pool.acquire().await?;
        Ok(Self { conn })
    }

    pub async fn insert(&mut self, record: NewItemRecord) -> sqlx::Result<ItemRecord> {
        sqlx::query_as::<_, ItemRecord>(
            r#"INSERT INTO items (name, description)
               VALUES (?1, ?2)
               RETURNING id, name, description"#,
        )
        .bind(record.name)
        .bind(record.description)
        .fetch_one(&mut *self.conn)
        .await
    }

    pub async fn get(&mut self, id: i64) -> sqlx::Result<Option<ItemRecord>> {
        sqlx::query_as::<_, ItemRecord>("SELECT id, name, description FROM items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
    }

    /// Overwrites every column of row `id`. Returns `None` if the row is gone.
    pub async fn update(&mut self, id: i64, fields: ItemRecordFields) -> sqlx::Result<Option<ItemRecord>> {
        sqlx::query_as::<_, ItemRecord>(
            r#"UPDATE items SET name = ?1, description = ?2
               WHERE id = ?3
               RETURNING id, name, description"#,
        )
        .bind(fields.name)
        .bind(fields.description)
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
    }

    /// Removes row `id` and returns it as it was before removal.
    pub async fn delete(&mut self, id: i64) -> sqlx::Result<Option<ItemRecord>> {
        sqlx::query_as::<_, ItemRecord>("DELETE FROM items WHERE id = ?1 RETURNING id, name, description")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
    }
}

impl FromRequestParts<AppState> for ItemStore {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        ItemStore::acquire(&state.db).await.map_err(AppError::from)
    }
}
