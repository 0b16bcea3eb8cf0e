//! Item operations: the domain contract shared by all item handlers.
//!
//! Every function works against a caller-provided [`ItemStore`] and reports
//! lookup misses as [`ItemError::NotFound`]. Translation into HTTP statuses
//! happens in [`crate::error`].

use tracing::{debug, info};

use crate::store::{ItemRecord, ItemRecordFields, ItemStore, NewItemRecord};
use crate::types::{Item, ItemCreate, ItemUpdate};

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("item {0} not found")]
    NotFound(i64),

    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

pub type ItemResult<T> = Result<T, ItemError>;

pub async fn find(store: &mut ItemStore, id: i64) -> ItemResult<ItemRecord> {
    debug!(id, "find item");
    store.get(id).await?.ok_or(ItemError::NotFound(id))
}

pub async fn create(store: &mut ItemStore, input: ItemCreate) -> ItemResult<Item> {
    let record = store
        .insert(NewItemRecord { name: input.name, description: input.description })
        .await?;
    info!(id = record.id, "created item");
    Ok(record.into())
}

pub async fn read(store: &mut ItemStore, id: i64) -> ItemResult<Item> {
    let record = find(store, id).await?;
    Ok(record.into())
}

/// Full replace: every field of the record takes the input's value, so an
/// absent `description` clears it and an absent `name` violates NOT NULL.
pub async fn update(store: &mut ItemStore, id: i64, input: ItemUpdate) -> ItemResult<Item> {
    find(store, id).await?;
    let fields = ItemRecordFields { name: input.name, description: input.description };
    // The row can vanish between find and update under concurrent deletes.
    let record = store.update(id, fields).await?.ok_or(ItemError::NotFound(id))?;
    info!(id, "updated item");
    Ok(record.into())
}

/// Removes the item and returns its state from just before removal.
pub async fn delete(store: &mut ItemStore, id: i64) -> ItemResult<Item> {
    let snapshot: Item = find(store, id).await?.into();
    store.delete(id).await?.ok_or(ItemError::NotFound(id))?;
    info!(id, "deleted item");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn setup() -> (SqlitePool, ItemStore) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::init_db(&pool).await.unwrap();
        let store = ItemStore::acquire(&pool).await.unwrap();
        (pool, store)
    }

    fn item_create(name: &str, description: Option<&str>) -> ItemCreate {
        ItemCreate { name: name.to_string(), description: description.map(str::to_string) }
    }

    #[tokio::test]
    async fn test_create_item() {
        let (_pool, mut store) = setup().await;
        let item = create(&mut store, item_create("Test Item", Some("This is a test item")))
            .await
            .unwrap();

        assert_eq!(item.name, "Test Item");
        assert_eq!(item.description.as_deref(), Some("This is a test item"));
    }

    #[tokio::test]
    async fn test_read_round_trip() {
        let (_pool, mut store) = setup().await;
        let created = create(&mut store, item_create("Round", None)).await.unwrap();

        let read_back = read(&mut store, created.id).await.unwrap();
        assert_eq!(read_back, created);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (_pool, mut store) = setup().await;

        assert!(matches!(read(&mut store, 100).await, Err(ItemError::NotFound(100))));
        assert!(matches!(
            update(&mut store, 100, ItemUpdate::default()).await,
            Err(ItemError::NotFound(100))
        ));
        assert!(matches!(delete(&mut store, 100).await, Err(ItemError::NotFound(100))));
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let (_pool, mut store) = setup().await;
        let created = create(&mut store, item_create("Test Item", Some("This is a test item")))
            .await
            .unwrap();

        let updated = update(
            &mut store,
            created.id,
            ItemUpdate { name: Some("New Name".into()), description: None },
        )
        .await
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.description, None);
        assert_eq!(read(&mut store, created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_without_name_is_persistence_error() {
        let (_pool, mut store) = setup().await;
        let created = create(&mut store, item_create("Keep", Some("me"))).await.unwrap();

        let result = update(&mut store, created.id, ItemUpdate::default()).await;
        assert!(matches!(result, Err(ItemError::Persistence(_))));
        assert_eq!(read(&mut store, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_overlong_name_is_persistence_error() {
        let (_pool, mut store) = setup().await;
        let name = "n".repeat(db::ITEM_NAME_MAX_LEN + 1);

        let result = create(&mut store, item_create(&name, None)).await;
        assert!(matches!(result, Err(ItemError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_snapshot_and_hides_item() {
        let (_pool, mut store) = setup().await;
        let created = create(&mut store, item_create("Test Item", Some("This is a test item")))
            .await
            .unwrap();

        let deleted = delete(&mut store, created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(matches!(read(&mut store, created.id).await, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_twice_fails_second_time() {
        let (_pool, mut store) = setup().await;
        let created = create(&mut store, item_create("Once", None)).await.unwrap();

        assert!(delete(&mut store, created.id).await.is_ok());
        assert!(matches!(delete(&mut store, created.id).await, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_created_ids_are_unused() {
        let (_pool, mut store) = setup().await;
        let mut seen = std::collections::HashSet::new();
        for i in 0..20 {
            let item = create(&mut store, item_create(&format!("item {}", i), None)).await.unwrap();
            assert!(seen.insert(item.id), "id {} handed out twice", item.id);
        }
    }
}
