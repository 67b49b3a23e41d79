//! Deleted motions collection endpoints
//!
//! Each handler does exactly one store call. Update and delete succeed
//! even when no entry has the given id.

use axum::{extract::State, routing::delete, routing::get, Json, Router};
use chrono::Utc;

use motionapi_core::{Entry, EntryUpdate};

use crate::error::ApiResult;
use crate::extractors::{EntryId, JsonBody};
use crate::state::AppState;

/// Body returned by every successful write
pub const DONE: &str = "Done";

/// GET /api/deleted - every entry in store order
async fn list_entries(State(state): State<AppState>) -> ApiResult<Json<Vec<Entry>>> {
    let entries = state.store().find_all().await?;
    tracing::debug!(count = entries.len(), "Listed deleted entries");
    Ok(Json(entries))
}

/// PUT /api/deleted - replace all fields but `_id` and `CreationDate`
async fn update_entry(
    State(state): State<AppState>,
    JsonBody(entry): JsonBody<Entry>,
) -> ApiResult<Json<&'static str>> {
    let id = entry.id.clone();
    let update = EntryUpdate::from_entry(entry, Utc::now());

    let matched = state.store().update_one(&id, update).await?;
    tracing::debug!(%id, matched, "Updated deleted entry");
    Ok(Json(DONE))
}

/// POST /api/deleted - insert the entry as given
async fn insert_entry(
    State(state): State<AppState>,
    JsonBody(entry): JsonBody<Entry>,
) -> ApiResult<Json<&'static str>> {
    state.store().insert_one(&entry).await?;
    tracing::debug!(id = %entry.id, "Inserted deleted entry");
    Ok(Json(DONE))
}

/// DELETE /api/deleted/{id} or /api/deleted?id=
async fn delete_entry(
    State(state): State<AppState>,
    EntryId(id): EntryId,
) -> ApiResult<Json<&'static str>> {
    let deleted = state.store().delete_one(&id).await?;
    tracing::debug!(%id, deleted, "Deleted entry");
    Ok(Json(DONE))
}

/// Deleted collection routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/deleted",
            get(list_entries)
                .put(update_entry)
                .post(insert_entry)
                .delete(delete_entry),
        )
        .route("/api/deleted/{id}", delete(delete_entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use motionapi_core::ApiConfig;

    use crate::error::ApiError;
    use crate::store::{EntryStore, MemoryStore};

    fn state_with(store: Arc<MemoryStore>) -> AppState {
        AppState::new(store, ApiConfig::default())
    }

    #[tokio::test]
    async fn insert_then_list() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());
        let entry = Entry::new();

        let Json(done) = insert_entry(State(state.clone()), JsonBody(entry.clone()))
            .await
            .unwrap();
        assert_eq!(done, DONE);

        let Json(listed) = list_entries(State(state)).await.unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[tokio::test]
    async fn update_stamps_edit_date_now() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());
        let entry = Entry::new();
        store.insert_one(&entry).await.unwrap();

        let mut changed = entry.clone();
        changed.notes = "revised".to_string();
        changed.edit_date = entry.edit_date - chrono::Duration::days(30);

        let before = Utc::now();
        let Json(done) = update_entry(State(state), JsonBody(changed)).await.unwrap();
        assert_eq!(done, DONE);

        let stored = &store.find_all().await.unwrap()[0];
        assert_eq!(stored.notes, "revised");
        assert!(stored.edit_date >= before);
        assert_eq!(stored.creation_date, entry.creation_date);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_done() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store);

        let Json(done) = delete_entry(State(state), EntryId("nope".to_string()))
            .await
            .unwrap();
        assert_eq!(done, DONE);
    }

    #[tokio::test]
    async fn duplicate_insert_is_store_error() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store);
        let entry = Entry::new();

        let Json(done) = insert_entry(State(state.clone()), JsonBody(entry.clone()))
            .await
            .unwrap();
        assert_eq!(done, DONE);
        let err = insert_entry(State(state), JsonBody(entry)).await.unwrap_err();
        assert!(matches!(err, ApiError::Store(_)));
    }
}
