use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::candidates::models::{Candidate, CandidateRecord};
use crate::candidates::store::CandidateStore;
use crate::candidates::validation::validate_candidate;
use crate::errors::AppError;

/// Validate-then-store orchestration for the candidate endpoints.
///
/// Documents are checked with [`validate_candidate`] before any store call,
/// so the store only ever receives schema-conforming candidates.
#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn CandidateStore>,
}

impl CandidateService {
    pub fn new(store: Arc<dyn CandidateStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: &Value) -> Result<CandidateRecord, AppError> {
        let candidate = validate_candidate(payload)?;
        let record = self.store.insert(candidate).await?;
        info!(candidate_id = %record.id, "created candidate");
        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<CandidateRecord>, AppError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get(&self, id: &str) -> Result<CandidateRecord, AppError> {
        let id = parse_id(id)?;
        self.store.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// Replaces the top-level fields named in `patch`. The whole merged document
    /// is re-validated, but only the patched fields are written, so concurrent
    /// updates of different fields both land. Same-field updates are
    /// last-write-wins.
    pub async fn update(&self, id: &str, patch: &Value) -> Result<CandidateRecord, AppError> {
        let id = parse_id(id)?;
        let patch = patch
            .as_object()
            .ok_or_else(|| AppError::BadRequest("Update body must be a JSON object".to_string()))?;

        let existing = self.store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        let merged = merge_fields(&existing.candidate, patch)?;
        let candidate = validate_candidate(&merged)?;
        let changed = patched_fields(&candidate, patch)?;

        let record = self
            .store
            .update_by_id(id, changed)
            .await?
            .ok_or(AppError::NotFound)?;
        info!(candidate_id = %record.id, fields = patch.len(), "updated candidate");
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;
        if !self.store.delete_by_id(id).await? {
            return Err(AppError::NotFound);
        }
        info!(candidate_id = %id, "deleted candidate");
        Ok(())
    }

    pub async fn store_available(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}

/// An id that is not a UUID cannot name any stored document.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}

fn merge_fields(base: &Candidate, patch: &Map<String, Value>) -> Result<Value, AppError> {
    let mut document = serde_json::to_value(base)?;
    if let Value::Object(fields) = &mut document {
        for (key, value) in patch {
            if key == "_id" {
                continue;
            }
            fields.insert(key.clone(), value.clone());
        }
    }
    Ok(document)
}

/// Validated, normalized values of the schema fields named in `patch`.
fn patched_fields(
    candidate: &Candidate,
    patch: &Map<String, Value>,
) -> Result<Map<String, Value>, AppError> {
    let mut changed = Map::new();
    if let Value::Object(mut fields) = serde_json::to_value(candidate)? {
        for key in patch.keys() {
            if let Some(value) = fields.remove(key) {
                changed.insert(key.clone(), value);
            }
        }
    }
    Ok(changed)
}
