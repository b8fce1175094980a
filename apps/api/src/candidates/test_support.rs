use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::candidates::models::{Candidate, CandidateRecord};
use crate::candidates::service::CandidateService;
use crate::candidates::store::{CandidateStore, StoreError};
use crate::candidates::validation::validate_candidate;
use crate::state::AppState;

pub(crate) fn sample_candidate_json() -> Value {
    json!({
        "fullName": "Asha Verma",
        "fatherName": "Rakesh Verma",
        "mobileNumber": "+91 98765 43210",
        "gender": "Female",
        "email": "asha.verma@example.com",
        "dateOfBirth": "1994-06-15",
        "maritalStatus": "Single",
        "panCardNumber": "ABCDE1234F",
        "aadharNumber": "1234 5678 9012",
        "correspondenceAddress": "12 MG Road, Pune 411001",
        "permanentAddress": "4 Lake View, Bhopal 462001",
        "emergencyContact": {
            "name": "Rakesh Verma",
            "relation": "Father",
            "contactNumber": "+91 91234 56780"
        },
        "educationalInformation": [{
            "qualification": "B.Tech",
            "institution": "NIT Bhopal",
            "fromYear": 2012,
            "toYear": 2016,
            "percentage": 82.4,
            "fieldOfStudy": "Computer Science"
        }],
        "employmentDetails": [{
            "previousOrganization": "Northwind Systems",
            "designation": "Software Engineer",
            "fromDate": "2016-07-01",
            "toDate": "2021-03-31",
            "annualCTC": 1200000,
            "reasonToLeave": "Relocation"
        }],
        "references": [{
            "name": "Meera Iyer",
            "organization": "Northwind Systems",
            "designation": "Engineering Manager",
            "contactNumber": "+91 99887 76655",
            "email": "meera.iyer@example.com"
        }],
        "familyDetails": [{
            "name": "Sunita Verma",
            "relation": "Mother",
            "occupation": "Teacher",
            "dateOfBirth": "1962-02-01"
        }],
        "bankDetails": {
            "accountHolderName": "Asha Verma",
            "bankName": "HDFC Bank",
            "branchName": "MG Road",
            "accountNumber": "50100123456789",
            "ifscCode": "HDFC0001234",
            "providentFundNumber": "MH/PUN/0012345/000/0001234",
            "uanNumber": "100123456789"
        }
    })
}

pub(crate) fn sample_candidate() -> Candidate {
    validate_candidate(&sample_candidate_json()).expect("fixture is valid")
}

/// Vec-backed store; keeps insertion order like the real table.
#[derive(Default)]
pub(crate) struct MemoryCandidateStore {
    records: RwLock<Vec<CandidateRecord>>,
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn insert(&self, candidate: Candidate) -> Result<CandidateRecord, StoreError> {
        let record = CandidateRecord {
            id: Uuid::new_v4(),
            candidate,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError> {
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    /// Merges `fields` into the stored document under the write lock, like
    /// `document || $2` does in PostgreSQL.
    async fn update_by_id(
        &self,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Option<CandidateRecord>, StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        let mut document = serde_json::to_value(&record.candidate).map_err(decode_error)?;
        if let Value::Object(stored) = &mut document {
            stored.extend(fields);
        }
        record.candidate = serde_json::from_value(document).map_err(decode_error)?;
        Ok(Some(record.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}

fn decode_error(e: serde_json::Error) -> StoreError {
    StoreError::Database(sqlx::Error::Decode(Box::new(e)))
}

/// Every call fails as if the database were unreachable.
pub(crate) struct UnavailableStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl CandidateStore for UnavailableStore {
    async fn insert(&self, _candidate: Candidate) -> Result<CandidateRecord, StoreError> {
        Err(unavailable())
    }

    async fn find_all(&self) -> Result<Vec<CandidateRecord>, StoreError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<CandidateRecord>, StoreError> {
        Err(unavailable())
    }

    async fn update_by_id(
        &self,
        _id: Uuid,
        _fields: Map<String, Value>,
    ) -> Result<Option<CandidateRecord>, StoreError> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn close(&self) {}
}

pub(crate) fn state_with_store(store: Arc<dyn CandidateStore>) -> AppState {
    AppState {
        candidates: CandidateService::new(store),
    }
}

pub(crate) fn memory_state() -> AppState {
    state_with_store(Arc::new(MemoryCandidateStore::default()))
}
