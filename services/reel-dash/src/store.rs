// services/reel-dash/src/store.rs
//
// RecordStore - owns the authoritative record list and syncs it with the
// remote API. The only place wire rows become domain records.
//

use std::collections::HashSet;

use tracing::{info, warn};

use svckit::types::{CreateRequest, DeleteRequest, WireRecord};
use svckit::{NewRecord, Record, RecordId, StoreError, Timestamp};

use crate::api::RecordApi;

pub struct RecordStore {
    api: Box<dyn RecordApi>,
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(api: Box<dyn RecordApi>) -> Self {
        Self {
            api,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn endpoint(&self) -> &str {
        self.api.endpoint()
    }

    /// Replace the local set with the remote one.
    /// On failure the previous snapshot is left untouched.
    pub async fn fetch_all(&mut self) -> Result<&[Record], StoreError> {
        let rows = self.api.fetch().await?;
        let fetched = rows.len();

        let mut seen = HashSet::with_capacity(fetched);
        let mut records = Vec::with_capacity(fetched);
        for row in rows {
            if !seen.insert(row.id.clone()) {
                warn!("Duplicate record id {} in fetch response - keeping first", row.id);
                continue;
            }
            records.push(into_record(row));
        }

        self.records = records;
        info!("Fetched {} records from {}", self.records.len(), self.api.endpoint());
        Ok(&self.records)
    }

    /// Submit a new record. The local set is not touched: the server assigns
    /// id and creation time, which show up on the next `fetch_all`.
    pub async fn create(
        &mut self,
        actor_name: &str,
        movie_name: &str,
    ) -> Result<NewRecord, StoreError> {
        let draft = validate_new_record(actor_name, movie_name)?;

        self.api
            .create(&CreateRequest {
                actor_name: draft.actor_name.clone(),
                movie_name: draft.movie_name.clone(),
            })
            .await?;

        info!("Created record {} / {}", draft.actor_name, draft.movie_name);
        Ok(draft)
    }

    pub async fn delete(&mut self, id: &RecordId) -> Result<(), StoreError> {
        self.api.delete(&DeleteRequest { id: id.clone() }).await?;

        self.records.retain(|r| &r.id != id);
        info!("Deleted record {}", id);
        Ok(())
    }
}

fn validate_new_record(actor_name: &str, movie_name: &str) -> Result<NewRecord, StoreError> {
    let actor_name = actor_name.trim();
    let movie_name = movie_name.trim();

    if actor_name.is_empty() {
        return Err(StoreError::ValidationError("actor name is required".to_string()));
    }
    if movie_name.is_empty() {
        return Err(StoreError::ValidationError("movie name is required".to_string()));
    }

    Ok(NewRecord {
        actor_name: actor_name.to_string(),
        movie_name: movie_name.to_string(),
    })
}

fn into_record(row: WireRecord) -> Record {
    Record {
        id: row.id,
        actor_name: row.actor_name.unwrap_or_default(),
        movie_name: row.movie_name.unwrap_or_default(),
        created_at: Timestamp::parse(row.created_at.as_deref().unwrap_or_default()),
    }
}
