// services/reel-dash/src/mock.rs
//
// In-memory record API for demo mode (no remote server required)
//

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::RwLock;

use svckit::types::{CreateRequest, DeleteRequest, WireRecord};
use svckit::{RecordId, StoreError};

use crate::api::RecordApi;

const DEMO_ACTORS: [&str; 8] = [
    "Allu Arjun",
    "Tabu",
    "Mammootty",
    "Vidya Balan",
    "Fahadh Faasil",
    "Nayanthara",
    "Irrfan Khan",
    "Rani Mukerji",
];

const DEMO_MOVIES: [&str; 12] = [
    "Pushpa",
    "Maqbool",
    "Kaathal",
    "Kahaani",
    "Kumbalangi Nights",
    "Imaikkaa Nodigal",
    "The Lunchbox",
    "Hichki",
    "Ala Vaikunthapurramuloo",
    "Andhadhun",
    "Bramayugam",
    "Trance",
];

pub struct InMemoryRecordApi {
    rows: RwLock<Vec<WireRecord>>,
    next_id: RwLock<i64>,
}

impl InMemoryRecordApi {
    pub fn new(rows: Vec<WireRecord>) -> Self {
        let next_id = rows
            .iter()
            .filter_map(|r| match r.id {
                RecordId::Number(n) => Some(n),
                RecordId::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            rows: RwLock::new(rows),
            next_id: RwLock::new(next_id),
        }
    }

    /// Random actor/movie pairs spread over the last 90 days
    pub fn seeded(count: usize) -> Self {
        let mut rng = rand::thread_rng();
        let now = Utc::now().naive_utc();

        let rows = (1..=count as i64)
            .map(|id| {
                let age = Duration::minutes(rng.gen_range(0..90 * 24 * 60));
                WireRecord {
                    id: RecordId::Number(id),
                    actor_name: DEMO_ACTORS.choose(&mut rng).map(|s| s.to_string()),
                    movie_name: DEMO_MOVIES.choose(&mut rng).map(|s| s.to_string()),
                    created_at: Some((now - age).format("%Y-%m-%d %H:%M:%S").to_string()),
                }
            })
            .collect();

        Self::new(rows)
    }
}

#[async_trait]
impl RecordApi for InMemoryRecordApi {
    async fn fetch(&self) -> Result<Vec<WireRecord>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn create(&self, request: &CreateRequest) -> Result<(), StoreError> {
        let mut next_id = self.next_id.write().await;
        let row = WireRecord {
            id: RecordId::Number(*next_id),
            actor_name: Some(request.actor_name.clone()),
            movie_name: Some(request.movie_name.clone()),
            created_at: Some(Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string()),
        };
        *next_id += 1;

        self.rows.write().await.push(row);
        Ok(())
    }

    async fn delete(&self, request: &DeleteRequest) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != request.id);

        if rows.len() == before {
            return Err(StoreError::TransportError(format!(
                "record {} not found",
                request.id
            )));
        }
        Ok(())
    }

    fn endpoint(&self) -> &str {
        "in-memory demo store"
    }
}
