// services/reel-dash/src/api.rs
//
// Remote record API client: fetch / create / delete over HTTP
//

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use svckit::config::ApiConfig;
use svckit::types::{CreateRequest, DeleteRequest, WireRecord};
use svckit::StoreError;

/// Remote collaborator behind the record store.
/// Works in wire shapes only; the store translates to domain records.
#[async_trait]
pub trait RecordApi: Send + Sync {
    async fn fetch(&self) -> Result<Vec<WireRecord>, StoreError>;
    async fn create(&self, request: &CreateRequest) -> Result<(), StoreError>;
    async fn delete(&self, request: &DeleteRequest) -> Result<(), StoreError>;
    fn endpoint(&self) -> &str;
}

pub struct HttpRecordApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpRecordApi {
    pub fn new(config: &ApiConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl RecordApi for HttpRecordApi {
    async fn fetch(&self) -> Result<Vec<WireRecord>, StoreError> {
        let url = self.config.url(&self.config.fetch_path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<Vec<WireRecord>>().await?)
    }

    async fn create(&self, request: &CreateRequest) -> Result<(), StoreError> {
        let url = self.config.url(&self.config.create_path);
        debug!("POST {}", url);

        self.client
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete(&self, request: &DeleteRequest) -> Result<(), StoreError> {
        let url = self.config.url(&self.config.delete_path);
        debug!("DELETE {} id={}", url, request.id);

        self.client
            .delete(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.config.base_url
    }
}
