use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::models::Tenant;

pub struct TenantsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TenantsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, ApiError> {
        self.client.get_list("tenants/").await
    }

    pub async fn get(&self, id: i64) -> Result<Tenant, ApiError> {
        self.client.get(&format!("tenants/{}/", id)).await
    }

    /// The create serializer echoes the write-only form back without an id,
    /// so the raw JSON is returned.
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        self.client.post("tenants/", body).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, body: &B) -> Result<Tenant, ApiError> {
        self.client.put(&format!("tenants/{}/", id), body).await
    }
}
