use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::models::{Complaint, ComplaintStatistics};

/// Maintenance complaints.
pub struct MaintenanceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MaintenanceApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn complaints(&self) -> Result<Vec<Complaint>, ApiError> {
        self.client.get_list("complaints/").await
    }

    /// Tenants submit title/description/category/priority only; the backend
    /// fills in tenant and unit and echoes the short form back.
    pub async fn create_complaint<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ApiError> {
        self.client.post("complaints/", body).await
    }

    pub async fn update_complaint<B: Serialize + ?Sized>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<Complaint, ApiError> {
        self.client.put(&format!("complaints/{}/", id), body).await
    }

    pub async fn statistics(&self) -> Result<ComplaintStatistics, ApiError> {
        self.client.get("complaints/statistics/").await
    }
}
