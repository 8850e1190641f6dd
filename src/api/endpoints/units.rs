use crate::api::{ApiClient, ApiError};
use crate::models::Unit;

/// Unit listings across all properties the user can see.
pub struct UnitsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UnitsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Unit>, ApiError> {
        self.client.get_list("units/").await
    }

    pub async fn vacant(&self) -> Result<Vec<Unit>, ApiError> {
        self.client.get_list("units/vacant/").await
    }

    pub async fn occupied(&self) -> Result<Vec<Unit>, ApiError> {
        self.client.get_list("units/occupied/").await
    }
}
