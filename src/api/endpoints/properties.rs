use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::models::{Property, PropertyForm, PropertyStatistics, Unit};

/// Multipart field the backend reads the uploaded picture from.
const IMAGE_FIELD: &str = "image";

/// Properties and the units nested under them.
pub struct PropertiesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PropertiesApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Property>, ApiError> {
        self.client.get_list("properties/").await
    }

    pub async fn get(&self, id: i64) -> Result<Property, ApiError> {
        self.client.get(&format!("properties/{}/", id)).await
    }

    pub async fn create(&self, form: PropertyForm) -> Result<Property, ApiError> {
        self.client
            .request(Method::POST, "properties/")
            .multipart(to_multipart(form)?)
            .send()
            .await
    }

    pub async fn update(&self, id: i64, form: PropertyForm) -> Result<Property, ApiError> {
        self.client
            .request(Method::PUT, &format!("properties/{}/", id))
            .multipart(to_multipart(form)?)
            .send()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("properties/{}/", id)).await
    }

    pub async fn statistics(&self) -> Result<PropertyStatistics, ApiError> {
        self.client.get("properties/statistics/").await
    }

    pub async fn units(&self, id: i64) -> Result<Vec<Unit>, ApiError> {
        self.client.get_list(&format!("properties/{}/units/", id)).await
    }

    pub async fn create_unit<B: Serialize + ?Sized>(&self, body: &B) -> Result<Unit, ApiError> {
        self.client.post("units/", body).await
    }

    pub async fn update_unit<B: Serialize + ?Sized>(
        &self,
        id: i64,
        body: &B,
    ) -> Result<Unit, ApiError> {
        self.client.put(&format!("units/{}/", id), body).await
    }

    pub async fn delete_unit(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("units/{}/", id)).await
    }
}

fn to_multipart(form: PropertyForm) -> Result<Form, ApiError> {
    let mut multipart = form
        .fields
        .into_iter()
        .fold(Form::new(), |multipart, (name, value)| multipart.text(name, value));

    if let Some(image) = form.image {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.mime_type)
            .map_err(|e| ApiError::InvalidRequest(format!("bad image mime type: {}", e)))?;
        multipart = multipart.part(IMAGE_FIELD, part);
    }
    Ok(multipart)
}
