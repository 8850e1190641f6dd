//! Records returned by the property, tenant, finance and maintenance endpoints.
//!
//! Only the fields the list serializers always send are typed; every other
//! field the backend includes is kept in `extra` untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decimal amounts arrive either as JSON numbers or as strings like "1500.00".
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid amount '{}': {}", s, e))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected amount, found {}",
            other
        ))),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Property {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub total_units: Option<u32>,
    #[serde(default)]
    pub occupied_units: Option<u32>,
    #[serde(default)]
    pub vacant_units: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub occupancy_rate: Option<f64>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: i64,
    pub unit_number: String,
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub rent_amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Unit {
    pub fn is_vacant(&self) -> bool {
        self.status.as_deref() == Some("VACANT")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tenant {
    pub id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_phone: Option<String>,
    #[serde(default)]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub move_in_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: i64,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount_paid: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub balance: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_method_display: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub transaction_reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Complaint {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority_display: Option<String>,
    #[serde(default)]
    pub status_display: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Text fields plus an optional image for the multipart property form.
#[derive(Debug, Clone, Default)]
pub struct PropertyForm {
    pub fields: Vec<(String, String)>,
    pub image: Option<PropertyImage>,
}

#[derive(Debug, Clone)]
pub struct PropertyImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PropertyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn image(
        mut self,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.image = Some(PropertyImage {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        });
        self
    }
}
