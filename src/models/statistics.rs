use serde::{Deserialize, Serialize};

use super::resources::deserialize_amount;

/// `properties/statistics/`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PropertyStatistics {
    #[serde(default)]
    pub total_properties: u64,
    #[serde(default)]
    pub total_units: u64,
    #[serde(default)]
    pub occupied_units: u64,
    #[serde(default)]
    pub vacant_units: u64,
    #[serde(default)]
    pub occupancy_rate: f64,
}

/// `invoices/statistics/`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InvoiceStatistics {
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_invoiced: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_paid: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_outstanding: Option<f64>,
    #[serde(default)]
    pub pending_count: u64,
    #[serde(default)]
    pub overdue_count: u64,
    #[serde(default)]
    pub paid_count: u64,
}

/// `complaints/statistics/`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ComplaintStatistics {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub submitted: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub resolved: u64,
    #[serde(default)]
    pub closed: u64,
    #[serde(default)]
    pub urgent: u64,
}

impl ComplaintStatistics {
    /// Complaints still waiting on someone: submitted plus in progress.
    pub fn open(&self) -> u64 {
        self.submitted + self.in_progress
    }
}
