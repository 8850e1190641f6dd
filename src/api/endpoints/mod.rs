mod auth;
mod finance;
mod maintenance;
mod properties;
mod tenants;
mod units;

pub use auth::{AuthApi, RefreshedToken};
pub use finance::FinanceApi;
pub use maintenance::MaintenanceApi;
pub use properties::PropertiesApi;
pub use tenants::TenantsApi;
pub use units::UnitsApi;
