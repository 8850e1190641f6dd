//! Route authorization: the gate decision, the application's route table,
//! and the per-role navigation menu.

pub mod gate;
pub mod navigation;
pub mod routes;

pub use gate::{authorize, GateDecision, DASHBOARD_PATH, LOGIN_PATH};
pub use navigation::{navigation_for, NavItem};
pub use routes::{match_route, navigate, Access, Navigation, RouteMatch, RouteSpec, ROUTES};
