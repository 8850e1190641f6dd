use super::gate::{authorize, GateDecision, DASHBOARD_PATH};
use crate::models::Role;
use crate::session::SessionState;

const ANY_ROLE: &[Role] = &[];
const MANAGERS: &[Role] = &[Role::Landlord, Role::Admin];
const STAFF: &[Role] = &[Role::Landlord, Role::Admin, Role::Caretaker];
const TENANTS: &[Role] = &[Role::Tenant];

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Signed-in users whose role is in the set; an empty set means any role.
    Authenticated(&'static [Role]),
}

#[derive(Debug, PartialEq, Eq)]
pub struct RouteSpec {
    /// Path pattern; `:name` segments match any single segment.
    pub pattern: &'static str,
    pub access: Access,
    /// Index routes that immediately forward elsewhere.
    pub redirect: Option<&'static str>,
}

const fn public(pattern: &'static str) -> RouteSpec {
    RouteSpec {
        pattern,
        access: Access::Public,
        redirect: None,
    }
}

const fn protected(pattern: &'static str, roles: &'static [Role]) -> RouteSpec {
    RouteSpec {
        pattern,
        access: Access::Authenticated(roles),
        redirect: None,
    }
}

/// Every screen of the application and who may see it.
pub const ROUTES: &[RouteSpec] = &[
    public("/login"),
    public("/register"),
    RouteSpec {
        pattern: "/",
        access: Access::Authenticated(ANY_ROLE),
        redirect: Some(DASHBOARD_PATH),
    },
    protected("/dashboard", ANY_ROLE),
    protected("/properties", STAFF),
    protected("/properties/new", MANAGERS),
    protected("/properties/:id", STAFF),
    protected("/properties/:id/edit", MANAGERS),
    protected("/tenants", STAFF),
    protected("/tenants/new", MANAGERS),
    protected("/tenants/:id/edit", MANAGERS),
    protected("/finance", ANY_ROLE),
    protected("/finance/payments/new", MANAGERS),
    protected("/maintenance", ANY_ROLE),
    protected("/maintenance/new", ANY_ROLE),
    protected("/available-units", TENANTS),
    protected("/consultation", TENANTS),
];

/// A route picked for a concrete path, with its `:name` segments filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static RouteSpec,
    pub params: Vec<(&'static str, String)>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Result of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Pending,
    Render(RouteMatch),
    Redirect(&'static str),
    NotFound,
}

fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or("");
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_pattern(route: &'static RouteSpec, path: &[&str]) -> Option<RouteMatch> {
    let pattern = segments(route.pattern);
    if pattern.len() != path.len() {
        return None;
    }

    let mut params = Vec::new();
    for (expected, &actual) in pattern.iter().copied().zip(path.iter()) {
        if let Some(name) = expected.strip_prefix(':') {
            params.push((name, actual.to_string()));
        } else if expected != actual {
            return None;
        }
    }
    Some(RouteMatch { route, params })
}

/// Find the route for `path`. Literal routes win over parameterized ones
/// (`/properties/new` is never read as `/properties/:id`).
pub fn match_route(path: &str) -> Option<RouteMatch> {
    let path = segments(path);
    let mut candidates = ROUTES.iter().filter_map(|route| match_pattern(route, &path));
    let first = candidates.next()?;
    if first.params.is_empty() {
        return Some(first);
    }
    Some(candidates.find(|m| m.params.is_empty()).unwrap_or(first))
}

/// Resolve `path` against the route table and gate it for `state`.
///
/// Protected routes sit inside the signed-in layout, so they are checked
/// twice: once with no role restriction, then with their own set.
pub fn navigate(state: &SessionState, path: &str) -> Navigation {
    let Some(matched) = match_route(path) else {
        return Navigation::NotFound;
    };

    let roles = match matched.route.access {
        Access::Public => return Navigation::Render(matched),
        Access::Authenticated(roles) => roles,
    };

    for allowed in [ANY_ROLE, roles] {
        match authorize(state, allowed, path) {
            GateDecision::Render => {}
            GateDecision::Pending => return Navigation::Pending,
            GateDecision::Redirect(target) => return Navigation::Redirect(target),
        }
    }

    match matched.route.redirect {
        Some(target) => Navigation::Redirect(target),
        None => Navigation::Render(matched),
    }
}
