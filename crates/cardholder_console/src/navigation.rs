//! Path-based navigation between views.

use std::fmt;

use cardholder_core::models::CustomerId;

/// Views reachable by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: landing page
    Home,
    /// `/customers`
    CustomerList,
    /// `/customers/form`
    CustomerForm,
    /// `/customers/{id}`; the raw segment is interpreted by the detail view
    CustomerDetail(String),
}

impl Route {
    /// Resolve a path; unmatched paths redirect to [`Route::Home`]
    pub fn resolve(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["customers"] => Self::CustomerList,
            ["customers", "form"] => Self::CustomerForm,
            ["customers", id] => Self::CustomerDetail((*id).to_string()),
            _ => Self::Home,
        }
    }

    /// Detail route for a persisted customer
    pub fn customer(id: CustomerId) -> Self {
        Self::CustomerDetail(id.to_string())
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::CustomerList => "/customers".to_string(),
            Self::CustomerForm => "/customers/form".to_string(),
            Self::CustomerDetail(id) => format!("/customers/{id}"),
        }
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::CustomerList => "Customers",
            Self::CustomerForm => "New Customer",
            Self::CustomerDetail(_) => "Customer Details",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Holds the current route. Controllers that navigate receive it mutably.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Navigate to a path, redirecting unmatched paths home
    pub fn navigate(&mut self, path: &str) -> &Route {
        self.navigate_to(Route::resolve(path))
    }

    pub fn navigate_to(&mut self, route: Route) -> &Route {
        tracing::debug!(from = %self.current, to = %route, "navigate");
        self.current = route;
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_paths() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve(""), Route::Home);
        assert_eq!(Route::resolve("/customers"), Route::CustomerList);
        assert_eq!(Route::resolve("/customers/"), Route::CustomerList);
        assert_eq!(Route::resolve("/customers/form"), Route::CustomerForm);
        assert_eq!(
            Route::resolve("/customers/42"),
            Route::CustomerDetail("42".to_string())
        );
    }

    #[test]
    fn test_unmatched_paths_redirect_home() {
        assert_eq!(Route::resolve("/accounts"), Route::Home);
        assert_eq!(Route::resolve("/customers/1/cards"), Route::Home);
    }

    #[test]
    fn test_query_string_ignored() {
        assert_eq!(Route::resolve("/customers?page=2"), Route::CustomerList);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [
            Route::Home,
            Route::CustomerList,
            Route::CustomerForm,
            Route::customer(5),
        ] {
            assert_eq!(Route::resolve(&route.path()), route);
        }
    }

    #[test]
    fn test_navigator_tracks_current_route() {
        let mut nav = Navigator::default();
        assert_eq!(nav.current(), &Route::Home);
        nav.navigate("/customers/form");
        assert_eq!(nav.current(), &Route::CustomerForm);
        nav.navigate("/nowhere");
        assert_eq!(nav.current(), &Route::Home);
    }
}
