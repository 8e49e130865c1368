//! Public/protected route classification.

use std::collections::HashMap;

/// Access level of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RouteAccess {
    /// Reachable without credentials.
    Public,
    /// Requires a bearer token matching the account's stored session.
    #[default]
    Protected,
}

impl RouteAccess {
    /// Whether the route bypasses the gate.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Access levels keyed by route template (e.g. `/users/{id}`).
///
/// Built next to the router. Paths that were never registered resolve to
/// [`RouteAccess::Protected`].
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, RouteAccess>,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the access level for a route template.
    ///
    /// A path registered as protected stays protected even if another method
    /// on it is later marked public.
    pub fn insert(&mut self, path: impl Into<String>, access: RouteAccess) {
        self.routes
            .entry(path.into())
            .and_modify(|current| {
                if access == RouteAccess::Protected {
                    *current = RouteAccess::Protected;
                }
            })
            .or_insert(access);
    }

    /// Access level for a matched route template; unknown or unmatched is protected.
    pub fn access_for(&self, path: Option<&str>) -> RouteAccess {
        path.and_then(|p| self.routes.get(p).copied())
            .unwrap_or_default()
    }

    /// Number of registered route templates.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route has been registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
