//! Path exemption policy and the route boundary consulted by the middleware.

/// Static-asset and system prefixes that bypass authentication entirely.
/// Matching is prefix-based and case-sensitive.
const EXEMPT_PREFIXES: &[&str] = &[
    "/_next",
    "/favicon.ico",
    "/robots.txt",
    "/manifest.json",
    "/icons/",
    "/logo.png",
    "/screenshot.png",
];

/// True when `path` starts with any exempt prefix.
#[must_use]
pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Routes the gate middleware skips entirely: the gate's own dependent
/// endpoints (login, warning, health) and trusted utility APIs.
///
/// This is the routing-layer exclusion list, reproduced at the wiring layer
/// rather than inside [`evaluate`](crate::gate::evaluate) so the core never
/// sees boundary paths.
#[derive(Debug, Clone)]
pub struct RouteBoundary {
    routes: Vec<String>,
}

impl Default for RouteBoundary {
    fn default() -> Self {
        Self {
            routes: [
                "/login",
                "/warning",
                "/health",
                "/api/login",
                "/api/register",
                "/api/logout",
                "/api/cron",
                "/api/server-config",
                "/api/search",
                "/api/detail",
                "/api/image-proxy",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

impl RouteBoundary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route to the boundary.
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.routes.push(route.into());
        self
    }

    /// True when `path` is a boundary route or nested under one.
    #[must_use]
    pub fn skips(&self, path: &str) -> bool {
        self.routes.iter().any(|route| {
            path == route
                || (path.starts_with(route.as_str())
                    && path.as_bytes().get(route.len()) == Some(&b'/'))
        })
    }
}
