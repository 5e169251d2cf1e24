//! Exact-path request router.
//!
//! One table per HTTP method, keyed by the literal path. There are no
//! parameters, wildcards or prefixes, and the query string is part of the
//! path: `/ip?x=1` is not `/ip`. Whatever misses the table goes to the single
//! fallback handler.

use std::collections::HashMap;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::routes;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Registration methods return `self` so they chain.
pub struct Router {
    routes: HashMap<Method, HashMap<String, BoxedHandler>>,
    fallback: BoxedHandler,
}

impl Router {
    /// An empty table whose fallback is the JSON 404 of [`routes::not_found`].
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: routes::not_found.into_boxed_handler(),
        }
    }

    /// Registers `handler` for the exact `method` + `path` pair.
    ///
    /// # Panics
    ///
    /// Panics if the pair is already registered: a route table with two
    /// entries for one path is a programming error.
    ///
    /// ```rust
    /// use kiosk::{Method, Request, Response, Router, routes};
    ///
    /// let app = Router::new()
    ///     .on(Method::Get, "/ip", routes::ip)
    ///     .on(Method::Get, "/healthz", |_: &Request| Response::text("ok"));
    /// ```
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let previous = self
            .routes
            .entry(method.clone())
            .or_default()
            .insert(path.to_owned(), handler.into_boxed_handler());
        assert!(previous.is_none(), "duplicate route `{method} {path}`");
        self
    }

    /// Replaces the handler used for every request the table does not match.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = handler.into_boxed_handler();
        self
    }

    /// Routes one request to its handler and returns the response.
    ///
    /// Pure and synchronous: the result depends only on `req`.
    pub fn dispatch(&self, req: &Request) -> Response {
        self.lookup(req.method(), req.path())
            .unwrap_or(&self.fallback)
            .call(req)
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<&BoxedHandler> {
        self.routes.get(method)?.get(path)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<String> = self
            .routes
            .iter()
            .flat_map(|(m, table)| table.keys().map(move |p| format!("{m} {p}")))
            .collect();
        routes.sort();
        f.debug_struct("Router").field("routes", &routes).finish_non_exhaustive()
    }
}
