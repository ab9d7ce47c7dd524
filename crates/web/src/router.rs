//! The dispatch table.
//!
//! Routes are exact paths, each with its own set of methods. Looking a request
//! up tells apart an unknown path from a known path asked with the wrong
//! method, which is what decides between a 404 and a 405.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::handler::RequestHandler;
use crate::method::Method;

type MethodTable = HashMap<Method, Box<dyn RequestHandler>>;

/// Maps a path, then a method, to a handler.
///
/// Built once before serving and only read afterwards.
#[derive(Default)]
pub struct Router {
    routes: HashMap<String, MethodTable>,
}

/// The outcome of [`Router::dispatch`].
pub enum Dispatch<'router> {
    Found(&'router dyn RequestHandler),
    NotFound,
    MethodNotAllowed,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Registers `handler` for `(path, method)`, replacing any handler that
    /// was registered for the same pair before.
    ///
    /// # Panics
    ///
    /// Panics if `path` does not start with `/`.
    pub fn add_route(&mut self, path: impl Into<String>, method: Method, handler: impl RequestHandler + 'static) {
        self.insert(path.into(), method, Box::new(handler));
    }

    fn insert(&mut self, path: String, method: Method, handler: Box<dyn RequestHandler>) {
        assert!(path.starts_with('/'), "route path must start with '/', got {path:?}");

        let methods = self.routes.entry(path).or_default();
        if methods.insert(method, handler).is_some() {
            debug!(%method, "replaced previously registered handler");
        }
    }

    /// Looks up the handler for `path` and `method`.
    ///
    /// A method outside [`Method`] never matches, so on a known path it yields
    /// [`Dispatch::MethodNotAllowed`].
    pub fn dispatch(&self, path: &str, method: &http::Method) -> Dispatch<'_> {
        let Some(methods) = self.routes.get(path) else {
            return Dispatch::NotFound;
        };

        Method::try_from(method)
            .ok()
            .and_then(|method| methods.get(&method))
            .map_or(Dispatch::MethodNotAllowed, |handler| Dispatch::Found(handler.as_ref()))
    }

    /// The methods registered for `path`, in [`Method`] order. Empty for an
    /// unknown path.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let mut methods = self.routes.get(path).map(|methods| methods.keys().copied().collect::<Vec<_>>()).unwrap_or_default();
        methods.sort_unstable();
        methods
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.routes.keys().map(|path| (path, self.allowed_methods(path)))).finish()
    }
}

impl<'router> Dispatch<'router> {
    pub fn handler(&self) -> Option<&'router dyn RequestHandler> {
        match self {
            Dispatch::Found(handler) => Some(*handler),
            Dispatch::NotFound | Dispatch::MethodNotAllowed => None,
        }
    }
}

impl fmt::Debug for Dispatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Found(_) => f.write_str("Found"),
            Dispatch::NotFound => f.write_str("NotFound"),
            Dispatch::MethodNotAllowed => f.write_str("MethodNotAllowed"),
        }
    }
}

/// Collects routes and builds a [`Router`]; later routes for the same
/// (path, method) win.
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<(String, MethodRoute)>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, route: impl Into<String>, method_route: MethodRoute) -> Self {
        self.routes.push((route.into(), method_route));
        self
    }

    /// # Panics
    ///
    /// Panics if a route path does not start with `/`.
    pub fn build(self) -> Router {
        let mut router = Router::new();
        for (path, MethodRoute { method, handler }) in self.routes {
            router.insert(path, method, handler);
        }
        router
    }
}

impl fmt::Debug for RouterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes.iter().map(|(path, route)| (path, route.method))).finish()
    }
}

/// A handler bound to one method, waiting for a path.
pub struct MethodRoute {
    method: Method,
    handler: Box<dyn RequestHandler>,
}

impl MethodRoute {
    pub fn new(method: Method, handler: impl RequestHandler + 'static) -> Self {
        Self { method, handler: Box::new(handler) }
    }
}

impl fmt::Debug for MethodRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRoute").field("method", &self.method).finish_non_exhaustive()
    }
}

macro_rules! method_route {
    ($fn_name:ident, $method:ident) => {
        pub fn $fn_name<H: RequestHandler + 'static>(handler: H) -> MethodRoute {
            MethodRoute::new(Method::$method, handler)
        }
    };
}

method_route!(get, Get);
method_route!(post, Post);
method_route!(put, Put);
method_route!(patch, Patch);
method_route!(delete, Delete);
