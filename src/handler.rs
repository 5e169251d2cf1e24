//! Handler trait and type erasure.
//!
//! The router stores handlers of different concrete types side by side, so
//! each one is boxed behind `dyn ErasedHandler`:
//!
//! ```text
//! fn ip(req: &Request) -> Response { … }   ← user writes this
//!        ↓ router.on(Method::Get, "/ip", ip)
//! ip.into_boxed_handler()                  ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(ip))                  ← stored as BoxedHandler
//!        ↓
//! handler.call(&req)                       ← one vtable dispatch per request
//! ```
//!
//! Handlers are plain synchronous functions of the request. They hold no
//! state between calls, which is what lets the server run them from any
//! connection task at once.

use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: &Request) -> Response;
}

#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any `fn(&Request) -> Response` (or closure of
/// that shape that is `Send + Sync`). The trait is sealed: only the blanket
/// impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F> private::Sealed for F where F: Fn(&Request) -> Response + Send + Sync + 'static {}

impl<F> Handler for F
where
    F: Fn(&Request) -> Response + Send + Sync + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F> ErasedHandler for FnHandler<F>
where
    F: Fn(&Request) -> Response,
{
    fn call(&self, req: &Request) -> Response {
        (self.0)(req)
    }
}
