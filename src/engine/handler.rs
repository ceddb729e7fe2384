//! Handler capability shared by routes and middleware.

use std::sync::Arc;

use crate::engine::context::Context;

/// A step in a request's chain: route handler or middleware alike.
///
/// Handlers communicate only through the [`Context`] they are given.
pub type Handler = Arc<dyn Fn(&mut Context) + Send + Sync>;

/// Box a closure or function as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut Context) + Send + Sync + 'static,
{
    Arc::new(f)
}
