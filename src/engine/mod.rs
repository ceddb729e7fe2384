//! Request engine: registration and per-request dispatch.
//!
//! # Data Flow
//! ```text
//! Request (method, decoded path)
//!     → collect middleware of every group whose prefix starts the path
//!     → context.rs (fresh Context, chain = middleware)
//!     → routing (resolve path; append route handler or 404 fallback)
//!     → Context::next() runs the chain
//!     → Response
//! ```
//!
//! # Design Decisions
//! - Setup then serve: registration needs `&mut Engine`, dispatch only `&Engine`
//! - Group prefixes are plain string prefixes; overlapping groups all contribute
//! - Middleware order follows group creation order, not nesting depth
//! - A missing route is not an error; the 404 handler runs after the middleware
//! - Templates are shared read-only with every request's context

pub mod context;
pub mod group;
pub mod handler;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use tera::{Filter, Tera};

use crate::files::FileSystem;
use crate::http::{Request, Response};
use crate::middleware::{logger, recovery};
use crate::routing::RouteTable;

pub use context::Context;
pub use group::{GroupId, RouterGroup};
pub use handler::{handler, Handler};

use group::GroupData;

/// Routes, groups and their middleware.
pub struct Engine {
    pub(crate) groups: Vec<GroupData>,
    pub(crate) router: RouteTable<Handler>,
    templates: Arc<Tera>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with only the root group and no routes.
    pub fn new() -> Self {
        Self {
            groups: vec![GroupData::root()],
            router: RouteTable::new(),
            templates: Arc::default(),
        }
    }

    /// [`Engine::new`] with request logging and panic recovery on the root group.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.use_middleware([logger(), recovery()]);
        engine
    }

    pub(crate) fn new_group(&mut self, parent: GroupId, prefix: &str) -> GroupId {
        let prefix = format!("{}{}", self.groups[parent.0].prefix, prefix);
        let id = GroupId(self.groups.len());
        tracing::debug!(prefix = %prefix, "Group created");
        self.groups.push(GroupData {
            prefix,
            middlewares: Vec::new(),
            parent: Some(parent),
        });
        id
    }

    /// The implicit root group (empty prefix).
    pub fn root(&mut self) -> RouterGroup<'_> {
        RouterGroup::new(self, GroupId::ROOT)
    }

    /// Create a top-level group.
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        let id = self.new_group(GroupId::ROOT, prefix);
        RouterGroup::new(self, id)
    }

    /// Reopen a group created earlier.
    pub fn group_by_id(&mut self, id: GroupId) -> Option<RouterGroup<'_>> {
        if id.0 < self.groups.len() {
            Some(RouterGroup::new(self, id))
        } else {
            None
        }
    }

    /// Number of groups, the root included.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn routes(&self) -> &RouteTable<Handler> {
        &self.router
    }

    pub fn use_middleware<I>(&mut self, middlewares: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.root().use_middleware(middlewares);
        self
    }

    pub fn route<F>(&mut self, method: &str, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.root().route(method, pattern, f);
        self
    }

    pub fn get<F>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.root().get(pattern, f);
        self
    }

    pub fn post<F>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.root().post(pattern, f);
        self
    }

    pub fn static_files(&mut self, relative_path: &str, root: impl Into<PathBuf>) -> &mut Self {
        self.root().static_files(relative_path, root);
        self
    }

    pub fn static_fs<F>(&mut self, relative_path: &str, fs: F) -> &mut Self
    where
        F: FileSystem + 'static,
    {
        self.root().static_fs(relative_path, fs);
        self
    }

    /// Make `filter` available to templates as `name`.
    pub fn register_filter<F>(&mut self, name: &str, filter: F) -> &mut Self
    where
        F: Filter + 'static,
    {
        Arc::make_mut(&mut self.templates).register_filter(name, filter);
        self
    }

    /// Parse every template matching `glob`, e.g. `"templates/*.html"`.
    ///
    /// Templates are named by their path below the glob's directory. Filters and
    /// templates registered earlier stay available unless a new file takes the name.
    pub fn load_templates(&mut self, glob: &str) -> Result<&mut Self, tera::Error> {
        let mut loaded = Tera::new(glob)?;
        loaded.extend(&self.templates)?;
        tracing::debug!(
            glob = %glob,
            templates = loaded.get_template_names().count(),
            "Templates loaded"
        );
        self.templates = Arc::new(loaded);
        Ok(self)
    }

    pub fn templates(&self) -> &Tera {
        &self.templates
    }

    /// Run `request` through its middleware and route handler.
    pub fn handle(&self, request: Request) -> Response {
        let middlewares: Vec<Handler> = self
            .groups
            .iter()
            .filter(|group| request.path().starts_with(&group.prefix))
            .flat_map(|group| group.middlewares.iter().cloned())
            .collect();

        let mut c = Context::new(request, middlewares);
        c.set_templates(self.templates.clone());
        match self.router.lookup(c.method(), c.path()) {
            Some((route, matched)) => {
                let route = route.clone();
                c.set_params(matched.params);
                c.push_handler(route);
            }
            None => {
                tracing::debug!(method = %c.method(), path = %c.path(), "No route matched");
                c.push_handler(handler(not_found));
            }
        }

        c.next();
        c.into_response()
    }

    /// [`Engine::handle`] for a body-less request.
    pub fn dispatch(&self, method: &str, path: &str) -> Response {
        self.handle(Request::new(method, path))
    }
}

fn not_found(c: &mut Context) {
    let body = format!("404 Not Found - {}\n", c.path());
    c.string(StatusCode::NOT_FOUND, body);
}
