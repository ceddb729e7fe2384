//! Route groups: shared prefixes and middleware.
//!
//! # Responsibilities
//! - Compose nested prefixes (`/api` + `/v1` = `/api/v1`)
//! - Collect middleware in the order it is added
//! - Register routes and static mounts under the group prefix
//!
//! # Design Decisions
//! - Groups live in a flat list owned by the engine; a `GroupId` indexes it
//! - A group's parent never changes after creation
//! - Groups are never removed

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{Method, StatusCode};

use crate::engine::context::Context;
use crate::engine::handler::{handler, Handler};
use crate::engine::Engine;
use crate::files::{Dir, FileSystem};

/// Index of a group inside its engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    /// The engine's implicit root group, with an empty prefix.
    pub const ROOT: GroupId = GroupId(0);
}

pub(crate) struct GroupData {
    pub(crate) prefix: String,
    pub(crate) middlewares: Vec<Handler>,
    pub(crate) parent: Option<GroupId>,
}

impl GroupData {
    pub(crate) fn root() -> Self {
        Self {
            prefix: String::new(),
            middlewares: Vec::new(),
            parent: None,
        }
    }
}

/// A handle for registering into one group of an [`Engine`].
pub struct RouterGroup<'e> {
    engine: &'e mut Engine,
    id: GroupId,
}

impl<'e> RouterGroup<'e> {
    pub(crate) fn new(engine: &'e mut Engine, id: GroupId) -> Self {
        Self { engine, id }
    }

    fn data(&self) -> &GroupData {
        &self.engine.groups[self.id.0]
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Full prefix, including every ancestor's.
    pub fn prefix(&self) -> &str {
        &self.data().prefix
    }

    pub fn parent(&self) -> Option<GroupId> {
        self.data().parent
    }

    /// Create a child group whose prefix extends this one.
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        let id = self.engine.new_group(self.id, prefix);
        RouterGroup::new(&mut *self.engine, id)
    }

    /// Append middleware; it runs for every request whose path starts with this prefix.
    pub fn use_middleware<I>(&mut self, middlewares: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.engine.groups[self.id.0].middlewares.extend(middlewares);
        self
    }

    /// Register `f` for `method` at this group's prefix + `pattern`.
    pub fn route<F>(&mut self, method: &str, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add_route(method, pattern, handler(f))
    }

    fn add_route(&mut self, method: &str, pattern: &str, handler: Handler) -> &mut Self {
        let pattern = format!("{}{}", self.prefix(), pattern);
        tracing::debug!(method = %method, pattern = %pattern, "Route registered");
        self.engine.router.add_route(method, &pattern, handler);
        self
    }

    pub fn get<F>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::GET.as_str(), pattern, f)
    }

    pub fn post<F>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::POST.as_str(), pattern, f)
    }

    pub fn put<F>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::PUT.as_str(), pattern, f)
    }

    pub fn delete<F>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::DELETE.as_str(), pattern, f)
    }

    pub fn patch<F>(&mut self, pattern: &str, f: F) -> &mut Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::PATCH.as_str(), pattern, f)
    }

    /// Serve files under `root` at `relative_path/*filepath`.
    pub fn static_files(&mut self, relative_path: &str, root: impl Into<PathBuf>) -> &mut Self {
        self.static_fs(relative_path, Dir::new(root))
    }

    /// Serve files from any [`FileSystem`] at `relative_path/*filepath`.
    pub fn static_fs<F>(&mut self, relative_path: &str, fs: F) -> &mut Self
    where
        F: FileSystem + 'static,
    {
        let pattern = format!("{}/*filepath", relative_path.trim_end_matches('/'));
        let fs = Arc::new(fs);
        self.route(Method::GET.as_str(), &pattern, move |c| serve_file(fs.as_ref(), c))
    }
}

fn serve_file(fs: &dyn FileSystem, c: &mut Context) {
    let name = c.param("filepath").unwrap_or_default().to_string();
    match fs.open(&name) {
        Ok(file) => {
            let mime = mime_guess::from_path(&file.path).first_or_octet_stream();
            c.set_header("content-type", mime.as_ref());
            c.data(StatusCode::OK, file.contents);
        }
        Err(e) => {
            tracing::debug!(file = %name, error = %e, "Static file unavailable");
            c.status(StatusCode::NOT_FOUND);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_nested_prefixes() {
        let mut engine = Engine::new();
        let mut api = engine.group("/api");
        let api_id = api.id();
        let v1 = api.group("/v1");

        assert_eq!(v1.prefix(), "/api/v1");
        assert_eq!(v1.parent(), Some(api_id));
        let v1_id = v1.id();

        assert_eq!(engine.group_by_id(api_id).unwrap().parent(), Some(GroupId::ROOT));
        assert_eq!(engine.group_by_id(v1_id).unwrap().prefix(), "/api/v1");
        assert_eq!(engine.group_count(), 3);
    }

    #[test]
    fn test_group_route_uses_full_prefix() {
        let mut engine = Engine::new();
        engine
            .group("/api")
            .group("/v1")
            .get("/ping", |c| c.string(StatusCode::OK, "pong\n"));

        assert!(engine.routes().handler("GET", "/api/v1/ping").is_some());
        let response = engine.dispatch("GET", "/api/v1/ping");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.text(), "pong\n");
    }

    #[test]
    fn test_verb_helpers() {
        let mut engine = Engine::new();
        engine
            .root()
            .put("/r", |c| c.string(StatusCode::OK, "put"))
            .delete("/r", |c| c.string(StatusCode::OK, "delete"))
            .patch("/r", |c| c.string(StatusCode::OK, "patch"))
            .route("OPTIONS", "/r", |c| c.string(StatusCode::OK, "options"));

        for method in ["PUT", "DELETE", "PATCH", "OPTIONS"] {
            assert_eq!(
                engine.dispatch(method, "/r").text(),
                method.to_lowercase()
            );
        }
    }

    #[test]
    fn test_static_mount() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("css")).unwrap();
        fs::write(tmp.path().join("css/site.css"), "body{}").unwrap();

        let mut engine = Engine::new();
        engine.group("/v1").static_files("/assets", tmp.path());

        assert!(engine.routes().handler("GET", "/v1/assets/*filepath").is_some());

        let response = engine.dispatch("GET", "/v1/assets/css/site.css");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, b"body{}");
        assert_eq!(response.header("content-type"), Some("text/css"));

        let missing = engine.dispatch("GET", "/v1/assets/css/none.css");
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert!(missing.body.is_empty());
    }

    #[test]
    fn test_static_mount_trailing_slash() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();

        let mut engine = Engine::new();
        engine.static_files("/", tmp.path());

        assert!(engine.routes().handler("GET", "/*filepath").is_some());
        assert_eq!(engine.dispatch("GET", "/a.txt").text(), "a");
    }
}
