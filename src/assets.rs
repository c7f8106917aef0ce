//! Filesystem-backed asset store.
//!
//! Serves the pre-built card tree (`v1/index.json`, `v1/{kind}/index.json`,
//! `v1/{kind}/{slug}.json`, `v1/agents/{slug}/a2a.json`) straight from disk.
//! The tree is produced and validated by a separate build step; this store
//! only reads it, and an empty or half-written tree simply yields 404s.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use http::{Method, StatusCode};
use tracing::{debug, error};

use crate::fetch::Fetch;
use crate::request::Request;
use crate::response::{self, ContentType, Response};

/// A static file tree rooted at one directory.
#[derive(Clone, Debug)]
pub struct StaticDir {
    root: PathBuf,
}

impl StaticDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a URL path onto the tree. `None` if the path would leave the root.
    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for component in Path::new(url_path.trim_start_matches('/')).components() {
            match component {
                Component::Normal(segment) => path.push(segment),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(path)
    }

    /// Answers one request from the tree.
    ///
    /// `GET` returns the file, `HEAD` its headers; other methods get `405`.
    /// Missing files, directories and escaping paths are all `404`.
    pub async fn serve(&self, req: Request) -> Response {
        let head = match *req.method() {
            Method::GET => false,
            Method::HEAD => true,
            _ => return response::method_not_allowed("GET, HEAD"),
        };

        let Some(path) = self.map_path(req.uri().path()) else {
            debug!(path = %req.uri().path(), "path escapes asset root");
            return response::not_found();
        };

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => return response::not_found(),
            Err(e) if is_missing(e.kind()) => return response::not_found(),
            Err(e) => {
                error!(path = %path.display(), "asset stat failed: {e}");
                return response::status(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        let content_type = ContentType::from_extension(
            path.extension().and_then(|ext| ext.to_str()).unwrap_or(""),
        );

        if head {
            return response::head(content_type, metadata.len());
        }

        match tokio::fs::read(&path).await {
            Ok(data) => response::bytes(content_type, data),
            Err(e) if is_missing(e.kind()) => response::not_found(),
            Err(e) => {
                error!(path = %path.display(), "asset read failed: {e}");
                response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Shares the store as a router collaborator.
    pub fn into_fetch(self: Arc<Self>) -> impl Fetch {
        move |req: Request| {
            let dir = Arc::clone(&self);
            async move { dir.serve(req).await }
        }
    }
}

fn is_missing(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::NotFound | ErrorKind::NotADirectory)
}
