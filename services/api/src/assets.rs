use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub(crate) const INDEX_DOCUMENT: &str = "index.html";

/// Files served from the dashboard's static directory.
#[derive(Debug, Clone)]
pub(crate) struct StaticAssets {
    root: Arc<PathBuf>,
}

impl StaticAssets {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request path onto the root, refusing anything but plain segments.
    pub(crate) fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let mut resolved = self.root.to_path_buf();
        let mut segments = 0;
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(segment) => {
                    resolved.push(segment);
                    segments += 1;
                }
                Component::CurDir => {}
                _ => return None,
            }
        }

        (segments > 0).then_some(resolved)
    }

    pub(crate) async fn serve(&self, relative: &str) -> Response {
        let Some(path) = self.resolve(relative) else {
            return asset_not_found();
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let content_type = mime_guess::from_path(&path)
                    .first_or_octet_stream()
                    .to_string();
                (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes).into_response()
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "static asset unavailable");
                asset_not_found()
            }
        }
    }
}

fn asset_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "asset not found" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_traversal() {
        let assets = StaticAssets::new(PathBuf::from("static"));
        assert_eq!(
            assets.resolve("js/script.js"),
            Some(PathBuf::from("static/js/script.js"))
        );
        assert!(assets.resolve("../Cargo.toml").is_none());
        assert!(assets.resolve("/etc/passwd").is_none());
        assert!(assets.resolve("").is_none());
    }

    #[tokio::test]
    async fn missing_assets_are_not_found() {
        let assets = StaticAssets::new(std::env::temp_dir().join("attendance-insights-no-assets"));
        let response = assets.serve("script.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
