//! Page loading from files and HTTP(S) URLs.
//!
//! A source string is either an `http://`/`https://` URL, fetched with
//! `reqwest`, or a filesystem path (optionally `file://`-prefixed). Both
//! produce a [`StaticPage`] via [`html::parse_page`](crate::html::parse_page).
//! File pages get a `file://` URL built from the canonical path, so
//! location detection sees the file name the same way it would see a URL.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use page_context_core::source::memory::StaticPage;
use page_context_core::tables::Tables;

use crate::config::FetchConfig;
use crate::html::parse_page;

/// Page loading error.
#[derive(Debug)]
pub enum LoadError {
    Io(PathBuf, std::io::Error),
    Http(String),
    UnsupportedScheme(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(path, e) => write!(f, "failed to read {}: {}", path.display(), e),
            LoadError::Http(e) => write!(f, "HTTP fetch failed: {}", e),
            LoadError::UnsupportedScheme(s) => write!(f, "unsupported URL scheme: {}", s),
        }
    }
}

impl std::error::Error for LoadError {}

/// Something that can turn a source string into a page snapshot.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, source: &str) -> Result<StaticPage, LoadError>;
}

/// Loads `http(s)://` URLs with `reqwest` and everything else from disk.
pub struct DefaultLoader {
    client: reqwest::Client,
    tables: Arc<Tables>,
}

impl DefaultLoader {
    pub fn new(fetch: &FetchConfig, tables: Arc<Tables>) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(fetch.timeout_secs))
            .user_agent(fetch.user_agent.clone())
            .build()
            .map_err(|e| LoadError::Http(e.to_string()))?;
        Ok(Self { client, tables })
    }

    async fn load_http(&self, url: &str) -> Result<StaticPage, LoadError> {
        tracing::debug!(url, "fetching page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LoadError::Http(e.to_string()))?;
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Http(e.to_string()))?;
        Ok(parse_page(&final_url, &body, &self.tables))
    }

    async fn load_file(&self, path: PathBuf) -> Result<StaticPage, LoadError> {
        tracing::debug!(path = %path.display(), "reading page");
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| LoadError::Io(path.clone(), e))?;
        let canonical = tokio::fs::canonicalize(&path)
            .await
            .unwrap_or_else(|_| path.clone());
        let url = format!("file://{}", canonical.display());
        Ok(parse_page(&url, &body, &self.tables))
    }
}

#[async_trait]
impl PageLoader for DefaultLoader {
    async fn load(&self, source: &str) -> Result<StaticPage, LoadError> {
        match source.split_once("://") {
            Some(("http", _)) | Some(("https", _)) => self.load_http(source).await,
            Some(("file", path)) => self.load_file(PathBuf::from(path)).await,
            Some((scheme, _)) => Err(LoadError::UnsupportedScheme(scheme.to_string())),
            None => self.load_file(PathBuf::from(source)).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_context_core::source::PageSource;
    use std::fs;
    use tempfile::TempDir;

    fn loader() -> DefaultLoader {
        DefaultLoader::new(&FetchConfig::default(), Arc::new(Tables::builtin())).unwrap()
    }

    #[tokio::test]
    async fn loads_file_with_file_url() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("altadena.html");
        fs::write(&path, "<html><head><title>Altadena</title></head></html>").unwrap();

        let page = loader().load(path.to_str().unwrap()).await.unwrap();
        assert!(page.url().starts_with("file://"));
        assert!(page.url().ends_with("altadena.html"));
        assert_eq!(page.title(), "Altadena");
    }

    #[tokio::test]
    async fn file_scheme_accepted() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.html");
        fs::write(&path, "<title>T</title>").unwrap();

        let source = format!("file://{}", path.display());
        let page = loader().load(&source).await.unwrap();
        assert_eq!(page.title(), "T");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = loader().load("/definitely/not/here.html").await.unwrap_err();
        assert!(matches!(err, LoadError::Io(_, _)));
    }

    #[tokio::test]
    async fn unknown_scheme_rejected() {
        let err = loader().load("ftp://x.test/page").await.unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedScheme(ref s) if s == "ftp"));
    }
}
