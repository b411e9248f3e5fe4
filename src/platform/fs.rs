//! Document sources: where raw Markdown comes from.

use std::collections::HashMap;

use futures::future::BoxFuture;

use crate::error::{Error, Result};

/// Provides raw document text for a document identifier.
pub trait SourceProvider: Send + Sync {
    fn read<'a>(&'a self, document: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Filesystem source: the document identifier is a path.
#[derive(Debug, Default)]
pub struct FsSource;

impl FsSource {
    pub fn new() -> Self {
        FsSource
    }
}

impl SourceProvider for FsSource {
    fn read<'a>(&'a self, document: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            tokio::fs::read_to_string(document)
                .await
                .map_err(|err| Error::Source(format!("{document}: {err}")))
        })
    }
}

/// In-memory source keyed by document identifier, for tests and embedding.
#[derive(Debug, Default)]
pub struct StaticSource {
    documents: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        StaticSource::default()
    }

    pub fn with(mut self, document: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(document.into(), text.into());
        self
    }
}

impl SourceProvider for StaticSource {
    fn read<'a>(&'a self, document: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            self.documents
                .get(document)
                .cloned()
                .ok_or_else(|| Error::Source(format!("{document}: unknown document")))
        })
    }
}
