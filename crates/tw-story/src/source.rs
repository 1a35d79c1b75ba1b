//! Where story documents come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{LoadError, StoryResult};
use crate::graph::StoryGraph;

/// A provider of raw story documents, one per (story, language) pair.
pub trait StorySource {
    /// Fetch the JSON text of a story document.
    fn fetch(&self, story_id: &str, language: &str) -> StoryResult<String>;
}

/// Reads `<dir>/<story>_<language>.json` files.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory documents are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for a story and language.
    pub fn document_path(&self, story_id: &str, language: &str) -> PathBuf {
        self.dir.join(format!("{story_id}_{language}.json"))
    }
}

impl StorySource for DirSource {
    fn fetch(&self, story_id: &str, language: &str) -> StoryResult<String> {
        let path = self.document_path(story_id, language);
        std::fs::read_to_string(&path).map_err(|source| LoadError::Unreachable { path, source })
    }
}

/// Documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<(String, String), String>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    pub fn with_document(
        mut self,
        story_id: impl Into<String>,
        language: impl Into<String>,
        json: impl Into<String>,
    ) -> Self {
        self.insert(story_id, language, json);
        self
    }

    /// Add or replace a document.
    pub fn insert(
        &mut self,
        story_id: impl Into<String>,
        language: impl Into<String>,
        json: impl Into<String>,
    ) {
        self.documents
            .insert((story_id.into(), language.into()), json.into());
    }
}

impl StorySource for MemorySource {
    fn fetch(&self, story_id: &str, language: &str) -> StoryResult<String> {
        self.documents
            .get(&(story_id.to_string(), language.to_string()))
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                story: story_id.to_string(),
                language: language.to_string(),
            })
    }
}

/// Fetch and parse a story graph.
pub fn load<S: StorySource + ?Sized>(
    source: &S,
    story_id: &str,
    language: &str,
) -> StoryResult<StoryGraph> {
    let result = source
        .fetch(story_id, language)
        .and_then(|json| StoryGraph::from_json(story_id, language, &json));
    match &result {
        Ok(graph) => info!(
            story = story_id,
            language,
            nodes = graph.len(),
            "loaded story"
        ),
        Err(e) => error!(story = story_id, language, "failed to load story: {e}"),
    }
    result
}
