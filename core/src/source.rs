use crate::error::{IndexError, Result};
use crate::index::{build_index, SearchIndex};
use crate::tokenizer::NoiseWords;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Supplies the raw whitespace-delimited tokens of a document.
pub trait TokenSource {
    fn tokens(&self, document: &str) -> Result<Vec<String>>;
}

/// Reads documents from disk. Relative document names resolve against `root`.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub root: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn path_of(&self, document: &str) -> PathBuf { self.root.join(document) }
}

impl TokenSource for FileSource {
    fn tokens(&self, document: &str) -> Result<Vec<String>> {
        let path = self.path_of(document);
        let text = fs::read_to_string(&path).map_err(|e| IndexError::source_unavailable("document", &path, e))?;
        Ok(split_words(&text))
    }
}

/// Documents held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    docs: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, document: impl Into<String>, text: impl Into<String>) -> Self {
        self.docs.insert(document.into(), text.into());
        self
    }
}

impl TokenSource for MemorySource {
    fn tokens(&self, document: &str) -> Result<Vec<String>> {
        match self.docs.get(document) {
            Some(text) => Ok(split_words(text)),
            None => Err(IndexError::source_unavailable(
                "document",
                document,
                io::Error::new(io::ErrorKind::NotFound, "no such document"),
            )),
        }
    }
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Document names listed in a manifest file, in listed order.
pub fn load_manifest(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| IndexError::source_unavailable("manifest", path, e))?;
    Ok(split_words(&text))
}

pub fn load_noise_words(path: &Path) -> Result<NoiseWords> {
    let text = fs::read_to_string(path).map_err(|e| IndexError::source_unavailable("noise-word list", path, e))?;
    Ok(text.split_whitespace().collect())
}

/// Builds the index from a manifest of document files and a noise-word file.
pub fn build_from_files(manifest: &Path, noise_file: &Path) -> Result<SearchIndex> {
    let noise_words = load_noise_words(noise_file)?;
    let documents = load_manifest(manifest)?;
    let root = manifest.parent().unwrap_or_else(|| Path::new(""));
    tracing::info!(documents = documents.len(), noise_words = noise_words.len(), root = %root.display(), "building index");
    build_index(&documents, noise_words, &FileSource::new(root))
}
