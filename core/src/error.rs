use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    /// A manifest, noise-word list or document could not be read. Aborts the whole build.
    #[error("{what} unavailable: {}", path.display())]
    SourceUnavailable {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    pub fn source_unavailable(what: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable { what, path: path.into(), source }
    }
}

pub type Result<T> = core::result::Result<T, IndexError>;
