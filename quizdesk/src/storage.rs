//! Persistence of documents and submissions in a data directory.
//!
//! Every file holds one versioned JSON record:
//!
//! ```json
//! { "version": 1, "record": { ... } }
//! ```
//!
//! Documents live in `<kind><id>.json`, submissions next to them in
//! `<kind><id>-userAnswers-<taker>.json`.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use quizdesk_types::{Document, DocumentKind, Submission};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::info;

/// Record format written by this version.
pub const RECORD_VERSION: u32 = 1;

const SUBMISSION_MARKER: &str = "-userAnswers-";
const EXTENSION: &str = ".json";

/// Error type for reading and writing the data directory.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid record: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} has record version {found}, expected {expected}", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("No {kind} ids are left after {last}")]
    IdsExhausted { kind: DocumentKind, last: u32 },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[derive(Serialize)]
struct RecordOut<'a, T> {
    version: u32,
    record: &'a T,
}

#[derive(Deserialize)]
struct Header {
    version: u32,
}

#[derive(Deserialize)]
struct RecordIn<T> {
    record: T,
}

/// A data directory holding documents and their submissions.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the data directory if it does not exist yet. Saving does this too.
    pub fn ensure_root(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))
    }

    pub fn document_path(&self, kind: DocumentKind, id: u32) -> PathBuf {
        self.root.join(format!("{kind}{id}{EXTENSION}"))
    }

    pub fn submission_path(&self, kind: DocumentKind, id: u32, taker: &str) -> PathBuf {
        self.root.join(format!(
            "{kind}{id}{SUBMISSION_MARKER}{}{EXTENSION}",
            sanitize_taker(taker)
        ))
    }

    /// Ids of every saved document of `kind`, ascending.
    ///
    /// A missing data directory holds no documents.
    pub fn document_ids(&self, kind: DocumentKind) -> Result<Vec<u32>, StoreError> {
        let mut ids: Vec<u32> = self
            .file_names()?
            .iter()
            .filter_map(|name| parse_document_name(name, kind))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// The id a new document of `kind` should get.
    pub fn next_id(&self, kind: DocumentKind) -> Result<u32, StoreError> {
        let last = self.document_ids(kind)?.last().copied().unwrap_or(0);
        last.checked_add(1).ok_or(StoreError::IdsExhausted { kind, last })
    }

    /// Write `document` to its file, replacing any previous version.
    pub fn save_document(&self, document: &Document) -> Result<PathBuf, StoreError> {
        self.ensure_root()?;
        let path = self.document_path(document.kind(), document.id());
        write_record(&path, document)?;
        info!(path = %path.display(), questions = document.len(), "saved {}", document.kind());
        Ok(path)
    }

    pub fn load_document(&self, kind: DocumentKind, id: u32) -> Result<Document, StoreError> {
        let path = self.document_path(kind, id);
        let document: Document = read_record(&path)?;
        info!(path = %path.display(), "loaded {kind}");
        Ok(document)
    }

    /// Write `submission`. A second submission by the same taker replaces the first.
    pub fn save_submission(&self, submission: &Submission) -> Result<PathBuf, StoreError> {
        self.ensure_root()?;
        let path = self.submission_path(
            submission.kind(),
            submission.document_id(),
            submission.taker(),
        );
        write_record(&path, submission)?;
        info!(path = %path.display(), taker = submission.taker(), "saved submission");
        Ok(path)
    }

    /// Paths of every submission to one document, sorted by file name.
    pub fn submission_paths(
        &self,
        kind: DocumentKind,
        id: u32,
    ) -> Result<Vec<PathBuf>, StoreError> {
        let mut names: Vec<String> = self
            .file_names()?
            .into_iter()
            .filter(|name| parse_submission_name(name, kind) == Some(id))
            .collect();
        names.sort();
        Ok(names.into_iter().map(|name| self.root.join(name)).collect())
    }

    pub fn load_submission(&self, path: &Path) -> Result<Submission, StoreError> {
        read_record(path)
    }

    fn file_names(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.root, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }
}

fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<(), StoreError> {
    let out = RecordOut {
        version: RECORD_VERSION,
        record,
    };
    let json = serde_json::to_string_pretty(&out).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let corrupt = |source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    };

    let header: Header = serde_json::from_str(&text).map_err(corrupt)?;
    if header.version != RECORD_VERSION {
        return Err(StoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: header.version,
            expected: RECORD_VERSION,
        });
    }
    let record: RecordIn<T> = serde_json::from_str(&text).map_err(corrupt)?;
    Ok(record.record)
}

/// Reduce a taker name to characters safe in a file name.
fn sanitize_taker(taker: &str) -> String {
    let cleaned: String = taker
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "anonymous".to_string()
    } else {
        cleaned
    }
}

fn parse_id(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// `test12.json` -> `Some(12)` for `DocumentKind::Test`.
fn parse_document_name(name: &str, kind: DocumentKind) -> Option<u32> {
    let digits = name.strip_prefix(kind.name())?.strip_suffix(EXTENSION)?;
    parse_id(digits)
}

/// `test12-userAnswers-ada.json` -> `Some(12)` for `DocumentKind::Test`.
fn parse_submission_name(name: &str, kind: DocumentKind) -> Option<u32> {
    let rest = name.strip_prefix(kind.name())?.strip_suffix(EXTENSION)?;
    let (digits, taker) = rest.split_once(SUBMISSION_MARKER)?;
    if taker.is_empty() {
        return None;
    }
    parse_id(digits)
}
