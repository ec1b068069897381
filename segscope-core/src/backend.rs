//! Fetch and action boundary.
//!
//! A [`Backend`] hands out the two document shapes and accepts per-file
//! actions. Decoding happens exactly once, here; the rest of the crate never
//! re-parses strings.

use crate::analysis::AnalysisReport;
use crate::error::Error;
use crate::listing::{Catalog, IndexInfo};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Per-file actions a backend may accept. Fire-and-forget: the response body
/// is returned parsed but is never interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Revert,
    Damage,
}

impl Action {
    /// Suffix the backend uses to address this action for a file.
    pub fn suffix(self) -> &'static str {
        match self {
            Action::Revert => "re",
            Action::Damage => "da",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Revert => "revert",
            Action::Damage => "damage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed-but-uninterpreted response body from an action submission.
#[derive(Clone, Debug)]
pub struct ActionReceipt {
    pub body: serde_json::Value,
}

pub trait Backend {
    fn fetch_catalog(&self) -> Result<Catalog, Error>;
    fn fetch_analysis(&self, index: &str, file: &str) -> Result<AnalysisReport, Error>;
    fn submit(&self, action: Action, index: &str, file: &str) -> Result<ActionReceipt, Error>;
}

/// Document name marking a directory as one index of the exported tree.
pub const INDEX_DOC: &str = "index.json";

/// Backend over a metadata tree exported to disk.
///
/// Layout: every directory under the root holding an `index.json` is one
/// index, identified by its path relative to the root. Analysis documents
/// live beside it as `<file>.an.json`; canned action responses as
/// `<file>.re.json` / `<file>.da.json`. A missing action response means the
/// export cannot answer that action.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doc_path(&self, index: &str, file: &str, suffix: &str) -> PathBuf {
        self.root.join(index).join(format!("{file}.{suffix}.json"))
    }

    fn read_doc<T: DeserializeOwned>(&self, path: &Path) -> Result<T, Error> {
        let what = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|e| Error::io(what.as_str(), e))?;
        decode_doc(&raw, &what)
    }
}

impl Backend for FsBackend {
    fn fetch_catalog(&self) -> Result<Catalog, Error> {
        if !self.root.is_dir() {
            return Err(Error::NotFound(self.root.display().to_string()));
        }
        let mut indexes = Vec::new();
        for ent in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let ent = match ent {
                Ok(ent) => ent,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !ent.file_type().is_file() || ent.file_name().to_str() != Some(INDEX_DOC) {
                continue;
            }
            let mut info: IndexInfo = self.read_doc(ent.path())?;
            let dir = ent.path().parent().unwrap_or(&self.root);
            info.path = dir
                .strip_prefix(&self.root)
                .unwrap_or(dir)
                .to_string_lossy()
                .replace('\\', "/");
            debug!(index = %info.path, files = info.files.files.len(), "loaded index document");
            indexes.push(info);
        }
        Ok(Catalog { indexes })
    }

    fn fetch_analysis(&self, index: &str, file: &str) -> Result<AnalysisReport, Error> {
        self.read_doc(&self.doc_path(index, file, "an"))
    }

    fn submit(&self, action: Action, index: &str, file: &str) -> Result<ActionReceipt, Error> {
        let path = self.doc_path(index, file, action.suffix());
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(%action, index, file, "no canned response, action unsupported");
                return Err(Error::Unsupported { op: action.name() });
            }
            Err(e) => {
                return Err(Error::Transport { what: path.display().to_string(), source: e })
            }
        };
        let body = decode_value(&raw, &path.display().to_string())?;
        Ok(ActionReceipt { body })
    }
}

/// One decode step for boundary documents: the payload is either the
/// document itself or a JSON-encoded string containing it.
pub fn decode_doc<T: DeserializeOwned>(raw: &str, what: &str) -> Result<T, Error> {
    match serde_json::from_str::<T>(raw) {
        Ok(doc) => Ok(doc),
        Err(outer) => {
            if let Ok(inner) = serde_json::from_str::<String>(raw) {
                return serde_json::from_str(&inner)
                    .map_err(|e| Error::Malformed { what: what.to_string(), source: e });
            }
            Err(Error::Malformed { what: what.to_string(), source: outer })
        }
    }
}

/// Like [`decode_doc`] for untyped bodies, where a bare JSON string needs
/// the explicit unwrap check.
pub fn decode_value(raw: &str, what: &str) -> Result<serde_json::Value, Error> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| Error::Malformed { what: what.to_string(), source: e })?;
    if let serde_json::Value::String(inner) = &value {
        if let Ok(unwrapped) = serde_json::from_str(inner) {
            return Ok(unwrapped);
        }
    }
    Ok(value)
}
