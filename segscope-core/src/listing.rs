use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix shared by every commit-point file in a segment directory.
pub const SEGMENTS_PREFIX: &str = "segments";
/// Name of the head commit marker.
pub const HEAD_COMMIT: &str = "segments.gen";

pub fn is_segment(name: &str) -> bool {
    name.starts_with(SEGMENTS_PREFIX)
}

pub fn is_past_commit(name: &str) -> bool {
    name.starts_with("segments_")
}

pub fn is_head_commit(name: &str) -> bool {
    name == HEAD_COMMIT
}

/// Every index the backend exposes.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Catalog {
    #[serde(default)]
    pub indexes: Vec<IndexInfo>,
}

impl Catalog {
    pub fn find(&self, path: &str) -> Option<&IndexInfo> {
        self.indexes.iter().find(|ix| ix.path == path)
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut IndexInfo> {
        self.indexes.iter_mut().find(|ix| ix.path == path)
    }
}

/// One index definition: its identity, its directory listing, and whatever
/// other properties the backend attached. Extra properties are carried for
/// display, never interpreted.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct IndexInfo {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub files: DirectoryListing,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Ordered file entries of one segment directory, plus the name lookup the
/// association builder fills in lazily on first use.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(transparent)]
pub struct DirectoryListing {
    pub files: Vec<FileEntry>,
    #[serde(skip)]
    pub(crate) by_name: Option<HashMap<String, usize>>,
}

impl DirectoryListing {
    pub fn new(files: Vec<FileEntry>) -> Self {
        Self { files, by_name: None }
    }

    pub fn get(&self, name: &str) -> Option<&FileEntry> {
        match &self.by_name {
            Some(map) => map.get(name).map(|&pos| &self.files[pos]),
            None => self.files.iter().find(|f| f.name == name),
        }
    }

    /// Number of commit points present, head marker included.
    pub fn generations(&self) -> usize {
        self.files.iter().filter(|f| is_segment(&f.name)).count()
    }
}

/// One file in a directory listing. `segment_sequence`, `segment_class` and
/// `segments` are derived locally and never read from the wire.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    /// Last modification, epoch milliseconds, when the backend exports one.
    #[serde(default)]
    pub modified: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_sequence: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<SegmentRef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

/// Deduplicated reference from a file to a segment that mentions it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SegmentRef {
    pub name: String,
    pub class: String,
}
