use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Analysis of one commit file: segment descriptions keyed opaquely by the
/// backend. Key order carries no meaning.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(transparent)]
pub struct AnalysisReport {
    pub segments: HashMap<String, SegmentInfo>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SegmentInfo {
    pub segment_sequence: u32,
    pub segment_name: String,
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// Backend diagnostic when the commit file could not be read. An entry
    /// carrying this has no usable commits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corruption: Option<String>,
}

/// A recorded association between a segment and the files it touched, plus
/// whatever per-commit detail the backend chose to emit.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Commit {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub doccount: Option<i64>,
    #[serde(default)]
    pub delcount: Option<i64>,
    #[serde(default)]
    pub delgen: Option<i64>,
    #[serde(default, rename = "hasDeletions")]
    pub has_deletions: Option<bool>,
    #[serde(default, rename = "sizeInBytes")]
    pub size_in_bytes: Option<u64>,
    #[serde(default)]
    pub version: Option<String>,
}
