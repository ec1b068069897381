//! Segment-to-file association builder.
//!
//! Ingests an analysis report for one commit file and attaches deduplicated
//! segment references to every file the report's commits mention. The
//! listing is mutated in place; nothing is ever removed from it.

use crate::analysis::AnalysisReport;
use crate::error::UnknownFileError;
use crate::listing::{is_segment, DirectoryListing, SegmentRef};
use std::collections::HashMap;

/// Class labels are derived from the commit-point sequence number.
pub const SEGMENT_CLASS_PREFIX: &str = "segment_class_";

pub fn segment_class(sequence: u32) -> String {
    format!("{SEGMENT_CLASS_PREFIX}{sequence}")
}

/// Prepare a listing for association: sort by name, number the commit-point
/// files, build the name lookup. Idempotent; the second call is a no-op, so
/// numbering is stable however often a caller re-enters.
pub fn ensure_file_index(listing: &mut DirectoryListing) {
    if listing.by_name.is_some() {
        return;
    }
    listing.files.sort_by(|a, b| a.name.cmp(&b.name));
    let mut by_name = HashMap::with_capacity(listing.files.len());
    let mut sequence = 0u32;
    for (pos, file) in listing.files.iter_mut().enumerate() {
        if is_segment(&file.name) {
            file.segment_sequence = Some(sequence);
            file.segment_class = Some(segment_class(sequence));
            sequence += 1;
        }
        // Names are assumed unique within one directory.
        by_name.insert(file.name.clone(), pos);
    }
    listing.by_name = Some(by_name);
}

/// Merge one analysis report into the listing. Every file a commit mentions
/// gains a reference to the describing segment, once. A file name missing
/// from the listing aborts the merge with [`UnknownFileError`]; partial
/// mutation up to that point stays, but the report must then be treated as
/// failed by the caller.
pub fn apply_analysis(
    listing: &mut DirectoryListing,
    report: &AnalysisReport,
) -> Result<(), UnknownFileError> {
    ensure_file_index(listing);
    for info in report.segments.values() {
        let class = segment_class(info.segment_sequence);
        for commit in &info.commits {
            for name in &commit.files {
                let pos = match listing.by_name.as_ref().and_then(|m| m.get(name)) {
                    Some(&pos) => pos,
                    None => {
                        return Err(UnknownFileError {
                            file: name.clone(),
                            segment: info.segment_name.clone(),
                        })
                    }
                };
                let entry = &mut listing.files[pos];
                if !entry.segments.iter().any(|s| s.name == info.segment_name) {
                    entry.segments.push(SegmentRef {
                        name: info.segment_name.clone(),
                        class: class.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
