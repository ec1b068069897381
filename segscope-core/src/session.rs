//! View-model for one browsing session.
//!
//! Owns the loaded catalog, the set of successfully analyzed commit files,
//! and an explicit last-error state for the rendering layer. Single-owner by
//! construction: every mutation goes through `&mut self`.

use crate::analysis::AnalysisReport;
use crate::assoc;
use crate::backend::{Action, ActionReceipt, Backend};
use crate::error::Error;
use crate::listing::{Catalog, IndexInfo};
use std::collections::BTreeSet;
use tracing::warn;

pub struct Session<B> {
    backend: B,
    catalog: Option<Catalog>,
    analyzed: BTreeSet<(String, String)>,
    last_error: Option<String>,
}

impl<B: Backend> Session<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, catalog: None, analyzed: BTreeSet::new(), last_error: None }
    }

    /// Load (or reload) the catalog. A fetch failure leaves no data and is
    /// recorded; it is not fatal.
    pub fn reload(&mut self) {
        match self.backend.fetch_catalog() {
            Ok(catalog) => {
                self.catalog = Some(catalog);
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "catalog fetch failed");
                self.catalog = None;
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn index(&self, path: &str) -> Option<&IndexInfo> {
        self.catalog.as_ref()?.find(path)
    }

    /// Most recent failure, for an explicit error state in the UI.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch the analysis for `file` and merge its segment references into
    /// the index's listing. The pair is marked analyzed only when the whole
    /// report applied cleanly; a failed merge leaves it unmarked.
    pub fn analyze(&mut self, index: &str, file: &str) -> Result<AnalysisReport, Error> {
        let report = match self.backend.fetch_analysis(index, file) {
            Ok(report) => report,
            Err(e) => return Err(self.fail(e)),
        };
        let info = match self.catalog.as_mut().and_then(|c| c.find_mut(index)) {
            Some(info) => info,
            None => {
                let e = Error::UnknownIndex(index.to_string());
                return Err(self.fail(e));
            }
        };
        if let Err(e) = assoc::apply_analysis(&mut info.files, &report) {
            return Err(self.fail(Error::from(e)));
        }
        self.analyzed.insert((index.to_string(), file.to_string()));
        self.last_error = None;
        Ok(report)
    }

    pub fn is_analyzed(&self, index: &str, file: &str) -> bool {
        self.analyzed.contains(&(index.to_string(), file.to_string()))
    }

    /// Commit points present in the named index, head marker included.
    pub fn generations(&self, index: &str) -> usize {
        self.index(index).map(|ix| ix.files.generations()).unwrap_or(0)
    }

    /// Submit a fire-and-forget action. The receipt body is parsed but never
    /// interpreted; failures are recorded, not escalated into catalog loss.
    pub fn submit(&mut self, action: Action, index: &str, file: &str) -> Result<ActionReceipt, Error> {
        match self.backend.submit(action, index, file) {
            Ok(receipt) => Ok(receipt),
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn revert(&mut self, index: &str, file: &str) -> Result<ActionReceipt, Error> {
        self.submit(Action::Revert, index, file)
    }

    pub fn damage(&mut self, index: &str, file: &str) -> Result<ActionReceipt, Error> {
        self.submit(Action::Damage, index, file)
    }

    fn fail(&mut self, e: Error) -> Error {
        warn!(error = %e, "operation failed");
        self.last_error = Some(e.to_string());
        e
    }
}
