//! License catalog loading, filtering, and paging.
//!
//! The catalog is the set of license-kind labels known to the Bazel
//! workspace, loaded once per run by querying the
//! `@package_metadata//licenses/spdx` package. The query runs behind
//! the narrow [`LicenseSource`] seam so the filtering and paging logic
//! is testable against a fake source.
//!
//! Menu composition is fixed: the "no license" sentinel first, then up
//! to [`PAGE_SIZE`] matching entries, then a "refine search" sentinel
//! only when more entries match than fit the page, then the "custom
//! label" sentinel last. Sentinels never participate in filtering.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::util::process::ProcessBuilder;

/// Display label for the "omit the license field" sentinel.
pub const NO_LICENSE_LABEL: &str = "No license / unknown (omit license_kind_label)";

/// Display label for the "free-text label" sentinel.
pub const CUSTOM_LABEL: &str = "Other (enter custom label)";

/// Display label for the pagination sentinel.
pub const REFINE_LABEL: &str = "Refine search";

/// Maximum number of catalog entries shown per page.
pub const PAGE_SIZE: usize = 20;

/// Bazel target pattern for the license taxonomy.
pub const LICENSE_QUERY_PATTERN: &str = "@package_metadata//licenses/spdx:*";

/// Failure to obtain the catalog. Always fatal; there is no offline
/// fallback.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to run license query: {0}")]
    Spawn(String),

    #[error("license query failed with exit code {code:?}\n{stderr}")]
    QueryFailed { code: Option<i32>, stderr: String },
}

/// Source of raw license labels, one fully-qualified label per entry.
pub trait LicenseSource {
    fn list_labels(&self) -> Result<Vec<String>, CatalogError>;
}

/// The real catalog collaborator: `bazel query --output=label` run in
/// the workspace root.
#[derive(Debug, Clone)]
pub struct BazelLicenseQuery {
    program: PathBuf,
    workspace: PathBuf,
}

impl BazelLicenseQuery {
    pub fn new(program: impl Into<PathBuf>, workspace: impl AsRef<Path>) -> Self {
        BazelLicenseQuery {
            program: program.into(),
            workspace: workspace.as_ref().to_path_buf(),
        }
    }
}

impl LicenseSource for BazelLicenseQuery {
    fn list_labels(&self) -> Result<Vec<String>, CatalogError> {
        let builder = ProcessBuilder::new(&self.program)
            .args(["query", "--output=label", LICENSE_QUERY_PATTERN])
            .cwd(&self.workspace);

        tracing::debug!("running license query: {}", builder.display_command());

        let output = builder
            .exec()
            .map_err(|e| CatalogError::Spawn(format!("{:#}", e)))?;

        if !output.status.success() {
            return Err(CatalogError::QueryFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// One selectable license from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseEntry {
    /// Short identifier shown in the menu (the part after the last `:`).
    pub display: String,
    /// The full Bazel label recorded in the stanza.
    pub label: String,
}

/// What selecting a menu item means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Omit `license_kind_label` from the stanza.
    NoLicense,
    /// Use this full label.
    License(String),
    /// Prompt for new filter text and redisplay.
    Refine,
    /// Prompt for a verbatim free-text label.
    Custom,
}

/// One page of the license menu.
#[derive(Debug, Clone)]
pub struct LicensePage {
    /// Display text and meaning for each menu item, in order.
    pub items: Vec<(String, MenuChoice)>,
    /// Matching catalog entries before truncation.
    pub match_count: usize,
    /// Catalog entries actually shown on this page.
    pub shown: usize,
}

/// The immutable, session-scoped license catalog.
#[derive(Debug, Clone)]
pub struct LicenseCatalog {
    entries: Vec<LicenseEntry>,
}

impl LicenseCatalog {
    /// Load the catalog once: trim, drop empties, sort, dedup.
    pub fn load(source: &dyn LicenseSource) -> Result<Self, CatalogError> {
        let mut labels: Vec<String> = source
            .list_labels()?
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        labels.sort();
        labels.dedup();

        let entries = labels
            .into_iter()
            .map(|label| {
                let display = label
                    .rsplit(':')
                    .next()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(label.as_str())
                    .to_string();
                LicenseEntry { display, label }
            })
            .collect();

        Ok(LicenseCatalog { entries })
    }

    /// Number of catalog entries (sentinels excluded).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog entries whose display label contains `filter`,
    /// case-insensitively. An empty filter matches everything.
    pub fn matches(&self, filter: &str) -> Vec<&LicenseEntry> {
        if filter.is_empty() {
            return self.entries.iter().collect();
        }
        let needle = filter.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.display.to_lowercase().contains(&needle))
            .collect()
    }

    /// Build the menu page for the current filter.
    pub fn page(&self, filter: &str) -> LicensePage {
        let matches = self.matches(filter);
        let match_count = matches.len();
        let shown = match_count.min(PAGE_SIZE);

        let mut items = Vec::with_capacity(shown + 3);
        items.push((NO_LICENSE_LABEL.to_string(), MenuChoice::NoLicense));
        for entry in &matches[..shown] {
            items.push((entry.display.clone(), MenuChoice::License(entry.label.clone())));
        }
        if match_count > PAGE_SIZE {
            items.push((REFINE_LABEL.to_string(), MenuChoice::Refine));
        }
        items.push((CUSTOM_LABEL.to_string(), MenuChoice::Custom));

        LicensePage {
            items,
            match_count,
            shown,
        }
    }
}
