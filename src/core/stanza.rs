//! Stanza rendering.
//!
//! A [`Stanza`] is the fully-resolved record of one import, rendered
//! into the literal `oma.file(...)` / `oma.archive(...)` manifest
//! syntax with a fixed field-emission order.
//!
//! Values are emitted verbatim between literal double quotes. Embedded
//! quote or backslash characters in operator-supplied strings are not
//! escaped; this mirrors the manifests already in the wild and is a
//! known caveat of operator input.

use crate::core::request::{ArchiveOptions, ArtifactKind};

/// A fully-resolved declaration, ready for serialization.
#[derive(Debug, Clone)]
pub struct Stanza {
    pub kind: ArtifactKind,
    /// Present exactly for archive stanzas.
    pub archive: Option<ArchiveOptions>,
    pub name: String,
    /// Omitted from output entirely when `None`.
    pub license_kind_label: Option<String>,
    pub purl: String,
    pub sha256: String,
    /// Ordered, non-empty.
    pub urls: Vec<String>,
}

impl Stanza {
    /// Render the stanza in the external manifest syntax.
    ///
    /// Field order is fixed: archive-only fields first (type, extract,
    /// optional strip_prefix), then name, license label, purl, sha256,
    /// and the urls block one entry per line.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(match self.kind {
            ArtifactKind::File => "oma.file(".to_string(),
            ArtifactKind::Archive => "oma.archive(".to_string(),
        });

        if let Some(archive) = &self.archive {
            lines.push(format!("    archive_type = \"{}\",", archive.archive_type));
            lines.push(format!(
                "    extract = {},",
                if archive.extract { "True" } else { "False" }
            ));
            if let Some(prefix) = archive.strip_prefix.as_deref().filter(|p| !p.is_empty()) {
                lines.push(format!("    strip_prefix = \"{}\",", prefix));
            }
        }

        lines.push(format!("    name = \"{}\",", self.name));
        if let Some(label) = &self.license_kind_label {
            lines.push(format!("    license_kind_label = \"{}\",", label));
        }
        lines.push(format!("    purl = \"{}\",", self.purl));
        lines.push(format!("    sha256 = \"{}\",", self.sha256));
        lines.push("    urls = [".to_string());
        for url in &self.urls {
            lines.push(format!("        \"{}\",", url));
        }
        lines.push("    ],".to_string());
        lines.push(")".to_string());

        lines.join("\n")
    }
}
