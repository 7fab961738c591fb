//! Managed-region patching of the manifest document.
//!
//! The tool owns exactly one span of the manifest: the lines between
//! [`START_MARKER`] and [`END_MARKER`]. Patching inserts a rendered
//! stanza immediately before the end marker, or appends a freshly
//! delimited region when no usable region exists. Text outside the
//! region is never altered, and the full new content is computed
//! before the single write.

use std::path::Path;

use anyhow::Result;

use crate::util::fs;

/// First line of the managed region.
pub const START_MARKER: &str = "# OMA_DATA_START";

/// Last line of the managed region.
pub const END_MARKER: &str = "# OMA_DATA_END";

/// Comment line written above a freshly created region.
const REGION_HEADER: &str = "# OMA data artifacts (managed by oma-import)";

/// Insert `stanza` into the managed region of `content`, returning the
/// full new document text.
///
/// When both markers are present in start-before-end order, the stanza
/// goes immediately before the end marker, separated by a blank line,
/// with trailing whitespace at the insertion boundary trimmed. This
/// makes repeated imports strictly additive inside one region: the
/// marker count stays at two. Any other marker arrangement (including
/// end-before-start) counts as "no region" and a new delimited region
/// is appended to the trimmed document.
pub fn insert_stanza(content: &str, stanza: &str) -> String {
    match (content.find(START_MARKER), content.find(END_MARKER)) {
        (Some(start), Some(end)) if end > start => {
            let head = content[..end].trim_end();
            format!("{}\n\n{}\n{}", head, stanza, &content[end..])
        }
        _ => format!(
            "{}\n\n{}\n{}\n{}\n{}\n",
            content.trim_end(),
            REGION_HEADER,
            START_MARKER,
            stanza,
            END_MARKER
        ),
    }
}

/// Read the manifest, insert the stanza, write the result back.
///
/// This is the tool's only disk-mutating operation; both the read and
/// the write are fatal on failure, and no partial content is ever
/// written.
pub fn patch_manifest(path: &Path, stanza: &str) -> Result<()> {
    let content = fs::read_to_string(path)?;
    let updated = insert_stanza(&content, stanza);
    fs::write_string(path, &updated)?;
    Ok(())
}
