//! The interactive import operation.
//!
//! Drives the operator through a fixed decision sequence: artifact
//! kind, source, naming, URL list, acquisition and hashing, license
//! selection, archive details, stanza rendering, and finally the
//! manifest patch (or a dry-run report). Every answer is validated
//! before the next step; invalid input re-prompts the same step.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::acquire::acquire_digest;
use crate::catalog::{LicenseCatalog, LicenseSource, MenuChoice};
use crate::core::request::{
    normalize_urls, ArchiveOptions, ArchiveType, ArtifactKind, ArtifactRequest, ArtifactSource,
};
use crate::core::{build_purl, Stanza};
use crate::manifest::patch_manifest;
use crate::util::prompt::Prompter;
use crate::util::shell::{Shell, Status};

/// Options for an import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Print the stanza but leave the manifest untouched.
    pub dry_run: bool,

    /// Manifest document to patch.
    pub manifest_path: PathBuf,

    /// Namespace offered as the default at the namespace prompt.
    pub default_namespace: String,
}

/// What an import run produced.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// The rendered stanza.
    pub stanza: String,

    /// Whether the manifest was rewritten (false for dry runs).
    pub written: bool,
}

/// Run one interactive import session.
pub fn run_import<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    license_source: &dyn LicenseSource,
    shell: &Shell,
    opts: &ImportOptions,
) -> Result<ImportOutcome> {
    prompter.say("oma-import")?;
    prompter.say("This tool will generate an oma.file or oma.archive stanza.\n")?;

    let request = collect_request(prompter, &opts.default_namespace)?;

    let purl = build_purl(
        &request.namespace,
        &request.name,
        request.version.as_deref(),
        request.download_url(),
    );

    let sha256 = acquire_digest(&request.source, shell)?;
    tracing::debug!("artifact digest: {}", sha256);

    let catalog = LicenseCatalog::load(license_source)
        .context("failed to load the license catalog")?;
    let license_kind_label = pick_license(prompter, &catalog)?;

    let archive = match request.kind {
        ArtifactKind::Archive => Some(collect_archive_options(prompter, &request)?),
        ArtifactKind::File => None,
    };

    let stanza = Stanza {
        kind: request.kind,
        archive,
        name: request.name.clone(),
        license_kind_label,
        purl,
        sha256,
        urls: request.urls.clone(),
    };
    let rendered = stanza.render();

    prompter.say("\nGenerated stanza:\n")?;
    prompter.say(&rendered)?;

    if opts.dry_run {
        prompter.say(format!(
            "\nDry run enabled; {} was not modified.",
            opts.manifest_path.display()
        ))?;
        return Ok(ImportOutcome {
            stanza: rendered,
            written: false,
        });
    }

    patch_manifest(&opts.manifest_path, &rendered)?;
    shell.status(Status::Updated, opts.manifest_path.display());

    Ok(ImportOutcome {
        stanza: rendered,
        written: true,
    })
}

/// Collect the artifact request up to (but not including) the
/// archive-only fields, which depend on the license step ordering.
fn collect_request<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    default_namespace: &str,
) -> Result<ArtifactRequest> {
    let kind_items = vec!["File".to_string(), "Archive".to_string()];
    let kind = match prompter.choose("What would you like to import?", &kind_items)? {
        0 => ArtifactKind::File,
        _ => ArtifactKind::Archive,
    };

    let source_items = vec!["Remote URL".to_string(), "Local file path".to_string()];
    let source = match prompter.choose("Select the source for the artifact", &source_items)? {
        0 => {
            let url = prompter.text_required("Enter the URL to download", "")?;
            ArtifactSource::RemoteUrl(url)
        }
        _ => {
            let path = prompter.text_required("Enter the local file path", "")?;
            ArtifactSource::LocalPath(PathBuf::from(path))
        }
    };

    let name = prompter.text_required("Artifact name (oma rule name)", "")?;
    let namespace = prompter.text_required("Package namespace", default_namespace)?;
    let version = match prompter.text("Package version (optional)", "")? {
        v if v.is_empty() => None,
        v => Some(v),
    };

    let default_urls = source.default_url();
    let urls = loop {
        let input = prompter.text_required("URLs (comma-separated)", &default_urls)?;
        let urls = normalize_urls(&input);
        if !urls.is_empty() {
            break urls;
        }
        prompter.say("At least one URL is required.")?;
    };

    Ok(ArtifactRequest {
        kind,
        source,
        name,
        namespace,
        version,
        urls,
    })
}

/// Drive the license menu until a terminal choice is made.
///
/// Returns the label to record, or `None` to omit the license field.
fn pick_license<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    catalog: &LicenseCatalog,
) -> Result<Option<String>> {
    let mut filter = String::new();

    loop {
        let page = catalog.page(&filter);

        prompter.say("\nLicense search:")?;
        if filter.is_empty() {
            prompter.say(format!(
                "  Showing {} of {} licenses",
                page.shown, page.match_count
            ))?;
        } else {
            prompter.say(format!(
                "  Filter: \"{}\" ({} matches)",
                filter, page.match_count
            ))?;
        }

        let labels: Vec<String> = page.items.iter().map(|(display, _)| display.clone()).collect();
        let index = prompter.choose("Select the license", &labels)?;

        match &page.items[index].1 {
            MenuChoice::Refine => {
                filter = prompter.text("Enter a new filter (leave empty to reset)", "")?;
            }
            MenuChoice::NoLicense => return Ok(None),
            MenuChoice::Custom => {
                let label = prompter.text_required("Enter the full license_kind_label", "")?;
                return Ok(Some(label));
            }
            MenuChoice::License(label) => return Ok(Some(label.clone())),
        }
    }
}

/// Collect the archive-only fields: type, extract flag, strip prefix.
fn collect_archive_options<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    request: &ArtifactRequest,
) -> Result<ArchiveOptions> {
    let default = ArchiveType::guess(&request.source.location())
        .unwrap_or(ArchiveType::TarGz)
        .as_str();

    let archive_type = loop {
        let answer = prompter.text_required(
            &format!("Archive type ({})", ArchiveType::all_names()),
            default,
        )?;
        match answer.parse::<ArchiveType>() {
            Ok(t) => break t,
            Err(_) => {
                prompter.say(format!(
                    "Unknown archive type. Expected one of: {}",
                    ArchiveType::all_names()
                ))?;
            }
        }
    };

    let extract = prompter.yes_no("Extract archive?", true)?;
    let strip_prefix = if extract {
        match prompter.text("Strip prefix (optional)", "")? {
            p if p.is_empty() => None,
            p => Some(p),
        }
    } else {
        None
    };

    Ok(ArchiveOptions {
        archive_type,
        extract,
        strip_prefix,
    })
}
