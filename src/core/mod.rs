//! Domain records for an import: the request, the package reference,
//! and the rendered stanza.

pub mod purl;
pub mod request;
pub mod stanza;

pub use purl::build_purl;
pub use request::{
    normalize_urls, ArchiveOptions, ArchiveType, ArtifactKind, ArtifactRequest, ArtifactSource,
};
pub use stanza::Stanza;
