//! Package reference construction.
//!
//! Generated artifacts are identified by a generic-type package URL:
//! `pkg:generic/<namespace>/<name>[@<version>]?download_url=<encoded>`.
//! Only the download URL is encoded, as one opaque query value; the
//! other segments are emitted verbatim.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left bare by `encodeURIComponent`: alphanumerics plus
/// `- _ . ! ~ * ' ( )`. Everything else is percent-encoded.
const DOWNLOAD_URL_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the package reference for an artifact.
///
/// The version segment is omitted entirely when `version` is `None` or
/// empty; an empty version never produces a dangling `@`.
pub fn build_purl(
    namespace: &str,
    name: &str,
    version: Option<&str>,
    download_url: &str,
) -> String {
    let encoded = utf8_percent_encode(download_url, DOWNLOAD_URL_SET);
    match version.filter(|v| !v.is_empty()) {
        Some(version) => format!(
            "pkg:generic/{}/{}@{}?download_url={}",
            namespace, name, version, encoded
        ),
        None => format!("pkg:generic/{}/{}?download_url={}", namespace, name, encoded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purl_without_version() {
        assert_eq!(
            build_purl("oma", "foo", Some(""), "http://x/y.zip"),
            "pkg:generic/oma/foo?download_url=http%3A%2F%2Fx%2Fy.zip"
        );
        assert_eq!(
            build_purl("oma", "foo", None, "http://x/y.zip"),
            "pkg:generic/oma/foo?download_url=http%3A%2F%2Fx%2Fy.zip"
        );
    }

    #[test]
    fn test_purl_with_version() {
        assert_eq!(
            build_purl("oma", "foo", Some("1.2"), "http://x/y.zip"),
            "pkg:generic/oma/foo@1.2?download_url=http%3A%2F%2Fx%2Fy.zip"
        );
    }

    #[test]
    fn test_url_encoding_matches_uri_component_rules() {
        // Query separators and spaces are encoded; tilde and dash stay.
        assert_eq!(
            build_purl("oma", "data", None, "https://h/p?a=1&b=~x y-z"),
            "pkg:generic/oma/data?download_url=\
             https%3A%2F%2Fh%2Fp%3Fa%3D1%26b%3D~x%20y-z"
        );
    }

    #[test]
    fn test_only_download_url_is_encoded() {
        // Other fields pass through untouched, even when questionable.
        assert_eq!(
            build_purl("name/space", "a b", None, "u"),
            "pkg:generic/name/space/a b?download_url=u"
        );
    }
}
