//! Output filename resolution.
//!
//! The service may name the artifact itself through a `Content-Disposition`
//! header, in one of two conventional encodings:
//!
//! - RFC-5987 style: `filename*=UTF-8''na%C3%AFve.pdf` (percent-encoded)
//! - plain quoted:   `filename="naive.pdf"`
//!
//! Parsing is an ordered list of independent attempts — encoded form first,
//! quoted form second, first success wins — and a malformed header simply
//! means "no header filename", never an error. When no header name is found
//! the filename is derived from the input name plus the conversion kind's
//! target extension. A header-supplied name always wins, even if its
//! extension looks inconsistent with the kind: the service is the final
//! authority on output naming.

use crate::kind::ConversionKind;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use tracing::debug;

/// Name substituted when stripping the input extension leaves nothing,
/// e.g. for an input literally named `.hidden`.
const EMPTY_STEM_FALLBACK: &str = "converted";

static RE_FILENAME_ENCODED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)filename\*=UTF-8''([^;]+)").unwrap());

static RE_FILENAME_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)filename="([^"]+)""#).unwrap());

/// Extract a filename from a `Content-Disposition` header value.
///
/// Returns `None` for missing, malformed, or empty names.
pub fn filename_from_header(value: &str) -> Option<String> {
    if let Some(caps) = RE_FILENAME_ENCODED.captures(value) {
        let raw = &caps[1];
        match percent_decode_str(raw).decode_utf8() {
            Ok(decoded) if !decoded.is_empty() => return Some(decoded.into_owned()),
            Ok(_) => {}
            Err(e) => {
                debug!("Ignoring malformed encoded filename {raw:?}: {e}");
            }
        }
    }

    RE_FILENAME_QUOTED
        .captures(value)
        .map(|caps| caps[1].to_string())
        .filter(|name| !name.is_empty())
}

/// Derive the fallback output filename from the input name and the kind.
///
/// The input's last extension (final `.` and everything after it) is
/// stripped and replaced with the kind's target extension, whatever the
/// input extension was.
pub fn fallback_filename(input_name: &str, kind: ConversionKind) -> String {
    let stem = match input_name.rfind('.') {
        Some(idx) if idx + 1 < input_name.len() => &input_name[..idx],
        _ => input_name,
    };
    let stem = if stem.is_empty() {
        EMPTY_STEM_FALLBACK
    } else {
        stem
    };
    format!("{stem}.{}", kind.target_extension())
}

/// Resolve the final output filename for a response.
///
/// `header` is the raw `Content-Disposition` value when the response
/// carried one.
pub fn resolve_filename(
    header: Option<&str>,
    input_name: &str,
    kind: ConversionKind,
) -> String {
    if let Some(name) = header.and_then(filename_from_header) {
        debug!("Using service-supplied output name: {name}");
        return name;
    }
    let derived = fallback_filename(input_name, kind);
    debug!("No header filename; derived {derived} from {input_name}");
    derived
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_form_is_percent_decoded() {
        let name = filename_from_header("attachment; filename*=UTF-8''na%C3%AFve.pdf");
        assert_eq!(name.as_deref(), Some("naïve.pdf"));
    }

    #[test]
    fn quoted_form_is_taken_verbatim() {
        let name = filename_from_header(r#"attachment; filename="naive.pdf""#);
        assert_eq!(name.as_deref(), Some("naive.pdf"));
    }

    #[test]
    fn encoded_wins_over_quoted_regardless_of_order() {
        let name = filename_from_header(
            r#"attachment; filename="plain.pdf"; filename*=UTF-8''enc%C3%B6ded.pdf"#,
        );
        assert_eq!(name.as_deref(), Some("encöded.pdf"));
    }

    #[test]
    fn malformed_percent_sequence_falls_through_to_quoted() {
        // %FF%FE is not valid UTF-8 once decoded.
        let name = filename_from_header(r#"filename*=UTF-8''%FF%FE; filename="backup.pdf""#);
        assert_eq!(name.as_deref(), Some("backup.pdf"));
    }

    #[test]
    fn missing_or_malformed_header_yields_none() {
        assert_eq!(filename_from_header("attachment"), None);
        assert_eq!(filename_from_header(""), None);
        assert_eq!(filename_from_header(r#"filename=unquoted.pdf"#), None);
        assert_eq!(filename_from_header("filename*=UTF-8''%FF%FE"), None);
    }

    #[test]
    fn fallback_replaces_last_extension() {
        assert_eq!(
            fallback_filename("report.v2.docx", ConversionKind::DocxToPdf),
            "report.v2.pdf"
        );
    }

    #[test]
    fn fallback_without_extension_appends_target() {
        assert_eq!(
            fallback_filename("README", ConversionKind::PdfToDocx),
            "README.docx"
        );
    }

    #[test]
    fn fallback_empty_stem_uses_converted() {
        assert_eq!(
            fallback_filename(".hidden", ConversionKind::DocxToPdf),
            "converted.pdf"
        );
    }

    #[test]
    fn fallback_extension_matches_kind_for_every_kind() {
        for kind in ConversionKind::ALL {
            let name = fallback_filename("input.anything", kind);
            let expected = format!("input.{}", kind.target_extension());
            assert_eq!(name, expected);
        }
    }

    #[test]
    fn header_name_wins_even_with_mismatched_extension() {
        // Trust-the-server: a .txt name for a docx-to-pdf request is kept.
        let name = resolve_filename(
            Some(r#"attachment; filename="oops.txt""#),
            "input.docx",
            ConversionKind::DocxToPdf,
        );
        assert_eq!(name, "oops.txt");
    }

    #[test]
    fn resolve_uses_fallback_when_header_malformed() {
        let name = resolve_filename(Some("attachment"), "input.docx", ConversionKind::DocxToPdf);
        assert_eq!(name, "input.pdf");
    }
}
