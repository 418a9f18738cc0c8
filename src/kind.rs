//! The closed set of conversion directions the service supports.
//!
//! Each [`ConversionKind`] fixes *both* halves of the contract at once: the
//! input it accepts (media type, extensions) and the output extension it
//! produces. Every accessor is a single exhaustive `match`, so adding a new
//! direction forces the compiler to demand the matching half — the accepted
//! type and the target extension can never drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A document-transformation direction offered by the conversion service.
///
/// The `Display`/`FromStr` round-trip uses the service's endpoint segment
/// (`pdf-to-docx` etc.), which doubles as the CLI spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionKind {
    /// PDF in, Word document out.
    PdfToDocx,
    /// Word document in, PDF out.
    DocxToPdf,
    /// Excel workbook in, PDF out.
    XlsxToPdf,
}

impl ConversionKind {
    /// All supported kinds, in the order the service documents them.
    pub const ALL: [ConversionKind; 3] = [
        ConversionKind::PdfToDocx,
        ConversionKind::DocxToPdf,
        ConversionKind::XlsxToPdf,
    ];

    /// Path segment used in `POST {base}/convert/{segment}`.
    pub fn endpoint_segment(self) -> &'static str {
        match self {
            ConversionKind::PdfToDocx => "pdf-to-docx",
            ConversionKind::DocxToPdf => "docx-to-pdf",
            ConversionKind::XlsxToPdf => "xlsx-to-pdf",
        }
    }

    /// Extension of the artifact this kind produces, without the dot.
    ///
    /// Used for the fallback output filename when the service omits a
    /// `Content-Disposition` name.
    pub fn target_extension(self) -> &'static str {
        match self {
            ConversionKind::PdfToDocx => "docx",
            ConversionKind::DocxToPdf => "pdf",
            ConversionKind::XlsxToPdf => "pdf",
        }
    }

    /// Media type of the input this kind accepts.
    pub fn accepted_media_type(self) -> &'static str {
        match self {
            ConversionKind::PdfToDocx => "application/pdf",
            ConversionKind::DocxToPdf => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ConversionKind::XlsxToPdf => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Input extensions the service's route guard accepts for this kind.
    ///
    /// `xlsx-to-pdf` also takes legacy `.xls` workbooks.
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            ConversionKind::PdfToDocx => &["pdf"],
            ConversionKind::DocxToPdf => &["docx"],
            ConversionKind::XlsxToPdf => &["xls", "xlsx"],
        }
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint_segment())
    }
}

impl FromStr for ConversionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf-to-docx" => Ok(ConversionKind::PdfToDocx),
            "docx-to-pdf" => Ok(ConversionKind::DocxToPdf),
            "xlsx-to-pdf" => Ok(ConversionKind::XlsxToPdf),
            other => Err(format!(
                "unknown conversion kind '{other}' (expected one of: pdf-to-docx, docx-to-pdf, xlsx-to-pdf)"
            )),
        }
    }
}
