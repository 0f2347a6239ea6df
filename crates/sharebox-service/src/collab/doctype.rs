//! Extension → editor document-type mapping.

/// Editor document categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// Text documents.
    Word,
    /// Spreadsheets.
    Cell,
    /// Presentations.
    Slide,
    /// PDF (view only).
    Pdf,
}

impl DocumentType {
    /// Wire name the editor expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Cell => "cell",
            Self::Slide => "slide",
            Self::Pdf => "pdf",
        }
    }

    /// Classify a lowercase extension (without dot). None = unsupported.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "doc" | "docx" | "odt" | "rtf" | "txt" => Some(Self::Word),
            "xls" | "xlsx" | "ods" | "csv" => Some(Self::Cell),
            "ppt" | "pptx" | "odp" => Some(Self::Slide),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Whether the editor can write this format back. Legacy and read-only
/// formats open in view mode regardless of the caller's permission.
pub fn is_editable(ext: &str) -> bool {
    matches!(ext, "docx" | "xlsx" | "pptx")
}
