use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading citation characters carried as row context
pub const CONTEXT_CHARS: usize = 300;

/// The rule that produced a URL candidate, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Any anchor with an absolute href inside the citation
    DirectLink,
    /// Anchor nested inside the `.reference-text` wrapper
    SpanReference,
    /// Anchor nested inside a `cite` / `.citation` element
    Citation,
    /// Bare URL found in the citation text
    RegexExtraction,
    /// URL following "Archived from the original on"
    ArchiveExtraction,
}

impl ExtractionStrategy {
    /// Title used when the candidate carries no link text
    pub fn placeholder_title(&self) -> &'static str {
        match self {
            Self::DirectLink => "External Link",
            Self::SpanReference => "Reference Link",
            Self::Citation => "Citation Link",
            Self::RegexExtraction => "Plain Text URL",
            Self::ArchiveExtraction => "Archived URL",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectLink => "direct_link",
            Self::SpanReference => "span_reference",
            Self::Citation => "citation",
            Self::RegexExtraction => "regex_extraction",
            Self::ArchiveExtraction => "archive_extraction",
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One external URL found inside a citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlCandidate {
    pub url: String,
    /// Link text, or the strategy placeholder
    pub text: String,
    pub method: ExtractionStrategy,
}

/// A bibliographic citation from the page's reference list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Footnote number parsed from the identifier
    pub number: u32,

    /// Element identifier, e.g. `cite_note-12`
    pub id: String,

    /// Trimmed citation text
    pub text: String,

    /// Candidates in strategy order, unique by URL
    pub external_urls: Vec<UrlCandidate>,

    /// First candidate's URL
    pub url: Option<String>,

    /// First candidate's text
    pub title: Option<String>,
}

impl Reference {
    /// Builds a reference, resolving the primary URL from the first candidate
    pub fn new(number: u32, id: String, text: String, external_urls: Vec<UrlCandidate>) -> Self {
        let (url, title) = match external_urls.first() {
            Some(first) => (Some(first.url.clone()), Some(first.text.clone())),
            None => (None, None),
        };

        Self {
            number,
            id,
            text,
            external_urls,
            url,
            title,
        }
    }

    /// Comma-joined strategy tags of the surviving candidates
    pub fn extraction_methods(&self) -> String {
        self.external_urls
            .iter()
            .map(|c| c.method.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Leading slice of the citation text
    pub fn context(&self) -> String {
        self.text.chars().take(CONTEXT_CHARS).collect()
    }
}

/// A footnote marker in a table cell, resolved against the page's references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReference {
    pub reference_number: u32,
    pub url: Option<String>,
    pub title: String,
    pub context: String,
    pub extraction_methods: String,
}

impl From<&Reference> for ResolvedReference {
    fn from(reference: &Reference) -> Self {
        Self {
            reference_number: reference.number,
            url: reference.url.clone(),
            title: reference
                .title
                .clone()
                .unwrap_or_else(|| format!("Reference {}", reference.number)),
            context: reference.context(),
            extraction_methods: reference.extraction_methods(),
        }
    }
}
