//! Citation extraction and footnote resolution
//!
//! The page's reference list is built once: every citation element is found
//! through the known reference containers, de-duplicated by identifier (first
//! occurrence wins) and run through an ordered chain of URL strategies.
//! Table cells then look their `[n]` markers up in a [`ReferenceResolver`]
//! built over that list. Markers with no matching reference are dropped.

use crate::crawler::{element_text, select_in, ParsedDocument};
use crate::model::{ExtractionStrategy, Reference, ResolvedReference, UrlCandidate};
use crate::url::is_external_href;
use regex::Regex;
use scraper::ElementRef;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Selectors searched for citation elements, in order
const REFERENCE_SELECTORS: [&str; 6] = [
    "ol.references li",
    ".reflist li",
    ".references li",
    "div.reflist li",
    r#"ol li[id*="cite_note"]"#,
    r#"[id*="cite_note-"]"#,
];

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s\[\]()]+").unwrap());

static ARCHIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Archived from the original on.*?https?://[^\s\[\]()]+").unwrap()
});

static REFERENCE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cite_note-(\d+)").unwrap());

static FOOTNOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\d+)\]").unwrap());

/// A URL found by one strategy, before placeholder titles are applied
struct RawCandidate {
    url: String,
    text: String,
}

type StrategyFn = fn(ElementRef<'_>, &str) -> Vec<RawCandidate>;

/// The strategy chain, applied in priority order
const STRATEGY_CHAIN: [(ExtractionStrategy, StrategyFn); 5] = [
    (ExtractionStrategy::DirectLink, direct_links),
    (ExtractionStrategy::SpanReference, reference_text_links),
    (ExtractionStrategy::Citation, citation_links),
    (ExtractionStrategy::RegexExtraction, plain_text_urls),
    (ExtractionStrategy::ArchiveExtraction, archived_urls),
];

/// Builds the page's reference list
///
/// # Rules
///
/// - Elements without an `id` or with empty text are skipped
/// - The first element seen for an identifier wins; later ones are ignored
/// - Identifiers not matching `cite_note-<number>` are discarded
/// - The result is sorted ascending by footnote number
///
/// # Example
///
/// ```
/// use wiki_harvest::crawler::parse_document;
/// use wiki_harvest::extract::extract_references;
///
/// let doc = parse_document(r#"<ol class="references">
///     <li id="cite_note-2"><a href="https://b.example">B</a></li>
///     <li id="cite_note-1"><a href="https://a.example">A</a></li>
/// </ol>"#);
/// let refs = extract_references(&doc);
/// assert_eq!(refs[0].number, 1);
/// assert_eq!(refs[1].url.as_deref(), Some("https://b.example"));
/// ```
pub fn extract_references(doc: &ParsedDocument) -> Vec<Reference> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut references = Vec::new();

    for css in REFERENCE_SELECTORS {
        for element in doc.select(css) {
            let Some(id) = element.value().id() else {
                continue;
            };
            if seen.contains(id) {
                continue;
            }

            let text = element_text(element);
            if text.is_empty() {
                continue;
            }

            seen.insert(id.to_string());
            if let Some(reference) = process_reference(element, id, text) {
                references.push(reference);
            }
        }
    }

    references.sort_by_key(|r| r.number);
    tracing::debug!("Extracted {} references", references.len());
    references
}

/// Turns one citation element into a [`Reference`]
///
/// Returns `None` when the identifier carries no footnote number.
pub fn process_reference(element: ElementRef<'_>, id: &str, text: String) -> Option<Reference> {
    let number = parse_reference_number(id)?;
    let candidates = extract_candidates(element, &text);
    Some(Reference::new(number, id.to_string(), text, candidates))
}

/// Footnote number of a `cite_note-<n>` identifier
pub fn parse_reference_number(id: &str) -> Option<u32> {
    REFERENCE_ID_RE
        .captures(id)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Runs the strategy chain over a citation element
///
/// Candidates keep strategy order; a URL already produced by an earlier
/// candidate is not repeated.
pub fn extract_candidates(element: ElementRef<'_>, text: &str) -> Vec<UrlCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for (method, strategy) in STRATEGY_CHAIN {
        for raw in strategy(element, text) {
            if !seen.insert(raw.url.clone()) {
                continue;
            }
            let title = if raw.text.is_empty() {
                method.placeholder_title().to_string()
            } else {
                raw.text
            };
            candidates.push(UrlCandidate {
                url: raw.url,
                text: title,
                method,
            });
        }
    }

    candidates
}

/// Absolute anchors under `root`
fn anchors(root: ElementRef<'_>) -> Vec<RawCandidate> {
    select_in(root, "a[href]")
        .into_iter()
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            is_external_href(href).then(|| RawCandidate {
                url: href.to_string(),
                text: element_text(a),
            })
        })
        .collect()
}

/// Absolute anchors nested inside any element matching `wrapper`
fn wrapped_anchors(root: ElementRef<'_>, wrapper: &str) -> Vec<RawCandidate> {
    select_in(root, wrapper).into_iter().flat_map(anchors).collect()
}

fn direct_links(element: ElementRef<'_>, _text: &str) -> Vec<RawCandidate> {
    anchors(element)
}

fn reference_text_links(element: ElementRef<'_>, _text: &str) -> Vec<RawCandidate> {
    wrapped_anchors(element, ".reference-text")
}

fn citation_links(element: ElementRef<'_>, _text: &str) -> Vec<RawCandidate> {
    wrapped_anchors(element, "cite, .citation")
}

fn plain_text_urls(_element: ElementRef<'_>, text: &str) -> Vec<RawCandidate> {
    URL_RE
        .find_iter(text)
        .filter_map(|m| clean_url(m.as_str()))
        .map(|url| RawCandidate {
            url,
            text: String::new(),
        })
        .collect()
}

fn archived_urls(_element: ElementRef<'_>, text: &str) -> Vec<RawCandidate> {
    ARCHIVE_RE
        .find_iter(text)
        .filter_map(|m| URL_RE.find(m.as_str()))
        .filter_map(|m| clean_url(m.as_str()))
        .map(|url| RawCandidate {
            url,
            text: String::new(),
        })
        .collect()
}

/// Strips trailing punctuation picked up from running text
fn clean_url(raw: &str) -> Option<String> {
    let cleaned = raw.trim_end_matches([',', ';', '.', ']', ')', '}']);
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Footnote numbers in a piece of text, in order of appearance
pub fn footnote_markers(text: &str) -> Vec<u32> {
    FOOTNOTE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

/// Lookup of a page's references by footnote number
///
/// Built once per page and shared by every table cell on it.
pub struct ReferenceResolver<'a> {
    by_number: HashMap<u32, &'a Reference>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(references: &'a [Reference]) -> Self {
        let mut by_number = HashMap::with_capacity(references.len());
        for reference in references {
            by_number.entry(reference.number).or_insert(reference);
        }
        Self { by_number }
    }

    /// The reference with exactly this footnote number
    pub fn lookup(&self, number: u32) -> Option<&'a Reference> {
        self.by_number.get(&number).copied()
    }

    /// Resolves every `[n]` marker in `text`
    ///
    /// Unmatched markers are silently omitted.
    pub fn resolve(&self, text: &str) -> Vec<ResolvedReference> {
        footnote_markers(text)
            .into_iter()
            .filter_map(|n| self.lookup(n))
            .map(ResolvedReference::from)
            .collect()
    }
}
