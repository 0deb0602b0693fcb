//! Page-level extractors
//!
//! Each extractor reads the parsed document and returns an owned value.
//! Missing elements yield an empty value rather than an error.

use crate::crawler::{
    child_elements, element_text, has_class, joined_text, select_in, tag_name, ParsedDocument,
};
use crate::model::{ExternalLink, Section};
use scraper::ElementRef;
use std::collections::BTreeMap;

const CONTENT_ROOT: &str = "#mw-content-text .mw-parser-output";
const SUMMARY_PARAGRAPHS: usize = 3;
const MIN_SUMMARY_CHARS: usize = 50;
const MIN_SECTION_PARAGRAPH_CHARS: usize = 30;

/// Page heading text
pub fn extract_title(doc: &ParsedDocument) -> String {
    joined_text(&doc.select("h1.firstHeading"))
}

/// The first three lead paragraphs, keeping those longer than 50 characters
pub fn extract_summary(doc: &ParsedDocument) -> String {
    doc.select(&format!("{} > p", CONTENT_ROOT))
        .into_iter()
        .take(SUMMARY_PARAGRAPHS)
        .map(element_text)
        .filter(|text| text.chars().count() > MIN_SUMMARY_CHARS)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Header/value pairs of the infobox
pub fn extract_infobox(doc: &ParsedDocument) -> BTreeMap<String, String> {
    let mut infobox = BTreeMap::new();

    for row in doc.select(".infobox tr") {
        let label = joined_text(&select_in(row, "th"));
        let value = joined_text(&select_in(row, "td"));
        if !label.is_empty() && !value.is_empty() {
            infobox.insert(label, value);
        }
    }

    infobox
}

/// Walks the content root's children into headed sections
///
/// Content before the first heading is dropped. Headings whose text contains
/// "edit" are ignored, so their paragraphs fall into the previous section.
pub fn extract_sections(doc: &ParsedDocument) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for root in doc.select(CONTENT_ROOT) {
        for child in child_elements(root) {
            if let Some((level, heading)) = heading_of(child) {
                let title = element_text(heading);
                if !title.is_empty() && !title.contains("edit") {
                    sections.push(Section::new(level, title));
                }
                continue;
            }

            if tag_name(child) != "p" {
                continue;
            }
            if let Some(current) = sections.last_mut() {
                let text = element_text(child);
                if text.chars().count() > MIN_SECTION_PARAGRAPH_CHARS {
                    current.content.push(text);
                }
            }
        }
    }

    sections
}

/// Level and element of a heading child
///
/// Accepts bare `h2`-`h4` children and the `div.mw-heading` wrapper newer
/// page markup puts around them.
fn heading_of(element: ElementRef<'_>) -> Option<(u8, ElementRef<'_>)> {
    if let Some(level) = heading_level(element) {
        return Some((level, element));
    }

    if tag_name(element) == "div" && has_class(element, "mw-heading") {
        return child_elements(element).find_map(|inner| heading_level(inner).map(|l| (l, inner)));
    }

    None
}

fn heading_level(element: ElementRef<'_>) -> Option<u8> {
    match tag_name(element).as_str() {
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        _ => None,
    }
}

/// Links from the "External links" list, then citation links not yet seen
pub fn extract_external_links(doc: &ParsedDocument) -> Vec<ExternalLink> {
    let mut links = Vec::new();
    let mut parents = Vec::new();

    for marker in doc.select("#External_links, #External_Links") {
        let Some(parent) = marker.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        if parents.contains(&parent.id()) {
            continue;
        }
        parents.push(parent.id());

        let lists = parent
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|sibling| tag_name(*sibling) == "ul");

        for list in lists {
            for anchor in select_in(list, r#"a[href^="http"]"#) {
                let url = anchor.value().attr("href").unwrap_or_default();
                let text = element_text(anchor);
                if !url.is_empty() && !text.is_empty() {
                    links.push(ExternalLink {
                        url: url.to_string(),
                        text,
                        source: None,
                    });
                }
            }
        }
    }

    for anchor in doc.select(r#".references a[href^="http"], .reflist a[href^="http"]"#) {
        let url = anchor.value().attr("href").unwrap_or_default();
        let text = element_text(anchor);
        if url.is_empty() || text.is_empty() || links.iter().any(|l| l.url == url) {
            continue;
        }
        links.push(ExternalLink {
            url: url.to_string(),
            text,
            source: Some("references".to_string()),
        });
    }

    links
}

/// Category names from the category links box
pub fn extract_categories(doc: &ParsedDocument) -> Vec<String> {
    doc.select("#mw-normal-catlinks a")
        .into_iter()
        .map(element_text)
        .filter(|name| !name.is_empty() && !name.contains("Category"))
        .collect()
}

/// Text of the first geo-marked element
pub fn extract_coordinates(doc: &ParsedDocument) -> Option<String> {
    doc.select_first(".geo")
        .map(element_text)
        .filter(|coords| !coords.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::parse_document;

    fn content(inner: &str) -> ParsedDocument {
        parse_document(&format!(
            r#"<html><body><div id="mw-content-text"><div class="mw-parser-output">{}</div></div></body></html>"#,
            inner
        ))
    }

    const LONG_A: &str = "Alpha paragraph that is comfortably longer than fifty characters in total.";
    const LONG_B: &str = "Beta paragraph that is also comfortably longer than fifty characters here.";

    #[test]
    fn test_extract_title() {
        let doc = parse_document(r#"<h1 class="firstHeading"> <span>Tay Bridge disaster</span> </h1>"#);
        assert_eq!(extract_title(&doc), "Tay Bridge disaster");
    }

    #[test]
    fn test_missing_elements_yield_empty_values() {
        let doc = parse_document("<html><body><p>nothing here</p></body></html>");
        assert_eq!(extract_title(&doc), "");
        assert_eq!(extract_summary(&doc), "");
        assert!(extract_infobox(&doc).is_empty());
        assert!(extract_sections(&doc).is_empty());
        assert!(extract_external_links(&doc).is_empty());
        assert!(extract_categories(&doc).is_empty());
        assert!(extract_coordinates(&doc).is_none());
    }

    #[test]
    fn test_summary_takes_first_three_then_filters() {
        let doc = content(&format!(
            "<p>{}</p><p>short</p><p>{}</p><p>{}</p>",
            LONG_A, LONG_B, "Delta paragraph beyond the first three, long enough to qualify."
        ));

        assert_eq!(extract_summary(&doc), format!("{}\n\n{}", LONG_A, LONG_B));
    }

    #[test]
    fn test_infobox_later_keys_overwrite() {
        let doc = parse_document(
            r#"<table class="infobox">
                <tr><th>Date</th><td>28 December 1879</td></tr>
                <tr><th colspan="2">Heading only</th></tr>
                <tr><th>Date</th><td>29 December 1879</td></tr>
                <tr><th>Deaths</th><td>75</td></tr>
            </table>"#,
        );

        let infobox = extract_infobox(&doc);
        assert_eq!(infobox.len(), 2);
        assert_eq!(infobox["Date"], "29 December 1879");
        assert_eq!(infobox["Deaths"], "75");
    }

    #[test]
    fn test_sections_walk_in_order() {
        let doc = content(&format!(
            "<p>{}</p><h2>Background</h2><p>{}</p><p>tiny</p><h3>Design</h3><p>{}</p><table><tr><td>x</td></tr></table>",
            "Lead paragraph before any heading, which is long enough to keep.", LONG_A, LONG_B
        ));

        let sections = extract_sections(&doc);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], Section {
            level: 2,
            title: "Background".to_string(),
            content: vec![LONG_A.to_string()],
        });
        assert_eq!(sections[1].level, 3);
        assert_eq!(sections[1].content, vec![LONG_B.to_string()]);
    }

    #[test]
    fn test_sections_skip_edit_headings() {
        let doc = content(&format!(
            r#"<h2>History</h2><p>{}</p><h2>Aftermath<span class="mw-editsection">[edit]</span></h2><p>{}</p>"#,
            LONG_A, LONG_B
        ));

        let sections = extract_sections(&doc);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "History");
        assert_eq!(sections[0].content, vec![LONG_A.to_string(), LONG_B.to_string()]);
    }

    #[test]
    fn test_sections_in_heading_wrappers() {
        let doc = content(&format!(
            r#"<div class="mw-heading mw-heading2"><h2 id="Cause">Cause</h2><span class="mw-editsection">[edit]</span></div><p>{}</p><h5>Too deep</h5>"#,
            LONG_A
        ));

        let sections = extract_sections(&doc);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Cause");
        assert_eq!(sections[0].level, 2);
        assert_eq!(sections[0].content.len(), 1);
    }

    #[test]
    fn test_external_links_and_reference_links() {
        let doc = content(
            r#"<div class="mw-heading mw-heading2"><h2 id="External_links">External links</h2></div>
               <ul>
                 <li><a href="https://archive.example/report">Official report</a></li>
                 <li><a href="/wiki/Internal">Internal</a></li>
                 <li><a href="https://empty.example/"></a></li>
               </ul>
               <ol class="references">
                 <li id="cite_note-1"><a href="https://archive.example/report">Report</a></li>
                 <li id="cite_note-2"><a href="https://news.example/story">Story</a></li>
               </ol>"#,
        );

        let links = extract_external_links(&doc);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://archive.example/report");
        assert_eq!(links[0].text, "Official report");
        assert!(links[0].source.is_none());
        assert_eq!(links[1].url, "https://news.example/story");
        assert_eq!(links[1].source.as_deref(), Some("references"));
    }

    #[test]
    fn test_categories_exclude_category_label() {
        let doc = parse_document(
            r#"<div id="mw-normal-catlinks"><a href="/wiki/Help:Category">Category:Help</a><ul>
                <li><a href="/wiki/Category:Bridge_disasters">Bridge disasters</a></li>
                <li><a href="/wiki/Category:1879">1879 disasters in Scotland</a></li>
            </ul></div>"#,
        );

        assert_eq!(
            extract_categories(&doc),
            vec!["Bridge disasters", "1879 disasters in Scotland"]
        );
    }

    #[test]
    fn test_coordinates_first_geo_only() {
        let doc = parse_document(
            r#"<span class="geo">56.437; -2.988</span><span class="geo">1; 2</span>"#,
        );
        assert_eq!(extract_coordinates(&doc).as_deref(), Some("56.437; -2.988"));
    }
}
