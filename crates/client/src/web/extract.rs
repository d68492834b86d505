//! Result-link harvesting from the search results page.

use scraper::{Html, Selector};

/// Marker present in every outbound result redirect link.
const RESULT_LINK_MARKER: &str = "duckduckgo.com/l/";

/// Flatten the result anchors of a search page into text.
///
/// Each result becomes `"<text> - <href>"` followed by a blank line.
/// Collection stops as soon as the output holds more than `max_lines` lines.
pub fn extract_result_links(html: &str, max_lines: usize) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("invalid selector");

    let mut output = String::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.contains(RESULT_LINK_MARKER) {
            continue;
        }

        let text = element.text().collect::<String>();
        output.push_str(&format!("{} - {}\n\n", text.trim(), href));

        if output.lines().count() > max_lines {
            break;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_page(count: usize) -> String {
        let anchors: String = (0..count)
            .map(|i| format!(r#"<a href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fsite{i}.org">Result {i}</a>"#))
            .collect();
        format!(r#"<html><body><a href="/settings">Settings</a>{anchors}</body></html>"#)
    }

    #[test]
    fn test_extract_only_result_links() {
        let out = extract_result_links(&results_page(2), 10);
        assert!(!out.contains("Settings"));
        assert_eq!(
            out,
            "Result 0 - //duckduckgo.com/l/?uddg=https%3A%2F%2Fsite0.org\n\n\
             Result 1 - //duckduckgo.com/l/?uddg=https%3A%2F%2Fsite1.org\n\n"
        );
    }

    #[test]
    fn test_extract_stops_after_line_budget() {
        let out = extract_result_links(&results_page(20), 10);
        // Each result contributes two lines; the sixth pushes past ten.
        assert_eq!(out.matches(" - ").count(), 6);
    }

    #[test]
    fn test_extract_no_results() {
        let out = extract_result_links("<html><body><p>No results.</p></body></html>", 10);
        assert!(out.is_empty());
    }

    #[test]
    fn test_extract_trims_anchor_text() {
        let html = r#"<a href="https://duckduckgo.com/l/?x=1">
            Autism <b>overview</b>
        </a>"#;
        let out = extract_result_links(html, 10);
        assert!(out.starts_with("Autism overview - https://duckduckgo.com/l/?x=1"));
    }
}
