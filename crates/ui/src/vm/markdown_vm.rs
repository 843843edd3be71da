use std::collections::{HashMap, HashSet};

use pulldown_cmark::{Options, Parser};

/// Render a section body to sanitized HTML. Tables are the one extension
/// the course content uses.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let parser = Parser::new_ext(input, Options::ENABLE_TABLES);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Course bodies are trusted authored content, but they still pass through
/// the same allow-list as everything else rendered with
/// `dangerous_inner_html`.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags = HashSet::from([
        "h1", "h2", "h3", "h4", "p", "div", "span", "br", "em", "strong", "b", "i", "code", "pre",
        "blockquote", "ul", "ol", "li", "a", "table", "thead", "tbody", "tr", "th", "td",
    ]);
    let attributes = HashMap::from([("a", HashSet::from(["href"]))]);

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .url_schemes(HashSet::from(["http", "https", "mailto"]))
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{markdown_to_html, sanitize_html};

    #[test]
    fn headings_lists_and_emphasis_render() {
        let html = markdown_to_html("## Heading\n\n- one\n- two\n\n**bold** and *italic*");
        assert!(html.contains("<h2>Heading</h2>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn tables_survive_sanitizing() {
        let html = markdown_to_html("| a | b |\n| - | - |\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn scripts_are_stripped() {
        let html = sanitize_html("<p>ok</p><script>alert(1)</script>");
        assert!(html.contains("<p>ok</p>"));
        assert!(!html.contains("script"));
    }

    #[test]
    fn javascript_links_are_neutralized() {
        let html = markdown_to_html("[Link](javascript:alert(1))");
        assert!(html.contains("Link"));
        assert!(!html.contains("javascript:"));
    }
}
