//! Visible page text.
//!
//! Collects the text nodes under `<body>`, skipping non-rendered elements,
//! and collapses whitespace. Anything smarter (readability scoring,
//! boilerplate removal) is left to the caller.

use scraper::{Html, Node, Selector};

/// Elements whose text is never shown to the reader.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Extract the visible text of an HTML document.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").ok();
    let root = body_selector
        .as_ref()
        .and_then(|sel| document.select(sel).next())
        .map(|body| *body)
        .unwrap_or_else(|| document.tree.root());

    let mut chunks: Vec<&str> = Vec::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else { continue };
        let hidden = node
            .ancestors()
            .filter_map(|a| a.value().as_element())
            .any(|el| HIDDEN.iter().any(|name| *name == el.name()));
        if !hidden {
            chunks.push(text);
        }
    }

    chunks
        .iter()
        .flat_map(|chunk| chunk.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_scripts_and_styles() {
        let html = r#"<html><head><title>T</title><style>p{color:red}</style></head>
            <body><h1>Heading</h1><script>var x = 1;</script>
            <p>First   paragraph.</p><noscript>enable js</noscript><p>Second</p></body></html>"#;

        assert_eq!(visible_text(html), "Heading First paragraph. Second");
    }

    #[test]
    fn test_visible_text_fragment() {
        assert_eq!(visible_text("<div>just <b>some</b> text</div>"), "just some text");
    }

    #[test]
    fn test_visible_text_empty() {
        assert_eq!(visible_text("<html><body><script>x</script></body></html>"), "");
    }
}
