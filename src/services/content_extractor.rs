use scraper::{Html, Node};

use crate::services::PageRenderer;

/// Leading slice of cleaned text handed to the extraction prompt.
pub const CONTENT_CHAR_BUDGET: usize = 5_000;

const EXCLUDED_TAGS: [&str; 6] = ["script", "style", "nav", "footer", "noscript", "form"];

/// Render a page and reduce it to visible text. `None` means the URL is
/// done for this run: either the browser failed or the page had no text.
pub async fn fetch_and_clean(renderer: &dyn PageRenderer, url: &str) -> Option<String> {
    let html = renderer.render(url).await?;
    let text = clean_html(&html);

    match text.is_empty() {
        true => None,
        false => Some(text),
    }
}

/// Strip non-content subtrees and join the remaining text nodes with
/// single spaces, each node trimmed.
pub fn clean_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<String> = vec![];

    for node in document.root_element().descendants() {
        if let Node::Text(text) = node.value() {
            let excluded = node.ancestors().any(|ancestor| match ancestor.value() {
                Node::Element(element) => EXCLUDED_TAGS.contains(&element.name()),
                _ => false,
            });
            if !excluded {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
        }
    }

    parts.join(" ")
}

/// Truncate on a character boundary, never inside a code point.
pub fn truncate_to_budget(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::{clean_html, truncate_to_budget};

    #[test]
    fn clean_html_drops_non_content_tags() {
        let html = r#"
            <html>
              <head><style>body { color: red; }</style></head>
              <body>
                <nav><a href="/">Home</a></nav>
                <h1>Acme Corp</h1>
                <p>123 Main St, Ohio</p>
                <script>console.log("tracking");</script>
                <noscript>Enable JS</noscript>
                <form><input name="q"/><label>Search</label></form>
                <footer>Copyright Acme</footer>
              </body>
            </html>"#;

        let text = clean_html(html);

        assert_eq!(text, "Acme Corp 123 Main St, Ohio");
    }

    #[test]
    fn clean_html_joins_text_nodes_with_single_spaces() {
        let html = "<div><span>  (555)  </span><span>123-4567</span></div>";

        assert_eq!(clean_html(html), "(555) 123-4567");
    }

    #[test]
    fn clean_html_on_empty_markup_is_empty() {
        assert_eq!(clean_html("<html><body></body></html>"), "");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_to_budget("hello world", 5), "hello");
        assert_eq!(truncate_to_budget("hi", 5), "hi");
        // Multibyte text must not split a code point.
        assert_eq!(truncate_to_budget("çévü", 2), "çé");
    }
}
