//! Converts entry bodies from Markdown into HTML and defines [`TrustedHtml`],
//! the one type that templates insert without escaping.

use maud::Render;
use pulldown_cmark::{html, Options, Parser};
use std::fmt;

/// HTML produced by [`to_html`]. Entry bodies are written by the site's author
/// and converted by us, so their markup is trusted and inserted into pages
/// verbatim. Every other string in a template is escaped by `maud`; keeping
/// the exemption in its own type means it can't leak to other values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Render for TrustedHtml {
    /// Implements [`Render`] for [`TrustedHtml`] by appending the markup as-is.
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.0);
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts `markdown` to HTML. Besides CommonMark this enables definition
/// lists, footnotes, strikethrough and tables, and typesets straight quotes,
/// `--`/`---` and `...` as curly quotes, dashes and ellipses.
pub fn to_html(markdown: &str) -> TrustedHtml {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_DEFINITION_LIST);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    TrustedHtml(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(
            "<h1>Hello</h1>\n<p>World.</p>\n",
            to_html("# Hello\n\nWorld.").as_str()
        );
    }

    #[test]
    fn test_emphasis_links_and_code() {
        let html = to_html(indoc! {"
            Some *emphasis* and a [link](http://example.com).

                fn main() {}
        "});
        assert!(html.as_str().contains("<em>emphasis</em>"));
        assert!(html
            .as_str()
            .contains(r#"<a href="http://example.com">link</a>"#));
        assert!(html.as_str().contains("<pre><code>fn main() {}"));
    }

    #[test]
    fn test_definition_list() {
        let html = to_html("Term\n: Definition\n");
        assert!(html.as_str().contains("<dl>"), "{}", html);
        assert!(html.as_str().contains("<dt>Term</dt>"), "{}", html);
    }

    #[test]
    fn test_smart_punctuation() {
        let html = to_html(r#"She said "hi" -- twice..."#);
        assert!(html.as_str().contains('\u{201c}'), "{}", html);
        assert!(html.as_str().contains('\u{201d}'), "{}", html);
        assert!(html.as_str().contains('\u{2013}'), "{}", html);
        assert!(html.as_str().contains('\u{2026}'), "{}", html);
    }

    #[test]
    fn test_render_is_not_escaped() {
        let html = to_html("*hi*");
        assert_eq!("<p><em>hi</em></p>\n", html.render().into_string());
    }
}
