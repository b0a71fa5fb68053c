//! Plain-text helpers for HTML post bodies.

/// Length of a generated excerpt, in characters.
pub const EXCERPT_LENGTH: usize = 150;

/// Drop tags, decode common entities and collapse whitespace.
///
/// Only a complete `<...>` run counts as a tag. Entities are decoded after
/// tags are gone, so escaped text like `&lt;` stays in the output.
pub fn strip_html(html: &str) -> String {
    let text = remove_tags(html)
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn remove_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                text.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    text.push_str(rest);
    text
}

/// First [`EXCERPT_LENGTH`] characters of the plain text, with `...` when cut.
pub fn excerpt(html: &str) -> String {
    let text = strip_html(html);
    if text.chars().count() > EXCERPT_LENGTH {
        let mut cut: String = text.chars().take(EXCERPT_LENGTH).collect();
        cut.push_str("...");
        cut
    } else {
        text
    }
}

/// The `src` of the first `<img>` tag, if any.
pub fn first_image(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut offset = 0;

    while let Some(found) = lower[offset..].find("<img") {
        let start = offset + found;
        let end = lower[start..].find('>').map(|e| start + e)?;
        let tag = &html[start..end];
        let tag_lower = &lower[start..end];

        if let Some(src_at) = tag_lower.find("src=") {
            let rest = &tag[src_at + 4..];
            let quote = rest.chars().next().filter(|q| *q == '"' || *q == '\'');
            if let Some(quote) = quote {
                if let Some(close) = rest[1..].find(quote) {
                    let src = &rest[1..1 + close];
                    if !src.is_empty() {
                        return Some(src.to_string());
                    }
                }
            }
        }
        offset = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Hello&nbsp;<b>world</b></p>\n\n<p>Fish &amp; chips</p>"),
            "Hello world Fish & chips"
        );
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn test_strip_html_keeps_escaped_and_unclosed_brackets() {
        assert_eq!(
            strip_html("<p>Prices: 5 &lt; 6 always</p>"),
            "Prices: 5 < 6 always"
        );
        assert_eq!(strip_html("<p>a &lt;b&gt; tag</p>"), "a <b> tag");
        assert_eq!(strip_html("<b>1</b> < 2 and more"), "1 < 2 and more");
        assert_eq!(strip_html("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_excerpt_truncates() {
        let body = format!("<p>{}</p>", "a".repeat(200));
        let short = excerpt(&body);
        assert_eq!(short.chars().count(), EXCERPT_LENGTH + 3);
        assert!(short.ends_with("..."));

        assert_eq!(excerpt("<p>Short post</p>"), "Short post");
    }

    #[test]
    fn test_first_image() {
        let html = r#"<p>Intro</p><IMG class="hero" src='/images/a.jpg'><img src="/images/b.jpg">"#;
        assert_eq!(first_image(html).as_deref(), Some("/images/a.jpg"));
        assert_eq!(first_image("<p>No pictures</p>"), None);
        assert_eq!(first_image("<img alt=\"x\"><img src=\"c.png\">").as_deref(), Some("c.png"));
    }
}
