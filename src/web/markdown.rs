// src/web/markdown.rs — Chat turn rendering

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Render Markdown to HTML. Raw HTML in the source is shown as text, not interpreted,
/// and link or image targets with any scheme other than http, https or mailto are dropped.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Keep relative targets and allowed schemes; anything else becomes an empty target.
/// Browsers ignore whitespace and control characters inside a scheme, so those are
/// stripped before the check.
fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let scheme_end = normalized.find(':');
    let path_start = normalized.find(['/', '?', '#']);
    let scheme = match (scheme_end, path_start) {
        (Some(colon), Some(path)) if path < colon => None,
        (Some(colon), _) => Some(&normalized[..colon]),
        (None, _) => None,
    };

    match scheme {
        Some(s) if !ALLOWED_SCHEMES.contains(&s) => CowStr::Borrowed(""),
        _ => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let out = render_markdown("Total sales: **15** units");
        assert_eq!(out, "<p>Total sales: <strong>15</strong> units</p>\n");
    }

    #[test]
    fn test_tables_enabled() {
        let out = render_markdown("| Class | Qty |\n|---|---|\n| Shoes | 12 |\n");
        assert!(out.contains("<table>"));
        assert!(out.contains("<td>Shoes</td>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = render_markdown("hi <script>alert(1)</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_link_targets_are_dropped() {
        let out = render_markdown("See [details](javascript:alert(document.cookie))");
        assert!(!out.contains("javascript:"));
        assert!(out.contains(r#"<a href="">details</a>"#));

        let out = render_markdown("[x](JavaScript:alert(1)) ![y](data:text/html;base64,PHNjcmlwdD4=)");
        assert!(!out.to_lowercase().contains("javascript:"));
        assert!(!out.contains("data:"));
    }

    #[test]
    fn test_web_and_relative_links_kept() {
        let out = render_markdown("[report](https://retail.example/r?id=1) [mail](mailto:a@b.c) [home](/)");
        assert!(out.contains(r#"href="https://retail.example/r?id=1""#));
        assert!(out.contains(r#"href="mailto:a@b.c""#));
        assert!(out.contains(r#"href="/""#));
    }
}
