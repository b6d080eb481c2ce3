use ammonia::{Builder, UrlRelative};
use pulldown_cmark::{Options, Parser, html};

/// Renders blog content to sanitized HTML for detail responses.
///
/// Content arrives from the store as markdown or plain text; either way the
/// output must not carry scripts or relative URLs.
pub fn safe_content_html(content: &str) -> String {
    let options = Options::all();
    let parser = Parser::new_ext(content, options);

    let mut raw_html = String::with_capacity(content.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_rich_text(&raw_html)
}

/// Strips unsafe HTML from rich-text content.
pub fn sanitize_rich_text(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::Deny)
        .clean(content)
        .to_string()
}
