//! Article-to-message formatting
//!
//! Pure rendering of one [`Article`] into a Telegram-HTML message body.
//! Deterministic, no I/O; absent fields degrade to placeholder text.

use crate::types::{Article, FormattedMessage};

/// Maximum number of content characters included in the message body
const MAX_CONTENT_CHARS: usize = 1000;

/// Ellipsis marker appended when content is truncated
const ELLIPSIS: &str = "...";

/// Placeholder used when an article has no title
const NO_TITLE: &str = "No Title Available";

/// Placeholder used when an article has no content
const NO_CONTENT: &str = "No content available.";

/// Placeholder used when an article has no author
const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Render an article into a Telegram-HTML message
///
/// - Title and content have internal newlines collapsed to single spaces and
///   surrounding whitespace trimmed; text is HTML-escaped.
/// - Content is truncated to the first 1000 characters; the ellipsis marker
///   is appended only when the trimmed content actually exceeds 1000
///   characters, and never for the placeholder.
/// - The "Read More" link uses `read_more_url` verbatim (no URL validation).
/// - Link previews stay enabled (`disable_preview` is always false).
pub fn format(article: &Article) -> FormattedMessage {
    let title = match non_empty(article.title.as_deref()) {
        Some(t) => escape_html(&collapse_newlines(t)),
        None => NO_TITLE.to_string(),
    };

    let content = match non_empty(article.content.as_deref()) {
        Some(c) => {
            let collapsed = collapse_newlines(c);
            let truncated: String = collapsed.chars().take(MAX_CONTENT_CHARS).collect();
            let mut body = escape_html(&truncated);
            if collapsed.chars().count() > MAX_CONTENT_CHARS {
                body.push_str(ELLIPSIS);
            }
            body
        }
        None => NO_CONTENT.to_string(),
    };

    let author = match non_empty(article.author.as_deref()) {
        Some(a) => escape_html(a.trim()),
        None => UNKNOWN_AUTHOR.to_string(),
    };

    let body = format!(
        "<b>{title}</b>\n\n{content}\n\n<a href=\"{url}\">Read More</a>\nSource: Inshorts by {author}",
        url = article.read_more_url,
    );

    FormattedMessage {
        body,
        disable_preview: false,
    }
}

/// Treat absent and whitespace-only values the same way
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Replace internal newlines with single spaces and trim the ends
fn collapse_newlines(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Escape the characters Telegram's HTML parse mode treats specially
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
