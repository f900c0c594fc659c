//! Text helpers shared by rendering and logging
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: UTF-8 safe preview truncation and HTML escaping

/// Maximum length of argument previews written to the log
pub const LOG_PREVIEW_LIMIT: usize = 120;

/// Truncate text to `max_len` bytes on a char boundary, adding an ellipsis if cut
pub fn truncate_preview(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    // Room for "..."
    let mut end = max_len.saturating_sub(3);
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate model output for log lines
pub fn log_preview(text: &str) -> String {
    truncate_preview(text, LOG_PREVIEW_LIMIT)
}

/// Escape text for safe inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
