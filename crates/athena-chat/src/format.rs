//! Display formatting for answers and data previews
//!
//! Cell values arrive as arbitrary JSON; these helpers turn them into
//! the strings the table renderer shows. Row count is capped so a huge
//! result never floods the transcript.

use serde_json::Value;

use crate::api::DataPreview;
use crate::state::{Message, MessageRole};

/// Rows shown in an inline preview table.
pub const PREVIEW_ROW_LIMIT: usize = 10;

/// Longest string a cell shows before truncation.
const CELL_TEXT_LIMIT: usize = 50;

/// Render one JSON cell for the preview table.
///
/// - null and missing values render empty
/// - integers get thousands separators
/// - floats get thousands separators on the integer part, two decimals
/// - long strings are cut to 47 chars plus an ellipsis
pub fn format_cell_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                group_thousands(&i.to_string())
            } else if let Some(f) = n.as_f64() {
                let formatted = format!("{:.2}", f);
                let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
                format!("{}.{}", group_thousands(int_part), frac_part)
            } else {
                n.to_string()
            }
        }
        Value::String(s) => truncate_cell(s),
        other => truncate_cell(&other.to_string()),
    }
}

fn truncate_cell(s: &str) -> String {
    if s.chars().count() > CELL_TEXT_LIMIT {
        let head: String = s.chars().take(CELL_TEXT_LIMIT - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// Insert commas into a (possibly signed) decimal integer string.
fn group_thousands(digits: &str) -> String {
    let (sign, body) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len() + body.len() / 3 + 1);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    format!("{}{}", sign, out)
}

/// Wrap rupee amounts in a highlight span so the stylesheet can pick
/// them out of the answer text.
///
/// A figure is the sign, optional whitespace, then digits and commas.
/// The fractional part stays outside the span.
pub fn highlight_currency(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '₹' {
            out.push(c);
            continue;
        }
        let mut span = String::from('₹');
        while let Some(&next) = chars.peek() {
            if next.is_whitespace() {
                span.push(next);
                chars.next();
            } else {
                break;
            }
        }
        // Without a leading digit this was just a stray sign
        if !matches!(chars.peek(), Some(d) if d.is_ascii_digit()) {
            out.push_str(&span);
            continue;
        }
        while let Some(&next) = chars.peek() {
            if next.is_ascii_digit() || next == ',' {
                span.push(next);
                chars.next();
            } else {
                break;
            }
        }
        out.push_str(&format!("<span class=\"currency-value\">{}</span>", span));
    }
    out
}

/// The rows an inline table shows: at most [`PREVIEW_ROW_LIMIT`].
pub fn preview_rows(preview: &DataPreview) -> &[serde_json::Map<String, Value>] {
    let shown = preview.rows.len().min(PREVIEW_ROW_LIMIT);
    &preview.rows[..shown]
}

/// Minimal HTML escaping for text that lands in `innerHTML`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Message body as HTML: escaped, newlines to `<br>`, and rupee
/// figures highlighted for assistant messages.
pub fn message_html(content: &str, highlight: bool) -> String {
    let escaped = escape_html(content).replace('\n', "<br>");
    if highlight {
        highlight_currency(&escaped)
    } else {
        escaped
    }
}

/// Inline result table for an answer backed by a query.
pub fn data_preview_html(preview: &DataPreview) -> String {
    let rows = preview_rows(preview);
    if preview.columns.is_empty() || rows.is_empty() {
        return String::new();
    }
    let elapsed = preview.elapsed_ms.unwrap_or(0);

    let header: String = preview
        .columns
        .iter()
        .map(|col| format!("<th>{}</th>", escape_html(col)))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = preview
                .columns
                .iter()
                .map(|col| {
                    let value = row.get(col).unwrap_or(&Value::Null);
                    format!("<td>{}</td>", escape_html(&format_cell_value(value)))
                })
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        "<div class=\"data-preview\">\
         <div class=\"data-preview-header\">\
         <span class=\"data-preview-title\">Data Preview</span>\
         <span class=\"data-preview-meta\">{} rows &bull; {}ms</span>\
         </div>\
         <div class=\"data-preview-table-container\">\
         <table class=\"data-preview-table\">\
         <thead><tr>{}</tr></thead>\
         <tbody>{}</tbody>\
         </table></div></div>",
        rows.len(),
        elapsed,
        header,
        body
    )
}

/// CSS class for a transcript entry's root element.
pub fn message_css_class(message: &Message) -> &'static str {
    match message.role {
        MessageRole::User => "message user-message",
        MessageRole::Assistant => "message athena-message",
    }
}

/// Full inner HTML for one transcript entry: avatar, header with
/// sender, time and optional latency badge, body, and any preview
/// table or clarification block.
pub fn message_element_html(message: &Message) -> String {
    let is_user = message.role == MessageRole::User;

    let avatar = if is_user {
        "<div class=\"user-avatar\"><div class=\"user-icon\"></div></div>"
    } else {
        "<div class=\"athena-avatar\">\
         <img src=\"./Athena Docs/Logo/Athena Face.png\" alt=\"Athena\" \
         class=\"athena-face-small\" /></div>"
    };

    let latency = match (is_user, message.latency_ms) {
        (false, Some(ms)) => format!("<span class=\"latency-indicator\">{}ms</span>", ms),
        _ => String::new(),
    };

    let text_class = if message.is_error {
        "message-text error-message"
    } else {
        "message-text"
    };

    let mut html = format!(
        "<div class=\"message-avatar\">{}</div>\
         <div class=\"message-content\">\
         <div class=\"message-header\">\
         <span class=\"sender-name\">{}</span>\
         <span class=\"message-time\">{}</span>{}\
         </div>\
         <div class=\"{}\">{}</div>",
        avatar,
        escape_html(&message.sender),
        escape_html(&message.timestamp),
        latency,
        text_class,
        message_html(&message.content, !is_user)
    );

    if !is_user {
        if let Some(preview) = &message.data_preview {
            html.push_str(&data_preview_html(preview));
        }
        if let Some(clarify) = &message.clarify {
            html.push_str(&clarification_html(clarify));
        }
    }
    html.push_str("</div>");
    html
}

/// Clarifying question with one button per option. The buttons carry
/// their option index in `data-option` for the click handler.
pub fn clarification_html(clarify: &crate::api::Clarification) -> String {
    if clarify.options.is_empty() {
        return String::new();
    }
    let buttons: String = clarify
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            format!(
                "<button class=\"clarification-option\" data-option=\"{}\">{}</button>",
                i,
                escape_html(option)
            )
        })
        .collect();
    format!(
        "<div class=\"clarification-section\">\
         <div class=\"clarification-question\"><strong>{}</strong></div>\
         <div class=\"clarification-options\">{}</div>\
         </div>",
        escape_html(&clarify.question),
        buttons
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_renders_empty() {
        assert_eq!(format_cell_value(&Value::Null), "");
    }

    #[test]
    fn test_integer_thousands_grouping() {
        assert_eq!(format_cell_value(&json!(0)), "0");
        assert_eq!(format_cell_value(&json!(999)), "999");
        assert_eq!(format_cell_value(&json!(1000)), "1,000");
        assert_eq!(format_cell_value(&json!(1250000)), "1,250,000");
        assert_eq!(format_cell_value(&json!(-45678)), "-45,678");
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(format_cell_value(&json!(1234.5)), "1,234.50");
        // {:.2} rounds ties to even, so .125 lands on .12 not .13
        assert_eq!(format_cell_value(&json!(0.125)), "0.12");
        assert_eq!(format_cell_value(&json!(0.126)), "0.13");
        assert_eq!(format_cell_value(&json!(-9876.543)), "-9,876.54");
    }

    #[test]
    fn test_long_string_truncation() {
        let long = "x".repeat(80);
        let rendered = format_cell_value(&json!(long));
        assert_eq!(rendered.chars().count(), 50);
        assert!(rendered.ends_with("..."));

        let exact = "y".repeat(50);
        assert_eq!(format_cell_value(&json!(exact)), exact);
    }

    #[test]
    fn test_currency_highlighting() {
        // The decimal part stays outside the span.
        assert_eq!(
            highlight_currency("Total: ₹1,250,000.50 this quarter"),
            "Total: <span class=\"currency-value\">₹1,250,000</span>.50 this quarter"
        );
        // Whitespace between sign and digits is tolerated and captured.
        assert_eq!(
            highlight_currency("about ₹ 500 in fees"),
            "about <span class=\"currency-value\">₹ 500</span> in fees"
        );
        // Bare symbol with no digits stays untouched.
        assert_eq!(highlight_currency("the ₹ sign"), "the ₹ sign");
        assert_eq!(highlight_currency("no money here"), "no money here");
    }

    #[test]
    fn test_preview_row_cap() {
        let mut preview = DataPreview::default();
        preview.columns = vec!["n".to_string()];
        for i in 0..25 {
            let mut row = serde_json::Map::new();
            row.insert("n".to_string(), json!(i));
            preview.rows.push(row);
        }
        assert_eq!(preview_rows(&preview).len(), 10);

        preview.rows.truncate(3);
        assert_eq!(preview_rows(&preview).len(), 3);
    }

    #[test]
    fn test_html_escaping() {
        assert_eq!(
            escape_html(r#"<script>alert("hi")</script>"#),
            "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b's"), "a &amp; b&#39;s");
    }

    #[test]
    fn test_message_html_newlines_and_highlight() {
        assert_eq!(
            message_html("line one\nline two", false),
            "line one<br>line two"
        );
        let html = message_html("Total ₹500 <b>bold</b>", true);
        assert!(html.contains("<span class=\"currency-value\">₹500</span>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_data_preview_table_html() {
        let mut preview = DataPreview::default();
        preview.columns = vec!["region".to_string(), "total".to_string()];
        preview.elapsed_ms = Some(38);
        let mut row = serde_json::Map::new();
        row.insert("region".to_string(), json!("APAC"));
        row.insert("total".to_string(), json!(1250000));
        preview.rows.push(row);

        let html = data_preview_html(&preview);
        assert!(html.contains("<th>region</th>"));
        assert!(html.contains("<td>1,250,000</td>"));
        assert!(html.contains("1 rows &bull; 38ms"));

        // Missing column values render as empty cells.
        preview.rows[0].remove("total");
        assert!(data_preview_html(&preview).contains("<td></td>"));

        preview.rows.clear();
        assert_eq!(data_preview_html(&preview), "");
    }

    #[test]
    fn test_clarification_html() {
        let clarify = crate::api::Clarification {
            question: "Which year?".to_string(),
            options: vec!["2024".to_string(), "2025".to_string()],
        };
        let html = clarification_html(&clarify);
        assert!(html.contains("<strong>Which year?</strong>"));
        assert!(html.contains("data-option=\"0\">2024</button>"));
        assert!(html.contains("data-option=\"1\">2025</button>"));

        let empty = crate::api::Clarification {
            question: "?".to_string(),
            options: vec![],
        };
        assert_eq!(clarification_html(&empty), "");
    }

    #[test]
    fn test_message_element_structure() {
        let mut msg = Message::assistant("Revenue was ₹900");
        msg.timestamp = "10:42".to_string();
        msg.latency_ms = Some(412);
        let html = message_element_html(&msg);
        assert_eq!(message_css_class(&msg), "message athena-message");
        assert!(html.contains("<span class=\"sender-name\">Athena</span>"));
        assert!(html.contains("<span class=\"message-time\">10:42</span>"));
        assert!(html.contains("<span class=\"latency-indicator\">412ms</span>"));
        assert!(html.contains("currency-value"));

        let user = Message::user("hi <there>", "Seeker");
        let user_html = message_element_html(&user);
        assert_eq!(message_css_class(&user), "message user-message");
        assert!(user_html.contains("user-avatar"));
        assert!(user_html.contains("hi &lt;there&gt;"));
        // User bubbles never carry a latency badge.
        assert!(!user_html.contains("latency-indicator"));
    }

    #[test]
    fn test_error_message_gets_error_class() {
        let mut msg = Message::error("I apologize, seeker.");
        msg.timestamp = "10:00".to_string();
        assert!(message_element_html(&msg).contains("message-text error-message"));
    }
}
