//! Presentation layer — fixed HTML templates for the submission form and the
//! assembled brief. The same brief markup feeds both the browser response and
//! the PDF export.

pub mod pdf;

use crate::models::Connection;

/// Static submission form. No dynamic data.
pub fn form_page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Sleft Signals</title>
</head>
<body>
  <h1>Sleft Signals</h1>
  <form action="/generate" method="post">
    <label>Business name <input name="business_name" required></label><br>
    <label>Website <input name="website" required></label><br>
    <label>Category <input name="category" required></label><br>
    <label>Location <input name="location" required></label><br>
    <label>Goal <textarea name="user_input"></textarea></label><br>
    <button type="submit">Generate brief</button>
  </form>
</body>
</html>
"#
}

/// Renders a brief: business name heading, summary text, connections list.
pub fn brief_page(business_name: &str, summary: &str, connections: &[Connection]) -> String {
    let mut items = String::new();
    for conn in connections {
        let name = conn.name.as_deref().unwrap_or("Unknown");
        items.push_str("    <li>");
        items.push_str(&escape_html(name));
        if let Some(address) = &conn.address {
            items.push_str(" &mdash; ");
            items.push_str(&escape_html(address));
        }
        if let Some(website) = &conn.website {
            items.push_str(&format!(
                " &mdash; <a href=\"{0}\">{0}</a>",
                escape_html(website)
            ));
        }
        if let Some(rating) = conn.rating {
            items.push_str(&format!(" &mdash; {rating} &#9733;"));
        }
        items.push_str("</li>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Brief: {business}</title>
</head>
<body>
  <h1>{business}</h1>
  <pre style="white-space: pre-wrap; font-family: inherit;">{summary}</pre>
  <h2>People to Connect With</h2>
  <ul>
{items}  </ul>
  <p><a href="/download">Download PDF</a></p>
</body>
</html>
"#,
        business = escape_html(business_name),
        summary = escape_html(summary),
        items = items,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_covers_special_chars() {
        assert_eq!(
            escape_html(r#"<b>"A & B's"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_form_page_posts_to_generate() {
        let html = form_page();
        assert!(html.contains(r#"action="/generate""#));
        for field in ["business_name", "website", "category", "location", "user_input"] {
            assert!(html.contains(&format!(r#"name="{field}""#)), "{field} missing");
        }
    }

    #[test]
    fn test_brief_page_contains_business_and_summary() {
        let html = brief_page("Acme Co", "What's Working: plenty.", &[]);
        assert!(html.contains("<h1>Acme Co</h1>"));
        assert!(html.contains("What&#39;s Working: plenty."));
    }

    #[test]
    fn test_brief_page_renders_connections_with_optional_fields() {
        let connections = vec![
            Connection {
                name: Some("Cedar Coworking".to_string()),
                address: Some("500 Congress Ave".to_string()),
                website: Some("https://cedar.example".to_string()),
                rating: Some(4.6),
            },
            Connection {
                name: Some("Scrape failed: timeout".to_string()),
                address: None,
                website: None,
                rating: None,
            },
        ];
        let html = brief_page("Acme Co", "", &connections);
        assert!(html.contains("Cedar Coworking"));
        assert!(html.contains("500 Congress Ave"));
        assert!(html.contains("https://cedar.example"));
        assert!(html.contains("4.6"));
        assert!(html.contains("Scrape failed: timeout"));
    }

    #[test]
    fn test_brief_page_escapes_injected_markup() {
        let html = brief_page("<script>alert(1)</script>", "", &[]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
