//! HTML rendering for the question form.

use askrelay_core::AnswerRecord;
use html_escape::encode_text;

/// What the page shows below the form.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub question: &'a str,
    pub record: Option<&'a AnswerRecord>,
    pub error: Option<&'a str>,
}

pub fn render(view: &PageView<'_>) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        r#"<form method="post" action="/">
  <label for="question">Question</label>
  <textarea id="question" name="question" rows="3" cols="60">{}</textarea>
  <button type="submit">Ask</button>
</form>
"#,
        encode_text(view.question)
    ));

    if let Some(record) = view.record {
        body.push_str(&render_record(record));
    }

    if let Some(error) = view.error {
        body.push_str(&format!(
            "<section class=\"error\">\n  <h2>Error</h2>\n  <pre>{}</pre>\n</section>\n",
            encode_text(error)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>askrelay</title>
</head>
<body>
<h1>LLM Q&amp;A</h1>
{body}</body>
</html>
"#
    )
}

fn render_record(record: &AnswerRecord) -> String {
    let mut section = format!(
        r#"<section class="result">
  <h2>Result</h2>
  <p><strong>Processed question:</strong> {}</p>
  <p><strong>Source:</strong> {}</p>
  <pre class="answer">{}</pre>
"#,
        encode_text(record.processed()),
        encode_text(record.source()),
        encode_text(record.answer())
    );

    if !record.errors().is_empty() {
        section.push_str("  <details>\n    <summary>Provider errors</summary>\n    <ul>\n");
        for error in record.errors() {
            section.push_str(&format!("      <li>{}</li>\n", encode_text(error)));
        }
        section.push_str("    </ul>\n  </details>\n");
    }

    section.push_str("</section>\n");
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_has_form_only() {
        let html = render(&PageView::default());

        assert!(html.contains(r#"<form method="post" action="/">"#));
        assert!(html.contains(r#"name="question""#));
        assert!(!html.contains("class=\"result\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_record_rendered_and_escaped() {
        let record = AnswerRecord::answered(
            "<script>",
            "script",
            "prompt",
            "1 < 2 & 3 > 2",
            "gemini",
            vec!["HuggingFace API error: 500 <html>".to_string()],
        );
        let html = render(&PageView {
            question: "<script>",
            record: Some(&record),
            error: None,
        });

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;</textarea>"));
        assert!(html.contains("1 &lt; 2 &amp; 3 &gt; 2"));
        assert!(html.contains("<strong>Source:</strong> gemini"));
        assert!(html.contains("<li>HuggingFace API error: 500 &lt;html&gt;</li>"));
    }

    #[test]
    fn test_error_block_rendered() {
        let html = render(&PageView {
            question: "q",
            record: None,
            error: Some("task panicked\nat line 1"),
        });

        assert!(html.contains("<h2>Error</h2>"));
        assert!(html.contains("task panicked\nat line 1"));
    }
}
