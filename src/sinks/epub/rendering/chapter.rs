//! Chapter document rendering for EPUB.
//!
//! Each chapter becomes one XHTML document: the title as a heading followed by
//! one `<p>` per paragraph. Fragments arrive already escaped.

use crate::formatter::FormattedChapter;

/// Render a chapter as XHTML.
pub fn render(chapter: &FormattedChapter, language: &str) -> String {
    let paragraphs = chapter
        .fragments
        .iter()
        .map(|fragment| format!("<p>{}</p>", fragment.as_str()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="{lang}">
<head>
    <meta http-equiv="Content-Type" content="text/html; charset=UTF-8"/>
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="stylesheet.css"/>
</head>
<body>
<h2>{title}</h2>
{paragraphs}
</body>
</html>"#,
        lang = html_escape::encode_double_quoted_attribute(language),
        title = html_escape::encode_text(&chapter.title),
        paragraphs = paragraphs,
    )
}
