//! Cover page rendering for EPUB.
//!
//! The cover page shows the cover image full-page. It is marked with EPUB's
//! cover reference type so e-readers display it appropriately in library views.

use crate::book::{BookMetadata, CoverImage};

/// Render the cover page as XHTML.
pub fn render(metadata: &BookMetadata, cover: &CoverImage) -> String {
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
<div class="cover">
<img src="{src}" alt="{title}"/>
</div>
</body>
</html>"#,
        lang = html_escape::encode_double_quoted_attribute(&metadata.language),
        title = html_escape::encode_double_quoted_attribute(&metadata.title),
        src = html_escape::encode_double_quoted_attribute(&cover.file_name),
    )
}
