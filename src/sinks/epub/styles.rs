//! CSS for the generated book.
//!
//! One stylesheet is attached to the book and linked from every document. The
//! paragraph rule depends on the indentation setting: when paragraphs already
//! start with a literal indent, a CSS `text-indent` would indent them twice.

/// Generate the stylesheet for the book.
pub fn generate_stylesheet(force_indent: bool) -> String {
    let paragraph_indent = if force_indent { "0" } else { "2em" };

    format!(
        r#"@namespace epub "http://www.idpf.org/2007/ops";

body {{
    font-family: "Noto Serif CJK SC", "Songti SC", SimSun, serif;
    line-height: 1.5;
    text-align: justify;
    padding: 0 1em;
}}

h1, h2 {{
    text-align: center;
    font-weight: bold;
    margin: 1em 0;
}}

p {{
    text-indent: {paragraph_indent};
    margin: 0.5em 0;
    padding: 0;
}}

/* Cover page */
.cover {{
    text-align: center;
    margin: 0;
    padding: 0;
}}

.cover img {{
    max-width: 100%;
    max-height: 100%;
}}
"#
    )
}
