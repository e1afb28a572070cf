//! Self-contained HTML wrapper for a rendered report.
//!
//! The rich renderer produces plain text when colors are off; the HTML
//! export embeds that text, escaped, in a `<pre>` block so the document
//! needs no external assets.

const PAGE_TITLE: &str = "Gateway API Network Topology";

/// Wrap an unstyled report in a standalone HTML document.
pub fn document(report: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ background: #0d1117; color: #c9d1d9; margin: 2em; }}
pre {{ font-family: "SFMono-Regular", Consolas, "Liberation Mono", monospace; font-size: 13px; line-height: 1.35; }}
</style>
</head>
<body>
<pre>{body}</pre>
</body>
</html>
"#,
        title = PAGE_TITLE,
        body = escape(report)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
