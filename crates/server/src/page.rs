//! HTML page for the word form and its results.

use std::fmt::Write;
use wordmap_common::DEFAULT_TOP_N;
use wordmap_vector::Exploration;

/// Everything the page shows for one request
#[derive(Debug, Default)]
pub struct PageView<'a> {
    /// Word as typed (echoed back into the form)
    pub word: &'a str,

    /// Neighbor count echoed back into the form
    pub top_n: usize,

    /// Message instead of results (empty input, unknown word, ...)
    pub message: Option<String>,

    pub exploration: Option<&'a Exploration>,
}

impl<'a> PageView<'a> {
    /// Blank form
    pub fn empty() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            ..Default::default()
        }
    }
}

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full page
pub fn render(view: &PageView<'_>) -> String {
    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Word Neighbors</title>\n</head>\n<body>\n<h1>Word Neighbors</h1>\n",
    );

    let _ = write!(
        html,
        "<form method=\"post\" action=\"/\">\n\
         <input type=\"text\" name=\"word\" value=\"{}\" placeholder=\"Enter a word\">\n\
         <input type=\"number\" name=\"topn\" value=\"{}\" min=\"1\">\n\
         <button type=\"submit\">Find</button>\n</form>\n",
        escape_html(view.word),
        view.top_n
    );

    if let Some(message) = &view.message {
        let _ = writeln!(html, "<p class=\"message\">{}</p>", escape_html(message));
    }

    if let Some(exploration) = view.exploration {
        render_results(&mut html, exploration);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_results(html: &mut String, exploration: &Exploration) {
    let _ = writeln!(html, "<h2>{}</h2>", escape_html(&exploration.title()));

    html.push_str("<table class=\"neighbors\">\n<tr><th>Word</th><th>Similarity</th></tr>\n");
    for neighbor in &exploration.neighbors {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{:.4}</td></tr>",
            escape_html(&neighbor.word),
            neighbor.score
        );
    }
    html.push_str("</table>\n");

    html.push_str("<table class=\"points\">\n<tr><th>Word</th><th>x</th><th>y</th></tr>\n");
    for point in &exploration.points {
        let class = if point.is_query { "query" } else { "neighbor" };
        let _ = writeln!(
            html,
            "<tr class=\"{}\"><td>{}</td><td>{:.4}</td><td>{:.4}</td></tr>",
            class,
            escape_html(&point.label),
            point.x,
            point.y
        );
    }
    html.push_str("</table>\n");

    // Raw points for a client-side scatter plot
    let data = serde_json::to_string(&exploration.points)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/");
    let _ = writeln!(
        html,
        "<script type=\"application/json\" id=\"plot-data\">{}</script>",
        data
    );
}
