use crate::domain::GridView;

pub const TABLE_CLASS: &str = "plant-grid";
pub const INDEX_CLASS: &str = "index";
pub const CELL_CLASS: &str = "plant-grid_station";
pub const ACTIVE_CLASS: &str = "plant-grid_active";

/// Renders a grid view as an HTML `<table>` fragment.
pub fn render_html(view: &GridView) -> String {
    let mut out = format!("<table class=\"{TABLE_CLASS}\">\n");

    out.push_str("  <thead>\n");
    out.push_str(&format!("    <tr><th class=\"{INDEX_CLASS}\"></th>"));
    for header in &view.column_headers {
        out.push_str(&format!("<th>{}</th>", escape(header)));
    }
    out.push_str("</tr>\n  </thead>\n");

    out.push_str("  <tbody>\n");
    for row in &view.rows {
        out.push_str(&format!("    <tr><th class=\"{INDEX_CLASS}\">{}</th>", escape(&row.header)));
        for cell in &row.cells {
            let class = if cell.is_active() {
                format!("{CELL_CLASS} {ACTIVE_CLASS}")
            } else {
                CELL_CLASS.to_string()
            };
            out.push_str(&format!(
                "<td class=\"{class}\" id=\"{}\"><p>{}</p></td>",
                cell.element_id(),
                escape(&cell.text)
            ));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("  </tbody>\n</table>\n");

    out
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GridRenderer, ResultGrid};
    use serde_json::json;

    #[test]
    fn test_html_structure() {
        let grid = ResultGrid::new(vec![vec![json!("InOut"), json!(null)]]);
        let html = render_html(&GridRenderer::build(&grid));

        assert!(html.starts_with("<table class=\"plant-grid\">"));
        assert!(html.contains("<tr><th class=\"index\"></th><th>1</th><th>2</th></tr>"));
        assert!(html.contains(
            "<td class=\"plant-grid_station plant-grid_active\" id=\"plant-grid-0-0\"><p>InOut</p></td>"
        ));
        assert!(html.contains("<td class=\"plant-grid_station\" id=\"plant-grid-1-0\"><p> </p></td>"));
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.ends_with("  </tbody>\n</table>\n"));
    }

    #[test]
    fn test_html_escapes_cell_text() {
        let grid = ResultGrid::new(vec![vec![json!("<b>&</b>")]]);
        let html = render_html(&GridRenderer::build(&grid));
        assert!(html.contains("<p>&lt;b&gt;&amp;&lt;/b&gt;</p>"));
        assert!(!html.contains("<b>"));
    }
}
