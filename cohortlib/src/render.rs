//! Table markup for cohort grids.
//!
//! `render` maps a `DisplayGrid` onto a small element tree carrying stable
//! class names, so hosts can style or query the output:
//!
//! ```text
//! div.CohortTable
//!   table.CohortTable-table
//!     thead > tr.CohortTable-tr > th.CohortTable-th*
//!     tbody > tr.CohortTable-tr* > td.CohortTable-td*
//! ```
//!
//! The tree can be serialized as JSON or written out as HTML.

use serde::{Deserialize, Serialize};

use crate::options::Settings;
use crate::report::Response;
use crate::table::{tablize, DisplayGrid};
use crate::Result;

pub const CONTAINER_CLASS: &str = "CohortTable";
pub const TABLE_CLASS: &str = "CohortTable-table";
pub const ROW_CLASS: &str = "CohortTable-tr";
pub const HEADER_CELL_CLASS: &str = "CohortTable-th";
pub const CELL_CLASS: &str = "CohortTable-td";

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Element {
        tag: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        class: Option<String>,
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
}

impl Node {
    fn element(tag: &str, class: Option<&str>, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.to_string(),
            class: class.map(str::to_string),
            children,
        }
    }

    fn text(text: &str) -> Self {
        Node::Text {
            text: text.to_string(),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text { text } => out.push_str(&html_escape(text)),
            Node::Element {
                tag,
                class,
                children,
            } => {
                match class {
                    Some(class) => {
                        out.push_str(&format!("<{} class=\"{}\">", tag, html_escape(class)))
                    }
                    None => out.push_str(&format!("<{}>", tag)),
                }
                for child in children {
                    child.write_html(out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }
}

/// Rendered cohort table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    pub root: Node,
}

impl Markup {
    /// Build the table markup for a grid.
    pub fn from_grid(grid: &DisplayGrid) -> Self {
        let header_cells = grid
            .headers
            .iter()
            .map(|header| Node::element("th", Some(HEADER_CELL_CLASS), vec![Node::text(header)]))
            .collect();

        let body_rows = grid
            .rows
            .iter()
            .map(|row| {
                let cells = row
                    .iter()
                    .map(|cell| Node::element("td", Some(CELL_CLASS), vec![Node::text(cell)]))
                    .collect();
                Node::element("tr", Some(ROW_CLASS), cells)
            })
            .collect();

        let table = Node::element(
            "table",
            Some(TABLE_CLASS),
            vec![
                Node::element(
                    "thead",
                    None,
                    vec![Node::element("tr", Some(ROW_CLASS), header_cells)],
                ),
                Node::element("tbody", None, body_rows),
            ],
        );

        Markup {
            root: Node::element("div", Some(CONTAINER_CLASS), vec![table]),
        }
    }

    /// Serialize the tree as HTML, escaping all text content.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.root.write_html(&mut out);
        out
    }
}

/// Render the cohort table for a response.
///
/// Uses the first report in the response and the cohort size from
/// `settings`. The grid is rebuilt on every call.
pub fn render(response: &Response, settings: &Settings) -> Result<Markup> {
    let report = response.first_report()?;
    let grid = tablize(report, settings.response_cohort_size)?;
    Ok(Markup::from_grid(&grid))
}

/// Render straight to an HTML string.
pub fn render_html(response: &Response, settings: &Settings) -> Result<String> {
    render(response, settings).map(|markup| markup.to_html())
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
