// Copyright (c) 2025 dlc-diff contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-width table rendering for diff results.
//!
//! The reporter writes to any [`io::Write`] destination, so tests capture
//! rendered text in a buffer instead of scraping terminal output. Column
//! widths are computed per table from header and content lengths, with a
//! 40-character minimum for content columns.
//!
//! Modified values are highlighted with ANSI colors via the `colored`
//! crate. [`Reporter::new`] enables color only when standard output is an
//! interactive terminal on a supporting platform; [`Reporter::plain`]
//! disables it unconditionally.

use crate::aggregate::Comparison;
use crate::result::{count_phrase, DiffResult, UniqueLayerGroup, Verdict};
use colored::Colorize;
use std::io::{self, Write};

/// Minimum width of a content (per-model value) column.
pub const MIN_CONTENT_WIDTH: usize = 40;

/// Visual style of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    /// A value modified between the two models (yellow).
    Changed,
    /// A category that compared identical (green).
    Good,
    /// A category that compared different (red).
    Bad,
}

/// One table cell: text plus display style.
#[derive(Debug, Clone)]
struct Cell {
    text: String,
    style: Style,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::Plain,
        }
    }

    fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

// ── Value alignment ────────────────────────────────────────────────

/// One rendered row of an aligned value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AlignedRow {
    /// Identical value present in both models.
    Unchanged(String),
    /// Same parameter key, different value; highlighted in the table.
    Modified { one: String, two: String },
    /// Value present only in the first model.
    OnlyOne(String),
    /// Value present only in the second model.
    OnlyTwo(String),
}

/// The parameter key of a value string: the substring before the first
/// colon, or the whole string when there is none.
fn param_key(value: &str) -> &str {
    value.split(':').next().unwrap_or(value)
}

/// Pairs up two value lists with a greedy three-tier heuristic.
///
/// For each of model one's values, in list order, against model two's
/// remaining values: an exact match renders as unchanged; a match on the
/// parameter key renders as modified; otherwise the value belongs to
/// model one alone. Whatever remains of model two's list afterwards
/// belongs to model two alone.
///
/// This is a best-effort diff alignment, not a minimum-edit-distance one:
/// ties go to the first remaining match.
pub(crate) fn align_values(one: &[String], two: &[String]) -> Vec<AlignedRow> {
    let mut remaining: Vec<String> = two.to_vec();
    let mut rows = Vec::with_capacity(one.len().max(two.len()));

    for value in one {
        if let Some(pos) = remaining.iter().position(|r| r == value) {
            remaining.remove(pos);
            rows.push(AlignedRow::Unchanged(value.clone()));
        } else if let Some(pos) = remaining
            .iter()
            .position(|r| param_key(r) == param_key(value))
        {
            let matched = remaining.remove(pos);
            rows.push(AlignedRow::Modified {
                one: value.clone(),
                two: matched,
            });
        } else {
            rows.push(AlignedRow::OnlyOne(value.clone()));
        }
    }

    rows.extend(remaining.into_iter().map(AlignedRow::OnlyTwo));
    rows
}

// ── Reporter ───────────────────────────────────────────────────────

/// Renders diff results as plain text to a writer.
pub struct Reporter<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter that colors output only when standard output is
    /// an interactive terminal.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            color: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }

    /// Creates a reporter with color disabled (used by tests and when
    /// output is redirected).
    pub fn plain(writer: W) -> Self {
        Self {
            writer,
            color: false,
        }
    }

    /// Writes a plain one-line message.
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{text}")
    }

    /// Writes a warning line.
    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.writer, "{} {text}", "WARNING:".yellow().bold())
        } else {
            writeln!(self.writer, "WARNING: {text}")
        }
    }

    /// Writes an empty line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    // ── Report sections ────────────────────────────────────────

    /// Renders the model overview and comparison summary tables.
    pub fn summary(&mut self, c: &Comparison) -> io::Result<()> {
        let overview_rows = vec![
            vec![
                Cell::plain("Total layers"),
                Cell::plain(c.layer_count_one.to_string()),
                Cell::plain(c.layer_count_two.to_string()),
            ],
            vec![
                Cell::plain("Total MACs"),
                Cell::plain(c.macs_one.to_string()),
                Cell::plain(c.macs_two.to_string()),
            ],
            vec![
                Cell::plain("Input dimensions"),
                Cell::plain(c.input_dims_one.clone()),
                Cell::plain(c.input_dims_two.clone()),
            ],
        ];
        self.table(
            "Model overview",
            &["Property", c.label_one.as_str(), c.label_two.as_str()],
            &overview_rows,
            &[0, MIN_CONTENT_WIDTH, MIN_CONTENT_WIDTH],
        )?;
        self.blank()?;

        let mut rows = Vec::new();
        rows.push(summary_row(
            "Layer names",
            &c.layers.result,
            unique_layer_note(&c.layers.result),
        ));
        for (label, category) in [
            ("Parameters", &c.parameters),
            ("Dimensions", &c.dimensions),
            ("Weights", &c.weights),
        ] {
            rows.push(summary_row(
                label,
                &category.result,
                shared_layer_note(&category.result),
            ));
        }
        self.table(
            "Comparison summary",
            &["Comparison", "Result", "Differing layers"],
            &rows,
            &[0, 0, 0],
        )
    }

    /// Renders the layers unique to each model, grouped by type.
    ///
    /// Emits one table per model that actually has unique layers.
    pub fn unique_layers(
        &mut self,
        result: &DiffResult,
        label_one: &str,
        label_two: &str,
    ) -> io::Result<()> {
        for (diffs, label) in [(&result.model_one, label_one), (&result.model_two, label_two)] {
            if diffs.is_empty() {
                continue;
            }
            let rows: Vec<Vec<Cell>> = UniqueLayerGroup::group(diffs)
                .into_iter()
                .map(|group| {
                    let layers = group
                        .layers
                        .iter()
                        .map(|l| l.label())
                        .collect::<Vec<_>>()
                        .join(", ");
                    vec![Cell::plain(group.layer_type), Cell::plain(layers)]
                })
                .collect();
            self.table(
                &format!("Layers present only in {label}"),
                &["Type", "Layers"],
                &rows,
                &[0, MIN_CONTENT_WIDTH],
            )?;
            self.blank()?;
        }
        Ok(())
    }

    /// Renders a parameter or dimension diff table.
    ///
    /// The per-model value lists of each differing layer are paired up
    /// with [`align_values`]; modified values are highlighted.
    pub fn value_diff(
        &mut self,
        title: &str,
        result: &DiffResult,
        label_one: &str,
        label_two: &str,
    ) -> io::Result<()> {
        let mut rows = Vec::new();
        for (diff_one, diff_two) in result.model_one.iter().zip(&result.model_two) {
            let mut label = diff_one.label();
            for row in align_values(&diff_one.values, &diff_two.values) {
                let (one, two) = match row {
                    AlignedRow::Unchanged(v) => (Cell::plain(v.clone()), Cell::plain(v)),
                    AlignedRow::Modified { one, two } => (
                        Cell::styled(one, Style::Changed),
                        Cell::styled(two, Style::Changed),
                    ),
                    AlignedRow::OnlyOne(v) => {
                        (Cell::styled(v, Style::Changed), Cell::plain(""))
                    }
                    AlignedRow::OnlyTwo(v) => {
                        (Cell::plain(""), Cell::styled(v, Style::Changed))
                    }
                };
                rows.push(vec![
                    Cell::plain(std::mem::take(&mut label)),
                    one,
                    two,
                ]);
            }
        }
        self.table(
            title,
            &["Layer", label_one, label_two],
            &rows,
            &[0, MIN_CONTENT_WIDTH, MIN_CONTENT_WIDTH],
        )
    }

    /// Renders the list of layers whose weights differ.
    pub fn weight_diff(&mut self, result: &DiffResult) -> io::Result<()> {
        let rows: Vec<Vec<Cell>> = result
            .model_one
            .iter()
            .map(|diff| {
                vec![
                    Cell::plain(diff.id.to_string()),
                    Cell::plain(diff.name.clone()),
                    Cell::plain(diff.layer_type.clone()),
                ]
            })
            .collect();
        self.table(
            "Layers with differing weights",
            &["Id", "Layer", "Type"],
            &rows,
            &[0, MIN_CONTENT_WIDTH, 0],
        )
    }

    // ── Table machinery ────────────────────────────────────────

    /// Writes a titled fixed-width table.
    ///
    /// Each column's width is the maximum of its minimum width, its header
    /// length, and its longest cell.
    fn table(
        &mut self,
        title: &str,
        headers: &[&str],
        rows: &[Vec<Cell>],
        min_widths: &[usize],
    ) -> io::Result<()> {
        let mut widths: Vec<usize> = headers
            .iter()
            .zip(min_widths)
            .map(|(h, &min)| h.len().max(min))
            .collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.text.len());
            }
        }
        // "| " + cell + " " per column, plus the closing "|".
        let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;

        writeln!(self.writer, "{title}")?;
        writeln!(self.writer, "{}", "-".repeat(total))?;
        let header_cells: Vec<Cell> = headers.iter().map(|h| Cell::plain(*h)).collect();
        self.row(&header_cells, &widths)?;
        writeln!(self.writer, "{}", "-".repeat(total))?;
        for row in rows {
            self.row(row, &widths)?;
        }
        writeln!(self.writer, "{}", "-".repeat(total))
    }

    /// Writes one table row, padding before coloring so ANSI escapes do
    /// not skew the column widths.
    fn row(&mut self, cells: &[Cell], widths: &[usize]) -> io::Result<()> {
        let mut line = String::new();
        for (cell, &width) in cells.iter().zip(widths) {
            let padded = format!("{:<width$}", cell.text);
            let rendered = if self.color {
                match cell.style {
                    Style::Plain => padded,
                    Style::Changed => padded.yellow().to_string(),
                    Style::Good => padded.green().to_string(),
                    Style::Bad => padded.red().to_string(),
                }
            } else {
                padded
            };
            line.push_str("| ");
            line.push_str(&rendered);
            line.push(' ');
        }
        line.push('|');
        writeln!(self.writer, "{line}")
    }
}

/// Builds one comparison-summary row with a styled verdict cell.
fn summary_row(label: &str, result: &DiffResult, note: String) -> Vec<Cell> {
    let style = match result.verdict {
        Verdict::Equal => Style::Good,
        Verdict::Differ => Style::Bad,
        Verdict::NotComparable => Style::Changed,
    };
    vec![
        Cell::plain(label),
        Cell::styled(result.verdict.as_str(), style),
        Cell::plain(note),
    ]
}

/// Differing-layer note for the layer-name summary row.
fn unique_layer_note(result: &DiffResult) -> String {
    match result.verdict {
        Verdict::Differ => format!(
            "{} unique to model one, {} unique to model two",
            result.model_one.len(),
            result.model_two.len(),
        ),
        _ => "none".to_string(),
    }
}

/// Differing-layer note for shared-layer comparison rows.
fn shared_layer_note(result: &DiffResult) -> String {
    match (result.verdict, result.shared_count) {
        (Verdict::NotComparable, _) => "-".to_string(),
        (_, Some(shared)) => count_phrase(result.differing_count(), shared),
        (_, None) => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::LayerDiff;

    fn values(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_align_exact_match() {
        let rows = align_values(&values(&["kernel: 3x3"]), &values(&["kernel: 3x3"]));
        assert_eq!(rows, vec![AlignedRow::Unchanged("kernel: 3x3".into())]);
    }

    #[test]
    fn test_align_key_match() {
        let rows = align_values(&values(&["kernel: 3x3"]), &values(&["kernel: 5x5"]));
        assert_eq!(
            rows,
            vec![AlignedRow::Modified {
                one: "kernel: 3x3".into(),
                two: "kernel: 5x5".into(),
            }]
        );
    }

    #[test]
    fn test_align_unmatched_sides() {
        let rows = align_values(&values(&["alpha: 1"]), &values(&["beta: 2"]));
        assert_eq!(
            rows,
            vec![
                AlignedRow::OnlyOne("alpha: 1".into()),
                AlignedRow::OnlyTwo("beta: 2".into()),
            ]
        );
    }

    #[test]
    fn test_align_greedy_first_match() {
        // Two candidates share the key; the first remaining one wins.
        let rows = align_values(
            &values(&["pad: 1"]),
            &values(&["pad: 2", "pad: 3"]),
        );
        assert_eq!(
            rows,
            vec![
                AlignedRow::Modified {
                    one: "pad: 1".into(),
                    two: "pad: 2".into(),
                },
                AlignedRow::OnlyTwo("pad: 3".into()),
            ]
        );
    }

    #[test]
    fn test_align_mixed() {
        let rows = align_values(
            &values(&["kernel: 3x3", "stride: 1", "bias: true"]),
            &values(&["kernel: 5x5", "stride: 1"]),
        );
        assert_eq!(
            rows,
            vec![
                AlignedRow::Modified {
                    one: "kernel: 3x3".into(),
                    two: "kernel: 5x5".into(),
                },
                AlignedRow::Unchanged("stride: 1".into()),
                AlignedRow::OnlyOne("bias: true".into()),
            ]
        );
    }

    #[test]
    fn test_param_key() {
        assert_eq!(param_key("kernel: 3x3"), "kernel");
        assert_eq!(param_key("no-colon"), "no-colon");
        assert_eq!(param_key(""), "");
    }

    #[test]
    fn test_table_minimum_width() {
        let mut buf = Vec::new();
        let mut reporter = Reporter::plain(&mut buf);
        reporter
            .table(
                "T",
                &["A", "B"],
                &[vec![Cell::plain("x"), Cell::plain("y")]],
                &[0, MIN_CONTENT_WIDTH],
            )
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header_line = text.lines().nth(2).unwrap();
        // Column B is padded to the 40-character minimum.
        assert!(header_line.len() >= MIN_CONTENT_WIDTH + 4);
        assert!(header_line.starts_with("| A |"));
    }

    #[test]
    fn test_table_grows_to_content() {
        let long = "a".repeat(60);
        let mut buf = Vec::new();
        let mut reporter = Reporter::plain(&mut buf);
        reporter
            .table(
                "T",
                &["A"],
                &[vec![Cell::plain(long.clone())]],
                &[MIN_CONTENT_WIDTH],
            )
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains(&long));
        // All rows share the same width.
        let lens: Vec<usize> = text.lines().skip(1).map(str::len).collect();
        assert!(lens.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_value_diff_render() {
        let result = DiffResult {
            verdict: Verdict::Differ,
            model_one: vec![LayerDiff {
                name: "conv1".into(),
                id: 0,
                layer_type: "Convolutional".into(),
                values: values(&["kernel: 3x3", "stride: 1"]),
            }],
            model_two: vec![LayerDiff {
                name: "conv1".into(),
                id: 0,
                layer_type: "Convolutional".into(),
                values: values(&["kernel: 5x5", "stride: 1"]),
            }],
            message: String::new(),
            shared_count: Some(1),
        };

        let mut buf = Vec::new();
        let mut reporter = Reporter::plain(&mut buf);
        reporter
            .value_diff("Parameters that differ", &result, "one.dlc", "two.dlc")
            .unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Parameters that differ"));
        assert!(text.contains("conv1 (id 0)"));
        assert!(text.contains("kernel: 3x3"));
        assert!(text.contains("kernel: 5x5"));
        // The layer label appears once, on the first row only.
        assert_eq!(text.matches("conv1 (id 0)").count(), 1);
        // Plain reporter emits no ANSI escapes.
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_unique_layers_render() {
        let result = DiffResult {
            verdict: Verdict::Differ,
            model_one: vec![LayerDiff {
                name: "fc1".into(),
                id: 4,
                layer_type: "FullyConnected".into(),
                values: Vec::new(),
            }],
            model_two: Vec::new(),
            message: String::new(),
            shared_count: None,
        };

        let mut buf = Vec::new();
        let mut reporter = Reporter::plain(&mut buf);
        reporter
            .unique_layers(&result, "one.dlc", "two.dlc")
            .unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Layers present only in one.dlc"));
        assert!(text.contains("FullyConnected"));
        assert!(text.contains("fc1 (id 4)"));
        // Model two has no unique layers, so no second table.
        assert!(!text.contains("Layers present only in two.dlc"));
    }

    #[test]
    fn test_weight_diff_render() {
        let result = DiffResult {
            verdict: Verdict::Differ,
            model_one: vec![LayerDiff {
                name: "conv1".into(),
                id: 2,
                layer_type: "Convolutional".into(),
                values: Vec::new(),
            }],
            model_two: Vec::new(),
            message: String::new(),
            shared_count: Some(3),
        };

        let mut buf = Vec::new();
        let mut reporter = Reporter::plain(&mut buf);
        reporter.weight_diff(&result).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Layers with differing weights"));
        assert!(text.contains("conv1"));
        assert!(text.contains("Convolutional"));
    }

    #[test]
    fn test_warning_plain() {
        let mut buf = Vec::new();
        let mut reporter = Reporter::plain(&mut buf);
        reporter.warning("architectures differ").unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "WARNING: architectures differ\n"
        );
    }
}
