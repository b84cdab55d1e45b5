//! Boxed console tables of retained samples.
//!
//! ```text
//! === OK (saved) ===
//! +----+-----------+-----------+
//! | No | f [kHz]   | y         |
//! +----+-----------+-----------+
//! |  1 |       25.1|     0.4213|
//! +----+-----------+-----------+
//! ```

use std::fmt;

use sweep_types::TrialOutcome;

use crate::columns::DisplayColumn;
use crate::format::format_cell;

/// A titled table of trial outcomes in display units.
#[derive(Debug, Clone)]
pub struct SampleTable<'a> {
    title: &'a str,
    columns: &'a [DisplayColumn],
    rows: &'a [TrialOutcome],
    max_print: usize,
}

impl<'a> SampleTable<'a> {
    pub fn new(title: &'a str, columns: &'a [DisplayColumn], rows: &'a [TrialOutcome]) -> Self {
        Self {
            title,
            columns,
            rows,
            max_print: 0,
        }
    }

    /// Print at most `n` rows; 0 prints everything.
    pub fn with_max_print(mut self, n: usize) -> Self {
        self.max_print = n;
        self
    }

    fn printed_rows(&self) -> &'a [TrialOutcome] {
        if self.max_print > 0 && self.rows.len() > self.max_print {
            &self.rows[..self.max_print]
        } else {
            self.rows
        }
    }

    fn headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(self.columns.len() + 2);
        headers.push("No".to_string());
        headers.extend(self.columns.iter().map(|c| c.label.clone()));
        headers.push("y".to_string());
        headers
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.printed_rows()
            .iter()
            .enumerate()
            .map(|(i, outcome)| {
                let mut row = Vec::with_capacity(self.columns.len() + 2);
                row.push((i + 1).to_string());
                row.extend(
                    self.columns
                        .iter()
                        .map(|c| format_cell(c.display_value(&outcome.assignment))),
                );
                row.push(format_cell(outcome.output));
                row
            })
            .collect()
    }
}

/// Column widths are measured in characters so labels like `L1 [µH]` align.
fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, w: usize) -> String {
    format!("{s}{}", " ".repeat(w.saturating_sub(width(s))))
}

fn pad_left(s: &str, w: usize) -> String {
    format!("{}{s}", " ".repeat(w.saturating_sub(width(s))))
}

impl fmt::Display for SampleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.rows.is_empty() {
            return writeln!(f, "(none)");
        }

        let headers = self.headers();
        let rows = self.cells();

        let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(width(cell));
            }
        }

        // The No column gets a trailing space; value columns sit flush right.
        let rule: String = widths
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{}+", "-".repeat(w + if i == 0 { 2 } else { 1 })))
            .collect();
        let rule = format!("+{rule}");

        writeln!(f, "{rule}")?;
        write!(f, "|")?;
        for (i, h) in headers.iter().enumerate() {
            if i == 0 {
                write!(f, " {} |", pad_right(h, widths[i]))?;
            } else {
                write!(f, " {}|", pad_right(h, widths[i]))?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{rule}")?;

        for row in &rows {
            write!(f, "|")?;
            for (j, cell) in row.iter().enumerate() {
                if j == 0 {
                    write!(f, " {} |", pad_left(cell, widths[j]))?;
                } else {
                    write!(f, " {}|", pad_left(cell, widths[j]))?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "{rule}")?;

        if self.printed_rows().len() < self.rows.len() {
            writeln!(
                f,
                "(printed {} of {}; truncated for console)",
                self.printed_rows().len(),
                self.rows.len()
            )?;
        }
        Ok(())
    }
}
