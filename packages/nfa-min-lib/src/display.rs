use std::fmt::Display;

use colored::Colorize;
use itertools::Itertools;

use crate::automaton::table::DfaTable;

/// A printable transition table of a DFA. The first column marks the start
/// state with `->` and accepting states with `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    header: Vec<String>,
    markers: Vec<String>,
    rows: Vec<Vec<String>>,
    color: bool,
}

impl TransitionTable {
    pub fn new<L: Display + PartialEq, S: Display + PartialEq>(table: &DfaTable<L, S>) -> Self {
        let header = std::iter::once("state".to_string())
            .chain(table.alphabet.iter().map(|s| s.to_string()))
            .collect_vec();

        let markers = table
            .states
            .iter()
            .map(|state| {
                let start = if *state == table.start { "->" } else { "" };
                let accepting = if table.is_final(state) { "*" } else { "" };
                format!("{}{}", start, accepting)
            })
            .collect_vec();

        let rows = table
            .states
            .iter()
            .map(|state| {
                std::iter::once(state.to_string())
                    .chain(table.alphabet.iter().map(|symbol| {
                        table
                            .get(state, symbol)
                            .map(|target| target.to_string())
                            .unwrap_or_else(|| "-".to_string())
                    }))
                    .collect_vec()
            })
            .collect_vec();

        TransitionTable {
            header,
            markers,
            rows,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn column_widths(&self) -> Vec<usize> {
        (0..self.header.len())
            .map(|column| {
                std::iter::once(&self.header[column])
                    .chain(self.rows.iter().map(|row| &row[column]))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect_vec()
    }
}

fn pad(cell: &str, width: usize) -> String {
    let padding = width.saturating_sub(cell.chars().count());
    format!("{}{}", cell, " ".repeat(padding))
}

/// Joins the cells of one row. The last cell is left unpadded.
fn join_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);

    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, width))| {
            if column == last {
                cell.clone()
            } else {
                pad(cell, *width)
            }
        })
        .join(" | ")
}

impl Display for TransitionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let widths = self.column_widths();

        let header = format!("    {}", join_row(&self.header, &widths));

        if self.color {
            writeln!(f, "{}", header.bold())?;
        } else {
            writeln!(f, "{}", header)?;
        }

        let rule = widths.iter().map(|width| "-".repeat(*width)).join("-+-");
        writeln!(f, "    {}", rule)?;

        for (marker, row) in self.markers.iter().zip(&self.rows) {
            let cells = join_row(row, &widths);
            let marker = pad(marker, 3);

            if self.color && marker.contains('*') {
                writeln!(f, "{} {}", marker.green(), cells)?;
            } else {
                writeln!(f, "{} {}", marker, cells)?;
            }
        }

        Ok(())
    }
}

/// One `state symbol destination` line per transition, sorted.
pub fn transition_list<L: Display, S: Display>(table: &DfaTable<L, S>) -> Vec<String> {
    table
        .transitions
        .iter()
        .map(|t| format!("{} {} {}", t.from, t.symbol, t.to))
        .sorted()
        .collect_vec()
}

/// A one line summary such as `4 states, 2 symbols, 1 accepting`.
pub fn describe<L, S>(table: &DfaTable<L, S>) -> String {
    format!(
        "{} states, {} symbols, {} accepting",
        table.states.len(),
        table.alphabet.len(),
        table.finals.len()
    )
}

#[cfg(test)]
mod tests {
    use super::{TransitionTable, describe, transition_list};
    use crate::automaton::table::{DfaTable, DfaTransition};

    fn table() -> DfaTable<String, char> {
        let t = |from: &str, symbol, to: &str| DfaTransition {
            from: from.to_string(),
            symbol,
            to: to.to_string(),
        };

        DfaTable {
            states: vec!["p".to_string(), "qq".to_string()],
            start: "p".to_string(),
            transitions: vec![t("p", 'b', "p"), t("p", 'a', "qq"), t("qq", 'a', "qq"), t("qq", 'b', "p")],
            finals: vec!["qq".to_string()],
            alphabet: vec!['a', 'b'],
        }
    }

    #[test]
    fn renders_markers_and_alignment() {
        let rendered = TransitionTable::new(&table()).to_string();
        let lines = rendered.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "    state | a  | b");
        assert_eq!(lines[1], "    ------+----+--");
        assert_eq!(lines[2], "->  p     | qq | p");
        assert_eq!(lines[3], "*   qq    | qq | p");
    }

    #[test]
    fn rows_have_no_trailing_spaces() {
        let mut table = table();
        table.transitions[0].to = "qq".to_string();
        let rendered = TransitionTable::new(&table).to_string();

        assert!(rendered.lines().all(|line| !line.ends_with(' ')));
        assert_eq!(rendered.lines().nth(2), Some("->  p     | qq | qq"));
        assert_eq!(rendered.lines().nth(3), Some("*   qq    | qq | p"));
    }

    #[test]
    fn sorted_transition_list() {
        assert_eq!(
            transition_list(&table()),
            vec!["p a qq", "p b p", "qq a qq", "qq b p"]
        );
        assert_eq!(describe(&table()), "2 states, 2 symbols, 1 accepting");
    }
}
