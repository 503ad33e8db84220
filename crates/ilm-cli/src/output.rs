use serde::Serialize;
use std::fmt;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Left-aligned text table with a dashed rule under the header. Columns are
/// as wide as their widest cell; a row shorter than the header leaves the
/// trailing columns blank, and cells past the last header are dropped.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(Into::into)
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    pub fn print(&self) {
        print!("{self}");
    }
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize],
    cells: impl Iterator<Item = &'a str>,
) -> fmt::Result {
    let line = widths
        .iter()
        .zip(cells)
        .map(|(width, cell)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_line(f, &widths, self.headers.iter().copied())?;
        let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(f, &widths, rules.iter().map(String::as_str))?;
        for row in &self.rows {
            write_line(f, &widths, row.iter().map(String::as_str))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_sized_to_widest_cell() {
        let mut table = Table::new(&["PHASE", "ACTION"]);
        table.push_row(["warm", "forcemerge"]);
        table.push_row(["hot", "rollover"]);

        assert_eq!(
            table.to_string(),
            "PHASE  ACTION\n\
             -----  ----------\n\
             warm   forcemerge\n\
             hot    rollover\n"
        );
    }

    #[test]
    fn short_rows_padded_long_rows_cut() {
        let mut table = Table::new(&["A", "B"]);
        table.push_row(["x"]);
        table.push_row(["1", "2", "3"]);

        assert_eq!(table.to_string(), "A  B\n-  -\nx\n1  2\n");
    }

    #[test]
    fn header_only_table() {
        let table = Table::new(&["STEP"]);
        assert!(table.is_empty());
        assert_eq!(table.to_string(), "STEP\n----\n");
    }
}
