//! CSV export sink
//!
//! Writes the result set as a CSV file over the union-of-keys column set.
//! Absent cells are empty; cells containing the separator, quotes, or line
//! breaks are quoted with doubled-quote escaping.

use crate::output::traits::{OutputResult, TabularSink};
use crate::record::ResultSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sink that exports the result set to a CSV file
pub struct CsvExport {
    path: PathBuf,
}

impl CsvExport {
    /// Creates an exporter targeting `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The target path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the result set into any writer
    pub fn export<W: Write>(&self, results: &ResultSet, mut w: W) -> OutputResult<()> {
        let columns = results.columns();
        write_csv_row(&mut w, columns.iter().map(String::as_str))?;

        for record in results.iter() {
            write_csv_row(
                &mut w,
                columns.iter().map(|column| record.get(column).unwrap_or("")),
            )?;
        }

        Ok(())
    }
}

impl TabularSink for CsvExport {
    fn write(&mut self, results: &ResultSet) -> OutputResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        self.export(results, &mut writer)?;
        writer.flush()?;
        tracing::info!("Exported {} records to {}", results.len(), self.path.display());
        Ok(())
    }
}

/// Writes one CSV row with quoting where needed
fn write_csv_row<'a, W: Write>(
    w: &mut W,
    cells: impl Iterator<Item = &'a str>,
) -> OutputResult<()> {
    let mut first = true;
    for cell in cells {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)?;
    Ok(())
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BookRecord;

    fn export_to_string(results: &ResultSet) -> String {
        let exporter = CsvExport::new("/dev/null");
        let mut buf = Vec::new();
        exporter.export(results, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_is_column_union() {
        let mut results = ResultSet::new();
        let mut first = BookRecord::new();
        first.insert("book_name", "A");
        first.insert("UPC", "u1");
        results.push(first);
        let mut second = BookRecord::new();
        second.insert("book_name", "B");
        second.insert("Tax", "£1.00");
        results.push(second);

        let csv = export_to_string(&results);
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("book_name,UPC,Tax"));
        assert_eq!(lines.next(), Some("A,u1,"));
        assert_eq!(lines.next(), Some("B,,£1.00"));
    }

    #[test]
    fn test_quoting() {
        let mut results = ResultSet::new();
        let mut record = BookRecord::new();
        record.insert("book_name", "Comma, Inc.");
        record.insert("book_desc", "He said \"hi\"\nand left");
        results.push(record);

        let csv = export_to_string(&results);

        assert!(csv.contains("\"Comma, Inc.\""));
        assert!(csv.contains("\"He said \"\"hi\"\"\nand left\""));
    }

    #[test]
    fn test_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.csv");

        let mut results = ResultSet::new();
        let mut record = BookRecord::new();
        record.insert("book_name", "A");
        results.push(record);

        let mut sink = CsvExport::new(&path);
        sink.write(&results).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "book_name\nA\n");
    }

    #[test]
    fn test_empty_result_set_writes_empty_header() {
        let csv = export_to_string(&ResultSet::new());
        assert_eq!(csv, "\n");
    }
}
