//! CSV export for schedule tables
//!
//! Writes one [`ScheduleTable`] per file in the legacy export shape: a
//! leading integer index column (empty header cell, 0-based row numbers),
//! comma separator, and quoting only where a cell needs it.

use crate::scrape::ScheduleTable;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const SEP: char = ',';

/// Writes a schedule table to `path` as indexed CSV
pub fn write_schedule_csv(path: &Path, table: &ScheduleTable) -> io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    // Header row: empty cell for the index column, then the column names
    write_field(&mut w, "")?;
    for col in &table.columns {
        write!(w, "{}", SEP)?;
        write_field(&mut w, col)?;
    }
    writeln!(w)?;

    for (i, row) in table.rows.iter().enumerate() {
        write_field(&mut w, &i.to_string())?;
        for cell in row {
            write!(w, "{}", SEP)?;
            write_field(&mut w, cell)?;
        }
        writeln!(w)?;
    }

    w.flush()
}

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_field<W: Write>(w: &mut W, field: &str) -> io::Result<()> {
    if needs_quotes(field) {
        let escaped = field.replace('"', "\"\"");
        write!(w, "\"{}\"", escaped)
    } else {
        write!(w, "{}", field)
    }
}
