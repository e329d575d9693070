//! Presentation layer for the global table: `key;min;mean;max` with one
//! decimal place, keys in lexicographic order.

use crate::aggregate::StatsTable;
use std::io::{self, Write};

pub fn write_report<W: Write>(table: &StatsTable, writer: &mut W) -> io::Result<()> {
    for (key, rec) in table {
        writeln!(writer, "{};{:.1};{:.1};{:.1}", key, rec.min, rec.mean, rec.max)?;
    }
    Ok(())
}

pub fn render_report(table: &StatsTable) -> String {
    use std::fmt::Write as _;
    let mut out = String::new();
    for (key, rec) in table {
        let _ = writeln!(out, "{};{:.1};{:.1};{:.1}", key, rec.min, rec.mean, rec.max);
    }
    out
}
