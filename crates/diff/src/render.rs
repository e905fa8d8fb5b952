//! Report sinks.

use std::io::{self, Write};

use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use crate::report::{DatabaseReport, UnifiedReport, Verdict};

/// Something that renders a finished report.
pub trait ReportSink {
    fn render(&mut self, report: &UnifiedReport) -> io::Result<()>;
}

/// Renders one table per database, then a summary line.
pub struct TableSink<W: Write> {
    writer: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for TableSink<W> {
    fn render(&mut self, report: &UnifiedReport) -> io::Result<()> {
        for database in &report.databases {
            writeln!(self.writer, "Database: {}", database.name)?;
            writeln!(self.writer, "{}", format_table(database))?;
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "{}", report.summary())?;
        self.writer.flush()
    }
}

/// Format one database's rows as a table.
pub fn format_table(database: &DatabaseReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Collection", "Same", "Source", "Destination"]);

    for row in &database.rows {
        let color = match row.verdict {
            Verdict::Same => Color::Green,
            Verdict::Different => Color::Red,
            Verdict::NotApplicable => Color::Yellow,
        };
        table.add_row(vec![
            Cell::new(&row.collection),
            Cell::new(row.verdict.symbol()).fg(color),
            Cell::new(row.source.to_string()),
            Cell::new(row.destination.to_string()),
        ]);
    }

    table
}

/// Renders the whole report as pretty-printed JSON.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn render(&mut self, report: &UnifiedReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
