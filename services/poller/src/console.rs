//! Console rendering of status samples

use std::io::{self, Write};

use types::TelemetryRecord;

/// Column header printed before the first table row
pub const TABLE_HEADER: &str = "(kW) Utility    Solar     Gen  A-Gate   House  %Charge";

/// How samples are written to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFormat {
    /// Power summary, one row per sample
    #[default]
    Table,
    /// Entire decoded record
    Debug,
}

/// One table row: grid, solar, generator, aGate, home load and state of charge
pub fn format_row(record: &TelemetryRecord) -> String {
    format!(
        "     {:6.3}   {:6.3}  {:6.3}  {:6.3}  {:6.3}   {:6.3}",
        record.p_uti, record.p_sun, record.p_gen, record.p_fhp, record.p_load, record.soc
    )
}

/// Write sample number `index` (1-based) in the chosen format
pub fn write_sample<W: Write>(
    out: &mut W,
    format: SampleFormat,
    index: u64,
    record: &TelemetryRecord,
) -> io::Result<()> {
    match format {
        SampleFormat::Table => {
            if index == 1 {
                writeln!(out, "{}", TABLE_HEADER)?;
            }
            writeln!(out, "{}", format_row(record))?;
        }
        SampleFormat::Debug => {
            writeln!(out, "sample {} ({} aPower units)", index, record.unit_count())?;
            writeln!(out, "{:#?}", record)?;
        }
    }
    out.flush()
}
