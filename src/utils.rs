use crate::error::Error;
use pdbtbx::{PDBError, PDB};
use polars::prelude::*;
use std::io::Write;
use tracing::{error, warn};

/// Open an atomic data file with [`pdbtbx::ReadOptions`], keeping only atomic coordinates.
///
/// Non-fatal parser messages are returned alongside the structure.
pub fn load_model(input_file: &str) -> Result<(PDB, Vec<PDBError>), Error> {
    pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
        .map_err(|errors| Error::Structure {
            path: input_file.to_string(),
            message: errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        })
}

/// Report parser messages through `tracing`, by severity.
pub fn log_pdb_warnings(pdb_warnings: &[PDBError]) {
    pdb_warnings.iter().for_each(|e| match e.level() {
        pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
        pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
        _ => warn!("{e}"),
    });
}

/// Run `f` inside a dedicated rayon pool.
///
/// `num_threads` of 0 lets rayon pick the number of threads (all cores).
pub fn run_with_threads<T, F>(num_threads: usize, f: F) -> Result<T, Error>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()?;
    Ok(pool.install(f))
}

/// Sum the SASA column of a DataFrame.
///
/// # Returns
///
/// The sum of all SASA values, or 0.0 if the column is empty.
pub fn sum_sasa(df: &DataFrame) -> Result<f64, Error> {
    Ok(df.column("sasa")?.f64()?.sum().unwrap_or(0.0))
}

/// Write a DataFrame to `writer` in the requested format.
pub fn write_df<W: Write>(
    df: &mut DataFrame,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), Error> {
    match format {
        OutputFormat::Table => {
            writeln!(writer, "{df}")?;
        }
        OutputFormat::Csv => {
            CsvWriter::new(&mut writer).finish(df)?;
        }
        OutputFormat::Json => {
            JsonWriter::new(&mut writer)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        OutputFormat::NDJson => {
            JsonWriter::new(&mut writer)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(())
}

/// Output format for DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Comma-separated values
    Csv,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    #[value(name = "ndjson")]
    NDJson,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::NDJson => write!(f, "ndjson"),
        }
    }
}
