/// County table loader
///
/// Reads the president and senate CSV files into `RaceTable`s. File access
/// goes through `tokio::fs` and the parse runs on the blocking pool so the
/// window stays responsive while a large table is read.
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};
use tokio::task;

use crate::error::{DashboardError, DashboardResult};
use crate::state::catalog::Subgroup;
use crate::state::data::{CountyRecord, Datasets, Race, RaceTable};
use crate::state::settings::Settings;

/// Column positions resolved from a header row
#[derive(Debug)]
struct Columns {
    state_name: usize,
    state: usize,
    county_name: usize,
    pop_total: usize,
    vote_share: usize,
    vote_share_display: usize,
    /// One position per catalog entry, in catalog order
    shares: Vec<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, race: Race, file: &str) -> DashboardResult<Self> {
        let find = |column: &str| -> DashboardResult<usize> {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| DashboardError::MissingColumn {
                    file: file.to_string(),
                    column: column.to_string(),
                })
        };

        let shares = Subgroup::all()
            .into_iter()
            .map(|s| find(s.field()))
            .collect::<DashboardResult<Vec<_>>>()?;

        Ok(Columns {
            state_name: find("state_name")?,
            state: find("state")?,
            county_name: find("county_name")?,
            pop_total: find("pop_total")?,
            vote_share: find(race.vote_field())?,
            vote_share_display: find(race.vote_display_field())?,
            shares,
        })
    }
}

/// Load both tables named by `settings`.
pub async fn load_datasets(settings: Settings) -> DashboardResult<Datasets> {
    let president_path = settings.president_path();
    let senate_path = settings.senate_path();

    let president_bytes = read_file(&president_path).await?;
    let senate_bytes = read_file(&senate_path).await?;

    // Spawn blocking because parsing a few thousand wide rows is CPU work
    let datasets = task::spawn_blocking(move || -> DashboardResult<Datasets> {
        let president = read_table(
            president_bytes.as_slice(),
            Race::President,
            &file_label(&president_path),
        )?;
        let senate = read_table(
            senate_bytes.as_slice(),
            Race::Senate,
            &file_label(&senate_path),
        )?;
        Ok(Datasets { president, senate })
    })
    .await
    .map_err(|e| DashboardError::Task(e.to_string()))??;

    info!(
        "📊 Loaded {} president and {} senate county rows ({} states)",
        datasets.president.records.len(),
        datasets.senate.records.len(),
        datasets.states().len()
    );

    Ok(datasets)
}

async fn read_file(path: &Path) -> DashboardResult<Vec<u8>> {
    debug!("Reading {}", path.display());
    tokio::fs::read(path).await.map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse one race table from CSV text with a header row.
///
/// `file` is only used in error messages.
pub fn read_table<R: Read>(reader: R, race: Race, file: &str) -> DashboardResult<RaceTable> {
    let csv_err = |source: csv::Error| DashboardError::Csv {
        file: file.to_string(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    let cols = Columns::resolve(&headers, race, file)?;

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = row.map_err(csv_err)?;
        // Header is line 1
        let line = row.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);

        let text = |pos: usize| row.get(pos).unwrap_or("").to_string();
        let number = |pos: usize| -> DashboardResult<f64> {
            parse_number(row.get(pos).unwrap_or("")).ok_or_else(|| DashboardError::InvalidNumber {
                file: file.to_string(),
                line,
                column: headers.get(pos).unwrap_or("").to_string(),
                value: row.get(pos).unwrap_or("").to_string(),
            })
        };

        let shares = cols
            .shares
            .iter()
            .map(|&pos| number(pos))
            .collect::<DashboardResult<Vec<_>>>()?;

        records.push(CountyRecord {
            state_name: text(cols.state_name),
            state: text(cols.state),
            county_name: text(cols.county_name),
            pop_total: number(cols.pop_total)?,
            shares,
            vote_share: number(cols.vote_share)?,
            vote_share_display: text(cols.vote_share_display),
        });
    }

    let table = RaceTable { race, records };
    debug!("{}: {} rows for {}", file, table.records.len(), table.race);
    Ok(table)
}

/// Cell texts read as a missing value, on top of the empty cell
const NA_MARKERS: [&str; 16] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "n/a", "null",
];

/// Empty cells and NA markers are missing values; anything else must parse.
fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || NA_MARKERS.contains(&cell) {
        Some(f64::NAN)
    } else {
        cell.parse::<f64>().ok()
    }
}
