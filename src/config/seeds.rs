use crate::ScoutError;
use std::io::Read;
use std::path::Path;

/// Name of the CSV column holding seed URLs
pub const URL_COLUMN: &str = "url";

/// Loads the seed URL list from a CSV file with a `url` column
///
/// Rows are returned in file order; duplicates are kept so that the visited
/// ledger decides whether a repeated seed is crawled again. Rows whose `url`
/// cell is blank are skipped.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The seed URLs
/// * `Err(ScoutError)` - The file could not be read or has no `url` column
pub fn load_seeds(path: &Path) -> Result<Vec<String>, ScoutError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScoutError::Seeds(format!("Failed to open {}: {}", path.display(), e))
    })?;
    read_seeds(file)
}

/// Reads seed URLs from any CSV source
pub fn read_seeds<R: Read>(reader: R) -> Result<Vec<String>, ScoutError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h == URL_COLUMN)
        .ok_or_else(|| ScoutError::Seeds(format!("Missing required column '{}'", URL_COLUMN)))?;

    let mut seeds = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(column) {
            Some(url) if !url.is_empty() => seeds.push(url.to_string()),
            _ => tracing::debug!("Skipping seed row without a url: {:?}", record),
        }
    }

    Ok(seeds)
}
