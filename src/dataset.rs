//! Record loading from CSV files, plus synthetic datasets for benchmarks.
//!
//! Files hold a header line followed by one `country,name,club,position,games,goals`
//! row per record. There is no quoting; fields never contain commas.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::Record;

/// Read records from `reader`, skipping the header and blank lines.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = line.parse::<Record>().map_err(|e| e.at_line(i + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Load records from the CSV file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_records(BufReader::new(file))?;
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(feature = "rand")]
pub use synthetic::synthetic;

#[cfg(feature = "rand")]
mod synthetic {
    use rand::seq::SliceRandom;
    use rand::Rng;

    use crate::record::Record;

    const COUNTRIES: &[&str] = &[
        "Argentina", "Australia", "Belgium", "Brazil", "Cameroon", "Canada", "Croatia",
        "Denmark", "Ecuador", "England", "France", "Germany", "Ghana", "Iran", "Japan",
        "Mexico", "Morocco", "Netherlands", "Poland", "Portugal", "Qatar", "Russia",
        "Saudi Arabia", "Senegal", "Serbia", "South Korea", "Spain", "Switzerland",
        "Tunisia", "Uruguay", "USA", "Wales",
    ];
    const POSITIONS: &[&str] = &["GK", "DF", "MF", "FW"];

    /// `n` random records drawn over a fixed list of countries.
    pub fn synthetic<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let country = COUNTRIES.choose(rng).copied().unwrap_or("Russia");
                let position = POSITIONS.choose(rng).copied().unwrap_or("MF");
                Record {
                    country: country.to_owned(),
                    name: format!("Player {i}"),
                    club: format!("Club {}", rng.gen_range(0..500)),
                    position: position.to_owned(),
                    games: rng.gen_range(0..150),
                    goals: rng.gen_range(0..80),
                }
            })
            .collect()
    }

}
