//! Download and decode the NOAA climate division files for California.
//!
//! Three fixed-width files (precipitation, max and min temperature) are
//! downloaded from the climdiv flat-file host, decoded, outer joined on
//! (division, year, month) and written as one processed CSV.

use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::{
    cli::create_spinner,
    csv, download,
    reading::climdiv::{self, MonthlyValue, Variable},
};

use super::data_dir;

const BASE_URL: &str = "https://www.ncei.noaa.gov/pub/data/cirs/climdiv";

const FILES: [(Variable, &str); 3] = [
    (Variable::Precipitation, "climdiv-ca-pcpncy-v1.0.0-20250905.txt"),
    (Variable::MaxTemperature, "climdiv-ca-tmaxcy-v1.0.0-20250905.txt"),
    (Variable::MinTemperature, "climdiv-ca-tmincy-v1.0.0-20250905.txt"),
];
const README_FILE: &str = "climdiv-inv-readme.txt";

const FIRST_YEAR: i32 = 2000;
const LAST_YEAR: i32 = 2025;

// be respectful to the flat-file host
const DOWNLOAD_DELAY: Duration = Duration::from_secs(1);

pub async fn climate_divisions() -> Result<String> {
    let out_dir = data_dir("noaa_climate_divisions")?;

    println!("🌦️  Downloading NOAA Climate Divisional Data for California");

    let mut tables: Vec<(Variable, Vec<MonthlyValue>)> = Vec::new();
    for (variable, filename) in FILES {
        let file_path = out_dir.join(filename);

        let bar = create_spinner(format!("Downloading {filename}..."));
        let downloaded = download::download_file(&format!("{BASE_URL}/{filename}"), &file_path).await;
        bar.finish_and_clear();

        match downloaded {
            Ok(bytes) => println!("✅ Downloaded {} ({:.1} KB)", filename, bytes as f64 / 1024.0),
            Err(e) => {
                println!("❌ Error downloading {filename}: {e}");
                tokio::time::sleep(DOWNLOAD_DELAY).await;
                continue;
            }
        }
        tokio::time::sleep(DOWNLOAD_DELAY).await;

        // a decode failure aborts this file only
        match climdiv::decode_file(&file_path) {
            Ok(values) => {
                println!("✅ Processed {}: {} records", variable.column_name(), values.len());
                tables.push((variable, values));
            }
            Err(e) => println!("❌ Error processing {filename}: {e}"),
        }
    }

    if let Err(e) =
        download::download_file(&format!("{BASE_URL}/{README_FILE}"), &out_dir.join(README_FILE)).await
    {
        println!("❌ Error downloading {README_FILE}: {e}");
    }

    if tables.is_empty() {
        return Err(anyhow!("no climate division files were successfully processed"));
    }

    println!("\n🔄 Merging climate data...");
    let merged = climdiv::outer_join(&tables)?;
    let records = climdiv::filter_years(merged, FIRST_YEAR, LAST_YEAR);

    let output_file = out_dir.join("california_climate_data_processed.csv");
    csv::save_climdiv(&records, &output_file)?;

    println!("✅ Saved processed data: {}", output_file.display());
    println!("📈 Records: {}", records.len());

    let min_year = records.iter().map(|r| r.year).min();
    let max_year = records.iter().map(|r| r.year).max();
    if let (Some(min_year), Some(max_year)) = (min_year, max_year) {
        println!("📅 Date range: {min_year}-{max_year}");
    }
    let divisions: std::collections::BTreeSet<&str> =
        records.iter().map(|r| r.division_code.as_str()).collect();
    println!("🌍 Climate divisions: {}", divisions.len());

    Ok(output_file.to_string_lossy().to_string())
}
