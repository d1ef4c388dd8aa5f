//! Download daily station observations for California from the NOAA CDO API.
//!
//! The per-request record cap makes one big query impossible, so the data is
//! fetched in (year, datatype) chunks with a fixed delay between requests.
//! A failed chunk is reported and skipped; it never aborts the run.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Result};

use crate::{
    cdo::{CdoClient, Observation},
    config, csv,
};

use super::data_dir;

const CALIFORNIA: &str = "FIPS:06";
const DATATYPES: [&str; 3] = ["TMAX", "TMIN", "PRCP"];
const START_YEAR: i32 = 2020;
const END_YEAR: i32 = 2025;

// the API allows 5 requests per second
const REQUEST_DELAY: Duration = Duration::from_millis(300);

pub async fn weather() -> Result<String> {
    let token = config::noaa_token()?;
    let client = CdoClient::new(token);
    let out_dir = data_dir("raw/weather")?;

    fetch_stations(&client, &out_dir).await;
    fetch_datasets(&client).await;

    println!("\n🌦️  Downloading daily observations ({START_YEAR}-{END_YEAR})...");

    let mut observations: Vec<Observation> = Vec::new();
    for year in START_YEAR..=END_YEAR {
        println!("\n   📅 Downloading {year}...");

        for datatype in DATATYPES {
            let fetched = client.daily_data(CALIFORNIA, datatype, year).await;
            absorb(&mut observations, datatype, fetched);
            tokio::time::sleep(REQUEST_DELAY).await;
        }

        // snapshot everything accumulated so far, not just this year
        if !observations.is_empty() {
            let snapshot = snapshot_path(&out_dir, year);
            csv::save_observations(&observations, &snapshot)?;
            println!(
                "      💾 Saved year {year} snapshot ({} records so far)",
                observations.len()
            );
        }
    }

    if observations.is_empty() {
        return Err(anyhow!("no weather data was downloaded"));
    }

    let combined = combined_path(&out_dir, START_YEAR, END_YEAR);
    csv::save_observations(&observations, &combined)?;
    println!("\n   ✅ Total records downloaded: {}", observations.len());

    Ok(combined.to_string_lossy().to_string())
}

/// Folds one (year, datatype) fetch result into the accumulator. Failures and
/// empty answers are reported and skipped. Returns the number of records added.
fn absorb(
    observations: &mut Vec<Observation>,
    datatype: &str,
    fetched: Result<Option<Vec<Observation>>>,
) -> usize {
    match fetched {
        Ok(Some(batch)) => {
            let added = batch.len();
            println!("      ✅ {datatype}: {added} records");
            observations.extend(batch);
            added
        }
        Ok(None) => {
            println!("      ⚠️  {datatype}: no data");
            0
        }
        Err(e) => {
            println!("      ❌ {datatype}: {e}");
            0
        }
    }
}

async fn fetch_stations(client: &CdoClient, out_dir: &Path) {
    println!("\n📍 Step 1: Finding California weather stations...");

    match client.stations(CALIFORNIA).await {
        Ok(stations) if !stations.is_empty() => {
            println!("   ✅ Found {} weather stations in California", stations.len());
            let file_path = out_dir.join("california_weather_stations.csv");
            match csv::save_stations(&stations, &file_path) {
                Ok(()) => println!("   💾 Saved station list to: {}", file_path.display()),
                Err(e) => println!("   ❌ Error saving station list: {e}"),
            }
        }
        Ok(_) => println!("   ⚠️  No stations found"),
        Err(e) => println!("   ❌ Error fetching stations: {e}"),
    }
}

async fn fetch_datasets(client: &CdoClient) {
    println!("\n📊 Step 2: Checking available datasets...");

    match client.datasets().await {
        Ok(datasets) => {
            println!("   ✅ Found {} available datasets", datasets.len());
            for dataset in &datasets {
                // daily, monthly and yearly summaries are the relevant ones
                if matches!(dataset.id.as_str(), "GHCND" | "GSOM" | "GSOY") {
                    println!("   - {}: {}", dataset.id, dataset.name);
                }
            }
        }
        Err(e) => println!("   ❌ Error fetching datasets: {e}"),
    }
}

fn snapshot_path(out_dir: &Path, year: i32) -> PathBuf {
    out_dir.join(format!("california_weather_{year}.csv"))
}

fn combined_path(out_dir: &Path, start_year: i32, end_year: i32) -> PathBuf {
    out_dir.join(format!("california_weather_{start_year}_{end_year}_combined.csv"))
}

// -- Tests -------------------------------------------------------------------
