//! Download California county population data from the US Census API.
//!
//! One GET per year of interest; each year is written to its own CSV and the
//! years are concatenated into a combined file at the end. A failed year is
//! reported and skipped.

use std::{path::Path, time::Duration};

use anyhow::{anyhow, Result};
use reqwest::Client;

use crate::{
    config, csv,
    reading::population::{from_census_rows, CensusVintage, PopulationRecord},
};

use super::data_dir;

const CALIFORNIA_FIPS: &str = "06";

// key years, to stay clear of the unauthenticated rate limit
const YEARS: [i32; 6] = [2000, 2010, 2015, 2020, 2022, 2024];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_DELAY: Duration = Duration::from_secs(1);

pub async fn population() -> Result<String> {
    let api_key = config::census_api_key();
    if api_key.is_none() {
        println!("⚠️  No Census API key found. Using public access (rate limited).");
        println!("   Get a free key at https://api.census.gov/data/key_signup.html");
    }

    let out_dir = data_dir("raw/population")?;
    let http = Client::new();

    println!("🌍 Downloading California Population Data from US Census API");

    let mut combined: Vec<PopulationRecord> = Vec::new();
    for year in YEARS {
        println!("Downloading population data for {year}...");

        match download_year(&http, year, api_key.as_deref()).await {
            Ok(records) => {
                let file_path = out_dir.join(format!("california_population_{year}.csv"));
                csv::save_population(&records, &file_path)?;
                println!("✅ Saved {} counties to {}", records.len(), file_path.display());
                combined.extend(records);
            }
            Err(e) => println!("❌ Error downloading data for {year}: {e}"),
        }

        tokio::time::sleep(REQUEST_DELAY).await;
    }

    if combined.is_empty() {
        return Err(anyhow!("no population data was successfully downloaded"));
    }

    let combined_file = out_dir.join("california_population_combined.csv");
    csv::save_population(&combined, &combined_file)?;

    print_summary(&combined, &combined_file);

    Ok(combined_file.to_string_lossy().to_string())
}

async fn download_year(
    http: &Client,
    year: i32,
    api_key: Option<&str>,
) -> Result<Vec<PopulationRecord>> {
    let vintage = CensusVintage::for_year(year);

    let mut params = vec![
        ("get", vintage.variables()),
        ("for", "county:*".to_string()),
        ("in", format!("state:{CALIFORNIA_FIPS}")),
    ];
    if let Some(key) = api_key {
        params.push(("key", key.to_string()));
    }

    let response = http
        .get(&vintage.url)
        .query(&params)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("Census request failed: HTTP {}", response.status()));
    }

    let rows: Vec<Vec<Option<String>>> = response.json().await?;

    from_census_rows(&rows, &vintage, year)
}

fn print_summary(records: &[PopulationRecord], combined_file: &Path) {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    let counties: std::collections::BTreeSet<&str> =
        records.iter().map(|r| r.county_fips.as_str()).collect();

    println!("\n✅ Combined dataset saved: {}", combined_file.display());
    println!("📊 Total records: {}", records.len());
    println!("📅 Years covered: {years:?}");
    println!("🏛️ Counties: {}", counties.len());
}
