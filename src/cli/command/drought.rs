//! Download US Drought Monitor comprehensive statistics for California.
//!
//! One GET against the statistics endpoint; the raw response is persisted
//! as-is and a tabular summary is attempted on a best-effort basis.

use std::{fs, time::Duration};

use anyhow::{anyhow, Result};
use reqwest::Client;

use crate::cli::create_spinner;

use super::data_dir;

const BASE_URL: &str =
    "https://droughtmonitor.unl.edu/DmData/DataDownload/ComprehensiveStatistics.aspx";
const CALIFORNIA_FIPS: &str = "06";
const START_YEAR: i32 = 2020;
const END_YEAR: i32 = 2025;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub async fn drought() -> Result<String> {
    let out_dir = data_dir("raw/drought")?;

    println!("📊 Downloading drought data ({START_YEAR}-{END_YEAR})...");
    println!("   State: California (FIPS: {CALIFORNIA_FIPS})");

    let params = [
        ("mode", "table".to_string()),
        ("aoi", CALIFORNIA_FIPS.to_string()),
        ("startdate", format!("{START_YEAR}0101")),
        ("enddate", format!("{END_YEAR}1231")),
        // county statistics
        ("statstype", "1".to_string()),
    ];

    let bar = create_spinner("Requesting data from US Drought Monitor...".to_string());
    let response = Client::new()
        .get(BASE_URL)
        .query(&params)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await;
    bar.finish_and_clear();

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            print_manual_instructions();
            return Err(anyhow!("error downloading drought data: {e}"));
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        print_manual_instructions();
        return Err(anyhow!(
            "drought download failed: HTTP {} ({})",
            status,
            body.chars().take(200).collect::<String>()
        ));
    }

    let body = response.text().await?;
    let output_file = out_dir.join(format!("california_drought_{START_YEAR}_{END_YEAR}.csv"));
    fs::write(&output_file, &body)?;

    println!("✅ Downloaded drought data successfully!");
    println!("💾 Saved to: {}", output_file.display());

    match summarize(&body) {
        Some(summary) => {
            println!("\n📊 Data Summary:");
            println!("   Records: {}", summary.records);
            println!("   Columns: {:?}", summary.columns);
            if let Some((min, max)) = summary.valid_start_range {
                println!("   Date range: {min} to {max}");
            }
        }
        None => println!("⚠️  Could not parse CSV - raw data saved, check file manually"),
    }

    Ok(output_file.to_string_lossy().to_string())
}

#[derive(Debug, PartialEq)]
struct DroughtSummary {
    records: usize,
    columns: Vec<String>,
    valid_start_range: Option<(String, String)>,
}

/// Best-effort tabular parse of the raw response. The rows are a raw
/// passthrough of the provider's weekly classification table, so anything
/// unparseable just means no summary.
fn summarize(body: &str) -> Option<DroughtSummary> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());

    let columns: Vec<String> = reader.headers().ok()?.iter().map(str::to_string).collect();
    if columns.len() < 2 {
        return None;
    }
    let valid_start_col = columns.iter().position(|c| c == "ValidStart");

    let mut records = 0usize;
    let mut valid_start_range: Option<(String, String)> = None;
    for row in reader.records() {
        let row = row.ok()?;
        records += 1;

        if let Some(value) = valid_start_col.and_then(|i| row.get(i)) {
            valid_start_range = Some(match valid_start_range.take() {
                None => (value.to_string(), value.to_string()),
                Some((min, max)) => (
                    if value < min.as_str() { value.to_string() } else { min },
                    if value > max.as_str() { value.to_string() } else { max },
                ),
            });
        }
    }

    Some(DroughtSummary {
        records,
        columns,
        valid_start_range,
    })
}

fn print_manual_instructions() {
    println!(
        r#"
ALTERNATIVE: MANUAL DOWNLOAD

1. Go to: https://droughtmonitor.unl.edu/DmData/DataDownload.aspx
2. Select: Area = California, Time Period = {START_YEAR}-01-01 to {END_YEAR}-12-31,
   Output Format = Tabular Data (CSV), Statistics Type = Comprehensive Statistics
3. Click "Get Data" and download the CSV file
4. Save it to data/raw/drought/california_drought_{START_YEAR}_{END_YEAR}.csv
"#
    );
}

// -- Tests -------------------------------------------------------------------
