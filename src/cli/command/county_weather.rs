//! Download county-level weather time series by driving the NOAA Climate at
//! a Glance web form.
//!
//! The form has no stable CSV endpoint, so a headless browser fills in the
//! state/county/parameter/timescale/year selects, plots, and follows the CSV
//! artifact link. One browser session serves the whole run and is closed on
//! the way out whether the run succeeded or not. A failed county/parameter
//! pair is reported and skipped.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Result};
use fantoccini::{Client, ClientBuilder, Locator};

use super::data_dir;

const BASE_URL: &str =
    "https://www.ncei.noaa.gov/access/monitoring/climate-at-a-glance/county/time-series";
const WEBDRIVER_URL: &str = "http://localhost:9515";

const START_YEAR: i32 = 2000;
const END_YEAR: i32 = 2025;

const PARAMETERS: [(&str, &str); 4] = [
    ("Average Temperature", "tavg"),
    ("Maximum Temperature", "tmax"),
    ("Minimum Temperature", "tmin"),
    ("Precipitation", "pcp"),
];

// the counties covered by the fire dataset
const COUNTIES: [&str; 18] = [
    "Alameda",
    "Los Angeles",
    "Orange",
    "Riverside",
    "San Bernardino",
    "San Diego",
    "Fresno",
    "Kern",
    "Sacramento",
    "Contra Costa",
    "Santa Clara",
    "Ventura",
    "San Francisco",
    "San Joaquin",
    "Stanislaus",
    "Tulare",
    "Sonoma",
    "Solano",
];

const ELEMENT_WAIT: Duration = Duration::from_secs(10);
const PAGE_SETTLE_DELAY: Duration = Duration::from_secs(2);
const PLOT_DELAY: Duration = Duration::from_secs(5);
const DOWNLOAD_DELAY: Duration = Duration::from_secs(3);

pub async fn county_weather() -> Result<String> {
    let out_dir = data_dir("raw/weather/county")?;

    println!("DOWNLOADING COUNTY-LEVEL WEATHER DATA");
    println!("Source: {BASE_URL}");
    println!("Counties: {}", COUNTIES.len());
    println!("Time period: {START_YEAR}-{END_YEAR}");

    // failure to establish the session is the one fatal condition here
    let browser = connect().await?;
    let outcome = run_session(&browser, &out_dir).await;

    browser.close().await.ok();
    println!("\n🔚 Browser session closed");

    outcome?;

    Ok(out_dir.to_string_lossy().to_string())
}

async fn connect() -> Result<Client> {
    let mut capabilities = serde_json::map::Map::new();
    capabilities.insert(
        "goog:chromeOptions".to_string(),
        serde_json::json!({
            "args": [
                "--headless",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--disable-gpu",
                "--window-size=1920,1080",
            ],
        }),
    );

    ClientBuilder::native()
        .capabilities(capabilities)
        .connect(WEBDRIVER_URL)
        .await
        .map_err(|e| anyhow!("could not start a WebDriver session at {WEBDRIVER_URL}: {e}"))
}

async fn run_session(browser: &Client, out_dir: &Path) -> Result<()> {
    let http = reqwest::Client::new();

    let total = COUNTIES.len() * PARAMETERS.len();
    let mut successful = 0usize;

    for county in COUNTIES {
        println!("\n🏛️  Processing {county} County...");

        for (parameter, code) in PARAMETERS {
            match download_county_parameter(browser, &http, out_dir, county, parameter, code).await
            {
                Ok(bytes) => {
                    successful += 1;
                    println!("    ✅ Downloaded {bytes} bytes");
                }
                Err(e) => println!("    ❌ Error downloading {parameter} for {county}: {e}"),
            }

            tokio::time::sleep(DOWNLOAD_DELAY).await;
        }
    }

    println!("\nDOWNLOAD SUMMARY");
    println!("Total downloads attempted: {total}");
    println!("Successful downloads: {successful}");
    println!("Failed downloads: {}", total - successful);
    println!(
        "Success rate: {:.1}%",
        successful as f64 / total as f64 * 100.0
    );

    Ok(())
}

async fn download_county_parameter(
    browser: &Client,
    http: &reqwest::Client,
    out_dir: &Path,
    county: &str,
    parameter: &str,
    code: &str,
) -> Result<u64> {
    println!("  Downloading {parameter} for {county} County...");

    browser.goto(BASE_URL).await?;
    tokio::time::sleep(PAGE_SETTLE_DELAY).await;

    let state = wait_for(browser, Locator::Id("state")).await?;
    state.select_by_value("CA").await?;

    let county_select = wait_for(browser, Locator::Id("county")).await?;
    county_select
        .select_by_label(&format!("{county} County"))
        .await?;

    let parameter_select = wait_for(browser, Locator::Id("parameter")).await?;
    parameter_select.select_by_label(parameter).await?;

    let timescale = wait_for(browser, Locator::Id("timescale")).await?;
    timescale.select_by_value("mly").await?;

    let start_year = wait_for(browser, Locator::Id("startYear")).await?;
    start_year.clear().await?;
    start_year.send_keys(&START_YEAR.to_string()).await?;

    let end_year = wait_for(browser, Locator::Id("endYear")).await?;
    end_year.clear().await?;
    end_year.send_keys(&END_YEAR.to_string()).await?;

    let plot = wait_for(browser, Locator::Id("plot")).await?;
    plot.click().await?;
    tokio::time::sleep(PLOT_DELAY).await;

    // the CSV artifact is exposed as a link once the plot has rendered
    let link = wait_for(browser, Locator::XPath("//a[contains(text(), 'CSV')]")).await?;
    let href = link
        .attr("href")
        .await?
        .ok_or_else(|| anyhow!("CSV link has no href attribute"))?;

    let response = http.get(&href).send().await?;
    if !response.status().is_success() {
        return Err(anyhow!("failed to download CSV: HTTP {}", response.status()));
    }
    let bytes = response.bytes().await?;

    let file_path = out_dir.join(county_file_name(county, code, START_YEAR, END_YEAR));
    fs::write(&file_path, &bytes)?;

    Ok(bytes.len() as u64)
}

async fn wait_for(
    browser: &Client,
    locator: Locator<'_>,
) -> Result<fantoccini::elements::Element> {
    Ok(browser
        .wait()
        .at_most(ELEMENT_WAIT)
        .for_element(locator)
        .await?)
}

fn county_file_name(county: &str, code: &str, start_year: i32, end_year: i32) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}_{}_{}.csv",
        county.replace(' ', "_").to_lowercase(),
        code,
        start_year,
        end_year
    ))
}

// -- Tests -------------------------------------------------------------------
