//! US Census population rows for California counties.
//!
//! The Census API answers with a JSON array of arrays: a header row naming
//! the requested variables, then one row of strings per county. Population
//! fields that fail numeric coercion become null; the row is kept.

use anyhow::{anyhow, Result};
use serde::Serialize;

/// A Census row joined against the static FIPS-to-name table.
#[derive(Debug, Clone, Serialize)]
pub struct PopulationRecord {
    pub state_fips: String,
    pub county_fips: String,
    pub county_name: Option<String>,
    pub year: i32,
    pub total_population: Option<i64>,
    pub male_population: Option<i64>,
    pub female_population: Option<i64>,
}

/// The endpoint and variable names for one Census vintage.
///
/// 2010 and later use the ACS 5-year estimates; earlier years fall back to
/// the decennial redistricting tables for that year.
#[derive(Debug, PartialEq)]
pub struct CensusVintage {
    pub url: String,
    pub total: &'static str,
    pub male: &'static str,
    pub female: &'static str,
}

impl CensusVintage {
    pub fn for_year(year: i32) -> Self {
        if year >= 2010 {
            CensusVintage {
                url: "https://api.census.gov/data/2022/acs/acs5".to_string(),
                total: "B01003_001E",
                male: "B01001_002E",
                female: "B01001_026E",
            }
        } else {
            CensusVintage {
                url: format!("https://api.census.gov/data/{year}/dec/pl"),
                total: "P001001",
                male: "P002002",
                female: "P002026",
            }
        }
    }

    pub fn variables(&self) -> String {
        format!("{},{},{}", self.total, self.male, self.female)
    }
}

/// Builds population records from the raw Census response. The first row is
/// the header; a variable missing from it is a schema error.
pub fn from_census_rows(
    rows: &[Vec<Option<String>>],
    vintage: &CensusVintage,
    year: i32,
) -> Result<Vec<PopulationRecord>> {
    let header = rows
        .first()
        .ok_or_else(|| anyhow!("empty Census response"))?;

    let total_col = find_column(header, vintage.total)?;
    let male_col = find_column(header, vintage.male)?;
    let female_col = find_column(header, vintage.female)?;
    let state_col = find_column(header, "state")?;
    let county_col = find_column(header, "county")?;

    let mut records = Vec::with_capacity(rows.len() - 1);
    for row in &rows[1..] {
        let county_fips = cell(row, county_col)
            .ok_or_else(|| anyhow!("Census row is missing the county column"))?
            .to_string();

        records.push(PopulationRecord {
            state_fips: cell(row, state_col).unwrap_or_default().to_string(),
            county_name: county_name(&county_fips).map(str::to_string),
            county_fips,
            year,
            total_population: coerce(cell(row, total_col)),
            male_population: coerce(cell(row, male_col)),
            female_population: coerce(cell(row, female_col)),
        });
    }

    Ok(records)
}

fn find_column(header: &[Option<String>], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|col| col.as_deref() == Some(name))
        .ok_or_else(|| anyhow!("column `{}` not found in Census response", name))
}

fn cell(row: &[Option<String>], index: usize) -> Option<&str> {
    row.get(index).and_then(|v| v.as_deref())
}

/// Numeric coercion: a missing or non-numeric field becomes null, never an
/// error and never zero.
fn coerce(field: Option<&str>) -> Option<i64> {
    field?.trim().parse().ok()
}

/// County name for a three-digit California county FIPS code.
pub fn county_name(county_fips: &str) -> Option<&'static str> {
    CALIFORNIA_COUNTIES
        .iter()
        .find(|(fips, _)| *fips == county_fips)
        .map(|(_, name)| *name)
}

/// The 58 California counties, (county FIPS, name).
pub const CALIFORNIA_COUNTIES: [(&str, &str); 58] = [
    ("001", "Alameda"),
    ("003", "Alpine"),
    ("005", "Amador"),
    ("007", "Butte"),
    ("009", "Calaveras"),
    ("011", "Colusa"),
    ("013", "Contra Costa"),
    ("015", "Del Norte"),
    ("017", "El Dorado"),
    ("019", "Fresno"),
    ("021", "Glenn"),
    ("023", "Humboldt"),
    ("025", "Imperial"),
    ("027", "Inyo"),
    ("029", "Kern"),
    ("031", "Kings"),
    ("033", "Lake"),
    ("035", "Lassen"),
    ("037", "Los Angeles"),
    ("039", "Madera"),
    ("041", "Marin"),
    ("043", "Mariposa"),
    ("045", "Mendocino"),
    ("047", "Merced"),
    ("049", "Modoc"),
    ("051", "Mono"),
    ("053", "Monterey"),
    ("055", "Napa"),
    ("057", "Nevada"),
    ("059", "Orange"),
    ("061", "Placer"),
    ("063", "Plumas"),
    ("065", "Riverside"),
    ("067", "Sacramento"),
    ("069", "San Benito"),
    ("071", "San Bernardino"),
    ("073", "San Diego"),
    ("075", "San Francisco"),
    ("077", "San Joaquin"),
    ("079", "San Luis Obispo"),
    ("081", "San Mateo"),
    ("083", "Santa Barbara"),
    ("085", "Santa Clara"),
    ("087", "Santa Cruz"),
    ("089", "Shasta"),
    ("091", "Sierra"),
    ("093", "Siskiyou"),
    ("095", "Solano"),
    ("097", "Sonoma"),
    ("099", "Stanislaus"),
    ("101", "Sutter"),
    ("103", "Tehama"),
    ("105", "Trinity"),
    ("107", "Tulare"),
    ("109", "Tuolumne"),
    ("111", "Ventura"),
    ("113", "Yolo"),
    ("115", "Yuba"),
];

// -- Tests -------------------------------------------------------------------
