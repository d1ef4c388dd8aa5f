//! NOAA Climate Data Online (CDO) v2 API client.
//!
//! See <https://www.ncdc.noaa.gov/cdo-web/webservices/v2> for the endpoint
//! documentation. The token is passed in at construction and sent as a
//! `token` header on every request.

use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

const BASE_URL: &str = "https://www.ncdc.noaa.gov/cdo-web/api/v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The per-request record cap imposed by the API.
pub const PAGE_LIMIT: usize = 1000;

pub struct CdoClient {
    http: Client,
    token: String,
}

impl CdoClient {
    pub fn new(token: String) -> Self {
        CdoClient {
            http: Client::new(),
            token,
        }
    }

    /// Lists all stations for a location, following pagination until a short
    /// page is returned.
    pub async fn stations(&self, location_id: &str) -> Result<Vec<Station>> {
        let mut stations = Vec::new();
        let mut offset = 1usize;

        loop {
            let params = [
                ("locationid", location_id.to_string()),
                ("limit", PAGE_LIMIT.to_string()),
                ("offset", offset.to_string()),
            ];
            let page: Page<Station> = self.get("stations", &params).await?;

            let results = match page.results {
                Some(results) => results,
                None => break,
            };
            let page_len = results.len();
            stations.extend(results);

            if page_len < PAGE_LIMIT {
                break;
            }
            offset += PAGE_LIMIT;
        }

        Ok(stations)
    }

    /// Lists the datasets available through the API.
    pub async fn datasets(&self) -> Result<Vec<Dataset>> {
        let page: Page<Dataset> = self.get("datasets", &[]).await?;

        Ok(page.results.unwrap_or_default())
    }

    /// Fetches one bounded batch of daily observations for a (year, datatype)
    /// pair. `Ok(None)` means the API answered with no results for the query.
    pub async fn daily_data(
        &self,
        location_id: &str,
        datatype: &str,
        year: i32,
    ) -> Result<Option<Vec<Observation>>> {
        let params = [
            ("datasetid", "GHCND".to_string()),
            ("locationid", location_id.to_string()),
            ("datatypeid", datatype.to_string()),
            ("startdate", format!("{year}-01-01")),
            ("enddate", format!("{year}-12-31")),
            ("units", "metric".to_string()),
            ("limit", PAGE_LIMIT.to_string()),
            ("offset", "1".to_string()),
        ];
        let page: Page<Observation> = self.get("data", &params).await?;

        Ok(page.results)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", BASE_URL, path);
        let response = self
            .http
            .get(&url)
            .header("token", &self.token)
            .query(params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("CDO request to /{} failed: HTTP {}", path, response.status()));
        }

        Ok(response.json::<T>().await?)
    }
}

/// One page of a CDO listing. `results` is absent when the query matched
/// nothing, not an empty array.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub results: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    pub resultset: ResultSet,
}

#[derive(Debug, Deserialize)]
pub struct ResultSet {
    pub offset: u64,
    pub count: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(rename = "elevationUnit", default)]
    pub elevation_unit: Option<String>,
    pub mindate: String,
    pub maxdate: String,
    #[serde(default)]
    pub datacoverage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    pub mindate: String,
    pub maxdate: String,
    #[serde(default)]
    pub datacoverage: Option<f64>,
}

/// One daily observation row. Uniqueness on (station, date, datatype) is
/// implied by the provider but not enforced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub station: String,
    pub date: String,
    pub datatype: String,
    #[serde(default)]
    pub attributes: Option<String>,
    pub value: f64,
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_deserialise_data_page() {
        let body = r#"{
            "metadata": {"resultset": {"offset": 1, "count": 2, "limit": 1000}},
            "results": [
                {"date": "2020-01-01T00:00:00", "datatype": "TMAX",
                 "station": "GHCND:USC00040001", "attributes": ",,W,0700", "value": 18.3},
                {"date": "2020-01-01T00:00:00", "datatype": "PRCP",
                 "station": "GHCND:USC00040001", "value": 0.0}
            ]
        }"#;

        let page: Page<Observation> = serde_json::from_str(body).unwrap();
        let results = page.results.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].datatype, "TMAX");
        assert_eq!(results[0].value, 18.3);
        assert_eq!(results[1].attributes, None);
        assert_eq!(page.metadata.unwrap().resultset.count, 2);
    }

    #[test]
    fn should_deserialise_empty_page() {
        let page: Page<Observation> = serde_json::from_str("{}").unwrap();

        assert!(page.results.is_none());
        assert!(page.metadata.is_none());
    }

    #[test]
    fn should_deserialise_station() {
        let body = r#"{
            "elevation": 96, "mindate": "1893-01-01", "maxdate": "2025-08-01",
            "latitude": 37.8, "name": "BERKELEY, CA US", "datacoverage": 0.97,
            "id": "GHCND:USC00040693", "elevationUnit": "METERS", "longitude": -122.26
        }"#;

        let station: Station = serde_json::from_str(body).unwrap();

        assert_eq!(station.id, "GHCND:USC00040693");
        assert_eq!(station.elevation_unit, Some("METERS".to_string()));
        assert_eq!(station.latitude, Some(37.8));
    }
}
