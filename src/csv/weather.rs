//! Save CDO station listings and daily observations to CSV files.

use std::path::Path;

use anyhow::Result;
use csv::Writer;

use crate::cdo::{Observation, Station};

pub fn save_observations(observations: &[Observation], file_path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(file_path)?;

    for observation in observations {
        writer.serialize(observation)?;
    }
    writer.flush()?;

    Ok(())
}

pub fn save_stations(stations: &[Station], file_path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(file_path)?;

    for station in stations {
        writer.serialize(station)?;
    }
    writer.flush()?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_write_observations() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file_path = tmp.path().join("observations.csv");

        let observations = vec![
            Observation {
                station: "GHCND:USC00040001".to_string(),
                date: "2020-01-01T00:00:00".to_string(),
                datatype: "TMAX".to_string(),
                attributes: Some(",,W,0700".to_string()),
                value: 18.3,
            },
            Observation {
                station: "GHCND:USC00040001".to_string(),
                date: "2020-01-01T00:00:00".to_string(),
                datatype: "PRCP".to_string(),
                attributes: None,
                value: 0.0,
            },
        ];

        save_observations(&observations, &file_path).unwrap();

        let mut reader = csv::Reader::from_path(&file_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["station", "date", "datatype", "attributes", "value"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "TMAX");
        assert_eq!(&rows[1][3], "");
    }

    #[test]
    fn should_write_stations() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file_path = tmp.path().join("stations.csv");

        let stations = vec![Station {
            id: "GHCND:USC00040693".to_string(),
            name: "BERKELEY, CA US".to_string(),
            latitude: Some(37.8),
            longitude: Some(-122.26),
            elevation: Some(96.0),
            elevation_unit: Some("METERS".to_string()),
            mindate: "1893-01-01".to_string(),
            maxdate: "2025-08-01".to_string(),
            datacoverage: Some(0.97),
        }];

        save_stations(&stations, &file_path).unwrap();

        let mut reader = csv::Reader::from_path(&file_path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "GHCND:USC00040693");
    }
}
