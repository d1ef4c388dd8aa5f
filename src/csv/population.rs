//! Save Census population records to a CSV file.

use std::path::Path;

use anyhow::Result;
use csv::Writer;

use crate::reading::PopulationRecord;

pub fn save_population(records: &[PopulationRecord], file_path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(file_path)?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_write_population_rows() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file_path = tmp.path().join("population.csv");

        let records = vec![PopulationRecord {
            state_fips: "06".to_string(),
            county_fips: "037".to_string(),
            county_name: Some("Los Angeles".to_string()),
            year: 2020,
            total_population: Some(10_014_009),
            male_population: None,
            female_population: Some(5_034_368),
        }];

        save_population(&records, &file_path).unwrap();

        let mut reader = csv::Reader::from_path(&file_path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "Los Angeles");
        assert_eq!(&rows[0][4], "10014009");
        assert_eq!(&rows[0][5], "");
    }
}
