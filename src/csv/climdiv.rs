//! Save the merged climate division table to a CSV file.

use std::path::Path;

use anyhow::Result;
use csv::Writer;

use crate::reading::ClimateDivisionRecord;

pub fn save_climdiv(records: &[ClimateDivisionRecord], file_path: &Path) -> Result<()> {
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

    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn should_write_null_fields_as_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file_path = tmp.path().join("climdiv.csv");

        let records = vec![ClimateDivisionRecord {
            division_code: "0401".to_string(),
            year: 2020,
            month: 2,
            precipitation: Some(1.23),
            max_temperature: None,
            min_temperature: Some(-0.5),
            date: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
        }];

        save_climdiv(&records, &file_path).unwrap();

        let mut reader = csv::Reader::from_path(&file_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![
                "division_code",
                "year",
                "month",
                "precipitation",
                "max_temperature",
                "min_temperature",
                "date"
            ]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][3], "1.23");
        assert_eq!(&rows[0][4], "");
        assert_eq!(&rows[0][6], "2020-02-01");
    }
}
