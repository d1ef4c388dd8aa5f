//! NOAA climate division fixed-width records.
//!
//! Each line of a climdiv file encodes one division-year: a 4-character
//! division code, a 4-character year, then twelve 5-character monthly fields
//! at positions 8 to 68. Values are fixed-point, scaled by 100; `-9999`
//! marks a missing month.

use std::{
    collections::btree_map::{BTreeMap, Entry},
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::Serialize;

const MIN_LINE_LEN: usize = 68;
const VALUE_START: usize = 8;
const VALUE_WIDTH: usize = 5;
const MONTHS_PER_YEAR: usize = 12;
const SENTINEL: &str = "-9999";

/// The three variables merged into the processed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Precipitation,
    MaxTemperature,
    MinTemperature,
}

impl Variable {
    /// The column this variable fills in the merged table.
    pub fn column_name(&self) -> &'static str {
        match self {
            Variable::Precipitation => "precipitation",
            Variable::MaxTemperature => "max_temperature",
            Variable::MinTemperature => "min_temperature",
        }
    }
}

/// One decoded (division, year, month) value for a single variable.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyValue {
    pub division_code: String,
    pub year: i32,
    pub month: u32,
    pub value: Option<f64>,
}

/// One row of the merged table: the outer join of the three variables on
/// (division_code, year, month).
#[derive(Debug, Clone, Serialize)]
pub struct ClimateDivisionRecord {
    pub division_code: String,
    pub year: i32,
    pub month: u32,
    pub precipitation: Option<f64>,
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub date: NaiveDate,
}

/// One decoded line: division code, year, and twelve monthly values.
#[derive(Debug, PartialEq)]
pub struct DecodedLine {
    pub division_code: String,
    pub year: i32,
    pub values: [Option<f64>; MONTHS_PER_YEAR],
}

/// Decodes one fixed-width line.
///
/// A line shorter than 68 characters is malformed and yields `Ok(None)`. An
/// unparseable year field is an error; the caller treats that as fatal for
/// the file it came from.
pub fn decode_line(line: &str) -> Result<Option<DecodedLine>> {
    let line = line.trim();
    if line.len() < MIN_LINE_LEN {
        return Ok(None);
    }

    let division_code = line[..4].trim().to_string();
    let year: i32 = line[4..8]
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid year field `{}`", &line[4..8]))?;

    let mut values = [None; MONTHS_PER_YEAR];
    for (i, slot) in values.iter_mut().enumerate() {
        let start = VALUE_START + i * VALUE_WIDTH;
        *slot = decode_value(line[start..start + VALUE_WIDTH].trim());
    }

    Ok(Some(DecodedLine {
        division_code,
        year,
        values,
    }))
}

/// The sentinel and empty fields are missing values; everything else is
/// fixed-point scaled by 100. A non-numeric field also decodes to `None`.
fn decode_value(field: &str) -> Option<f64> {
    if field.is_empty() || field == SENTINEL {
        return None;
    }

    field.parse::<f64>().ok().map(|v| v / 100.0)
}

/// Decodes every record in one climdiv file into per-month values, including
/// months that decoded to null. A read or decode error aborts this file only;
/// the caller reports it and continues with the sibling files.
pub fn decode_file(path: &Path) -> Result<Vec<MonthlyValue>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(decoded) = decode_line(&line)? {
            for (i, value) in decoded.values.iter().enumerate() {
                records.push(MonthlyValue {
                    division_code: decoded.division_code.clone(),
                    year: decoded.year,
                    month: i as u32 + 1,
                    value: *value,
                });
            }
        }
    }

    Ok(records)
}

/// Outer join of the per-variable tables on (division_code, year, month).
///
/// The output has one row per key in the union of the inputs; a key present
/// in only one table keeps nulls for the other variables. Rows are ordered by
/// key. Each row is stamped with the first of its month.
pub fn outer_join(tables: &[(Variable, Vec<MonthlyValue>)]) -> Result<Vec<ClimateDivisionRecord>> {
    let mut merged: BTreeMap<(String, i32, u32), ClimateDivisionRecord> = BTreeMap::new();

    for (variable, values) in tables {
        for value in values {
            let key = (value.division_code.clone(), value.year, value.month);
            let record = match merged.entry(key) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let date = NaiveDate::from_ymd_opt(value.year, value.month, 1)
                        .ok_or_else(|| anyhow!("invalid month {} in decoded record", value.month))?;
                    entry.insert(ClimateDivisionRecord {
                        division_code: value.division_code.clone(),
                        year: value.year,
                        month: value.month,
                        precipitation: None,
                        max_temperature: None,
                        min_temperature: None,
                        date,
                    })
                }
            };

            match variable {
                Variable::Precipitation => record.precipitation = value.value,
                Variable::MaxTemperature => record.max_temperature = value.value,
                Variable::MinTemperature => record.min_temperature = value.value,
            }
        }
    }

    Ok(merged.into_values().collect())
}

/// Keeps records with `first <= year <= last`.
pub fn filter_years(
    records: Vec<ClimateDivisionRecord>,
    first: i32,
    last: i32,
) -> Vec<ClimateDivisionRecord> {
    records
        .into_iter()
        .filter(|r| r.year >= first && r.year <= last)
        .collect()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use std::io::Write;

    use super::*;

    // 4-char division, 4-char year, then twelve 5-char fields
    fn make_line(division: &str, year: &str, fields: [&str; 12]) -> String {
        let mut line = format!("{:<4}{}", division, year);
        for field in fields {
            line.push_str(&format!("{:>5}", field));
        }
        line
    }

    #[test]
    fn should_decode_line() {
        let fields = [
            "123", "-9999", "", "-50", "17", "99999", "1", "250", "-9999", "0", "839", "42",
        ];
        let line = make_line("0401", "2020", fields);
        assert_eq!(line.len(), 68);

        let decoded = decode_line(&line).unwrap().unwrap();

        assert_eq!(decoded.division_code, "0401");
        assert_eq!(decoded.year, 2020);
        assert_eq!(decoded.values[0], Some(1.23));
        assert_eq!(decoded.values[1], None);
        assert_eq!(decoded.values[2], None);
        assert_eq!(decoded.values[3], Some(-0.5));
        assert_eq!(decoded.values[5], Some(999.99));
        assert_eq!(decoded.values[9], Some(0.0));
        assert_eq!(decoded.values[11], Some(0.42));
    }

    #[test]
    fn should_skip_short_line() {
        assert_eq!(decode_line("").unwrap(), None);
        assert_eq!(decode_line("0401").unwrap(), None);

        // one character short of a full record
        let line = make_line("0401", "2020", [" "; 12]);
        let short = &line[..67];
        assert_eq!(decode_line(short).unwrap(), None);
    }

    #[test]
    fn should_error_on_bad_year() {
        let line = make_line("0401", "YYYY", ["123"; 12]);
        assert!(decode_line(&line).is_err());
    }

    #[test]
    fn should_decode_non_numeric_field_to_null() {
        let mut fields = ["100"; 12];
        fields[4] = "1.2.3";
        let line = make_line("0401", "2020", fields);

        let decoded = decode_line(&line).unwrap().unwrap();
        assert_eq!(decoded.values[4], None);
        assert_eq!(decoded.values[5], Some(1.0));
    }

    #[test]
    fn should_recover_fields_on_re_encode() {
        let fields = [
            "123", "-9999", "-50", "17", "0", "839", "42", "99999", "-9999", "1", "250", "7",
        ];
        let line = make_line("0401", "2020", fields);
        let decoded = decode_line(&line).unwrap().unwrap();

        for (i, field) in fields.iter().enumerate() {
            let re_encoded = match decoded.values[i] {
                Some(v) => format!("{}", (v * 100.0).round() as i64),
                None => SENTINEL.to_string(),
            };
            assert_eq!(re_encoded, *field);
        }
    }

    #[test]
    fn should_decode_file_and_skip_short_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", make_line("0401", "2019", ["100"; 12])).unwrap();
        writeln!(file, "too short").unwrap();
        writeln!(file, "{}", make_line("0402", "2020", ["-9999"; 12])).unwrap();
        file.flush().unwrap();

        let records = decode_file(file.path()).unwrap();

        assert_eq!(records.len(), 24);
        assert_eq!(records[0].division_code, "0401");
        assert_eq!(records[0].month, 1);
        assert_eq!(records[0].value, Some(1.0));
        assert!(records[12..].iter().all(|r| r.value.is_none()));
    }

    #[test]
    fn should_abort_file_on_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", make_line("0401", "2019", ["100"; 12])).unwrap();
        writeln!(file, "{}", make_line("0401", "YYYY", ["100"; 12])).unwrap();
        file.flush().unwrap();

        assert!(decode_file(file.path()).is_err());
    }

    #[test]
    fn should_outer_join_on_key_union() {
        let precipitation = vec![
            monthly("0401", 2020, 1, Some(1.5)),
            monthly("0401", 2020, 2, Some(2.0)),
        ];
        let max_temperature = vec![
            monthly("0401", 2020, 2, Some(21.0)),
            monthly("0402", 2020, 2, Some(18.5)),
        ];
        let min_temperature = vec![monthly("0401", 2020, 2, None)];

        let records = outer_join(&[
            (Variable::Precipitation, precipitation),
            (Variable::MaxTemperature, max_temperature),
            (Variable::MinTemperature, min_temperature),
        ])
        .unwrap();

        // union of keys: (0401,1), (0401,2), (0402,2)
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].division_code, "0401");
        assert_eq!(records[0].month, 1);
        assert_eq!(records[0].precipitation, Some(1.5));
        assert_eq!(records[0].max_temperature, None);
        assert_eq!(records[0].min_temperature, None);

        assert_eq!(records[1].month, 2);
        assert_eq!(records[1].precipitation, Some(2.0));
        assert_eq!(records[1].max_temperature, Some(21.0));
        assert_eq!(records[1].min_temperature, None);

        assert_eq!(records[2].division_code, "0402");
        assert_eq!(records[2].precipitation, None);
        assert_eq!(records[2].date, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
    }

    #[test]
    fn should_filter_year_range() {
        let values: Vec<MonthlyValue> = [1999, 2000, 2012, 2025, 2026]
            .iter()
            .map(|&year| monthly("0401", year, 1, Some(1.0)))
            .collect();
        let records = outer_join(&[(Variable::Precipitation, values)]).unwrap();

        let filtered = filter_years(records, 2000, 2025);

        let years: Vec<i32> = filtered.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2012, 2025]);
    }

    fn monthly(division: &str, year: i32, month: u32, value: Option<f64>) -> MonthlyValue {
        MonthlyValue {
            division_code: division.to_string(),
            year,
            month,
            value,
        }
    }
}
