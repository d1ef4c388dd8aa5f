//! Inspect the CA Dept of Finance E-4 population spreadsheets.
//!
//! Reads the "Table 1 County State" sheet of each of the three manually
//! downloaded workbooks and prints shapes and head rows for inspection.
//! The reshape to long format and the merge are deliberately not done here:
//! the column layout differs between the three workbooks and has to be
//! confirmed by eye first.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};

use super::data_dir;

const SHEET_NAME: &str = "Table 1 County State";

const FILES: [(&str, &str); 3] = [
    ("2000-2010", "E4_2000-2010_Report_Final_EOC_000 (1).xlsx"),
    ("2010-2020", "E-4_2010-2020-Internet-Version.xlsx"),
    ("2020-2025", "E-4_2025_InternetVersion.xlsx"),
];

const HEAD_ROWS: usize = 10;

pub fn population_excel() -> Result<String> {
    let dir = data_dir("raw/population")?;

    println!("PROCESSING CALIFORNIA POPULATION DATA (2000-2025)");

    let mut inspected = 0usize;
    for (period, filename) in FILES {
        println!("\nReading {period} data...");

        match inspect(&dir.join(filename)) {
            Ok(()) => inspected += 1,
            Err(e) => println!("❌ Could not read {filename}: {e:#}"),
        }
    }

    if inspected == 0 {
        return Err(anyhow!(
            "none of the E-4 workbooks could be read - download them from the \
             CA Dept of Finance into {}",
            dir.display()
        ));
    }

    println!("\nDATA INSPECTION COMPLETE");
    println!("Next steps:");
    println!("1. Identify the county name column in each workbook");
    println!("2. Identify the year columns");
    println!("3. Reshape the data to long format (County, Year, Population)");
    println!("4. Combine all three datasets");
    println!("5. Save as california_population_2000_2025.csv");

    Ok(dir.to_string_lossy().to_string())
}

fn inspect(path: &Path) -> Result<()> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("opening {}", path.display()))?;
    let range = workbook
        .worksheet_range(SHEET_NAME)
        .with_context(|| format!("reading sheet `{SHEET_NAME}`"))?;

    let (rows, columns) = range.get_size();
    println!("✅ Loaded {rows} rows x {columns} columns");

    for row in range.rows().take(HEAD_ROWS) {
        println!("   {}", render_row(row));
    }

    Ok(())
}

fn render_row(row: &[Data]) -> String {
    row.iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

// -- Tests -------------------------------------------------------------------
