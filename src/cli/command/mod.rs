pub mod climate_divisions;
pub mod county_weather;
pub mod drought;
pub mod elevation;
pub mod population;
pub mod population_excel;
pub mod topography;
pub mod weather;

use std::{fs, path::PathBuf};

use anyhow::Result;

pub use climate_divisions::climate_divisions;
pub use county_weather::county_weather;
pub use drought::drought;
pub use elevation::elevation;
pub use population::population;
pub use population_excel::population_excel;
pub use topography::topography;
pub use weather::weather;

/// Creates (if needed) and returns the output directory for one dataset.
///
/// Every command owns one subdirectory under `data/`; nothing else ties the
/// outputs together.
pub fn data_dir(subdir: &str) -> Result<PathBuf> {
    let dir = PathBuf::from("data").join(subdir);
    fs::create_dir_all(&dir)?;

    Ok(dir)
}

// -- Tests -------------------------------------------------------------------
