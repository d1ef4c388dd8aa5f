//! Command line interface.

pub mod command;

use std::time::Duration;

use clap::{command, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download daily station observations from the NOAA CDO API
    Weather {},
    /// Download county time series from the Climate at a Glance web form
    CountyWeather {},
    /// Download US Drought Monitor statistics
    Drought {},
    /// Download and decode NOAA climate division files
    ClimateDivisions {},
    /// Download county population data from the US Census API
    Population {},
    /// Inspect the Dept of Finance population spreadsheets
    PopulationExcel {},
    /// Download SRTM elevation tiles covering California
    Elevation {},
    /// Print manual download guidance for topography data
    Topography {},
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}
