mod cdo;
mod cli;
mod config;
mod csv;
mod download;
mod reading;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    config::load_dotenv();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Weather {} => match command::weather().await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::CountyWeather {} => match command::county_weather().await {
            Ok(dirname) => println!("Files saved to `{}`", dirname),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Drought {} => match command::drought().await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::ClimateDivisions {} => match command::climate_divisions().await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Population {} => match command::population().await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::PopulationExcel {} => {
            if let Err(e) = command::population_excel() {
                eprintln!("Error: {}", e);
            }
        }
        Commands::Elevation {} => match command::elevation().await {
            Ok(dirname) => println!("Files saved to `{}`", dirname),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Topography {} => command::topography(),
    }

    Ok(())
}
