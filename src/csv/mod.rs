//! Handles serialising and saving data to disk in the _CSV_ file format.

pub mod climdiv;
pub mod population;
pub mod weather;

pub use climdiv::save_climdiv;
pub use population::save_population;
pub use weather::{save_observations, save_stations};
