pub mod climdiv;
pub mod population;

pub use climdiv::{ClimateDivisionRecord, MonthlyValue, Variable};
pub use population::PopulationRecord;
