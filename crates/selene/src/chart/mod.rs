pub mod birth;
pub mod houses;
pub mod natal;

pub use birth::{BirthData, ChartError};
pub use houses::{equal_houses, House};
pub use natal::{natal_chart, natal_chart_at, transits, NatalChart};
