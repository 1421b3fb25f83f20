pub mod chart;
pub mod export;
pub mod query;

pub use chart::*;
pub use export::*;
pub use query::*;
