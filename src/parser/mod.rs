pub mod menu;
pub mod record;

pub use menu::*;
pub use record::*;
