pub mod pipeline;
pub mod reconcile;
pub mod resolver;

pub use pipeline::*;
pub use reconcile::get_or_create;
pub use resolver::non_existing;
