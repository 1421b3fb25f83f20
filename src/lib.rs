pub mod classify;
pub mod cli;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod paths;
pub mod report;
pub mod rules;
pub mod schema;
pub mod ui;
pub mod writer;

pub use classify::{classify, Classification};
pub use cli::{Cli, Commands};
pub use error::{LoadError, SchemaError};
pub use loader::{load_menu_csv, LoadSummary};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui, UiApp};
pub use writer::{SqliteSession, Store};
