pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

mod app;

pub use app::run;
pub use application::{NameParser, NameSampler};
pub use domain::error::{AppError, Result};
pub use domain::{NameList, SelectionRequest, SelectionResult, SourceFormat};
pub use infrastructure::config::ServerConfig;
