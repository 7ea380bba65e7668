pub mod error;
pub mod name_list;
pub mod selection;

pub use name_list::{NameList, SourceFormat};
pub use selection::{SelectionRequest, SelectionResult};
