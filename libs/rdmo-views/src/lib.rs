pub mod config;
pub mod error;
pub mod filters;
pub mod labels;
pub mod mapper;
pub mod resolver;

pub use config::ViewConfig;
pub use error::ViewError;
pub use labels::{Ancestor, Element};
pub use mapper::{ProjectContext, is_mapped, mapped_value};
pub use resolver::{Coords, ValueResolver};
