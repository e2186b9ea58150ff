pub mod config;
pub mod error;
pub mod project;
pub mod set;
pub mod storage;
pub mod value;
pub mod view;

pub use config::{DEFAULT_FILE_URL, DisplayContext, Labels};
pub use error::StorageError;
pub use project::{Project, ProjectField, Snapshot};
pub use set::{SetPosition, SetPrefix, SetPrefixError};
pub use storage::{Coord, ValueQuery, ValueStorage, storage_order};
pub use value::{AnswerOption, Attribute, FileRef, Number, Payload, Value, ValueType};
pub use view::{FileView, ValueView};
