//! Translation data: file formats, tree helpers and the on-disk store

mod file_system;
mod format;
pub mod tree;

pub use file_system::{FileSystemData, WriteRoute};
pub use format::Format;
