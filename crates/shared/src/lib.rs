mod date;
mod error;
mod nutrition;
pub mod storage;

pub use date::*;
pub use error::*;
pub use nutrition::*;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageExt};
