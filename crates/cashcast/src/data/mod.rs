pub mod storage;

pub use storage::{DataDirectory, StorageError, load_plan, load_snapshot, save_snapshot};
