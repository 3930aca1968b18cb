pub mod files;
pub mod store;

pub use files::{atomic_write, data_dir, ensure_data_dir, init_local_dir, report_file, state_file};
pub use store::{FileMedium, Medium, MemoryMedium, StateStore, StoreError};
