mod json_file;

pub use json_file::{default_data_dir, read_json_or_default, write_json_atomic, Result, StorageError};
