pub mod record_files;

pub use record_files::*;
