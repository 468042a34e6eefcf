//! Import batches: finding translation files and reading them together.

pub mod types;
pub mod workspace;

pub use types::{
    ImportBatch,
    ImportedFile,
    IndexerError,
    RejectedFile,
};
pub use workspace::{
    default_concurrency,
    expand_inputs,
    find_translation_files,
    read_batch,
};
