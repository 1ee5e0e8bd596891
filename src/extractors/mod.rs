// src/extractors/mod.rs
pub mod assembler;
pub mod fields;
pub mod ignore;
pub mod names;
pub mod record;
pub mod segment;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use assembler::{
    dedup_keep_first,
    BlockOutcome,
    BlockStatus,
    Extraction,
    ExtractorConfig,
    RecordExtractor,
    SkipReason,
};
pub use ignore::IgnoreList;
#[allow(unused_imports)]
pub use record::{Record, RecordTable, COLUMNS, TABLE_NAME};
