// src/document/mod.rs
pub mod models;
pub mod reader;

pub use models::SourceDocument;
#[allow(unused_imports)]
pub use models::SourceKind;
pub use reader::load_document;
