pub mod corpora;
pub mod download;
pub mod error;
pub mod granularity;
pub mod pipeline;
pub mod poem;
pub mod readers;
pub mod scansion;
pub mod writing;
