pub mod config;
pub mod contract;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod git;
pub mod gitlab;
pub mod io;
pub mod package;
pub mod pipeline;
pub mod table;

pub use error::{ArcPubError, Result};
