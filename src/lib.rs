//! # javadoc-scan
//!
//! Finds public Java classes, interfaces, enums, records and methods that are
//! not preceded by a Javadoc comment.
//!
//! ## Architecture
//!
//! - **scan**: recursive discovery of `.java` files under a source root
//! - **doc**: the line-oriented documentation heuristic for a single file
//! - **audit**: per-file read and check, aggregated into a run report
//! - **report**: text and JSON rendering of a run report
//! - **config**: scan root resolution
//! - **cli**: command-line definitions

pub mod audit;
pub mod cli;
pub mod config;
pub mod doc;
pub mod report;
pub mod scan;
