//! Output generation.
//!
//! # Submodules
//!
//! - [`rss`]: Builds the RSS 2.0 document from extracted articles and writes it to disk
//!
//! # Output Structure
//!
//! ```text
//! <executable dir>/
//! └── gazzettino_rss.xml   # overwritten on every run
//! ```

pub mod rss;
