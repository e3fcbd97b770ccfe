//! Library components of the xsv-sniff command-line tool.

#![allow(missing_docs)]

pub mod format;
pub mod logging;
pub mod render;
