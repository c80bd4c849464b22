//! Read the version resource string table of a Windows `PE` file and compare it to expected strings
//!
//! Only the resource directory of the executable is parsed

pub mod checker;
pub mod compare;
pub mod error;
pub mod expected;
pub mod logging;
pub mod structs;

mod filesystem;
mod pe;
mod utils;
