pub(crate) mod error;
pub(crate) mod parser;
mod version;
