pub mod read_from;
pub mod accessor;
pub mod archive;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod mesh;
pub mod obj;
pub mod texture;

#[cfg(test)]
mod test_util;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
