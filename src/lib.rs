#![allow(clippy::enum_variant_names)]

//! Asset pipeline utilities: [`Application::compress`] mirrors a directory
//! while recompressing JPEG and PNG images, [`Application::count_variations`]
//! tallies PNG variations per letter and digit folder.

pub mod application;
pub mod cli;
pub mod codecs;
mod ext;
pub mod filesystem;
pub mod variations;

#[cfg(test)]
pub(crate) mod test_support;

pub use application::{Application, ApplicationError};
