#![deny(clippy::all, clippy::perf, clippy::correctness, rust_2018_idioms)]
#![warn(clippy::unwrap_used)]

pub mod compare;
pub mod input;
pub mod settings;

pub use compare::{
    compare_with_reference, reference_digest, reference_reader_digest, render, Comparison,
};
pub use input::{hash_reader, read_message};
pub use settings::{Settings, SETTINGS};
