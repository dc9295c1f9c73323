//! Code generators for catalog models.

mod copy;
mod derive;

pub use derive::derive_model_impl;
