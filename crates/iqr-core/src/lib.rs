#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Core of the IQR model-generation pipeline: the error taxonomy, the
//! capability contracts every plugin implements, the configuration documents
//! that select plugins, and the registry that turns a configuration fragment
//! into a live plugin instance.

pub mod config;
pub mod data_set;
pub mod error;
pub mod registry;
pub mod traits;
pub mod types;

pub use error::{Error, Phase, Result};
