//! The model-generation pipeline: dataset ingestion, capability probing,
//! phase orchestration, and the default plugin set.

pub mod hub;
pub mod ingest;
pub mod orchestrator;
pub mod probe;

pub use hub::PluginHub;
pub use orchestrator::{run, RunReport};
