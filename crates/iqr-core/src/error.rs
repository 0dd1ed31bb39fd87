use std::fmt;

use thiserror::Error;

/// Pipeline phases, in execution order. Pretraining and functor fitting are
/// skipped when the selected plugin does not expose the capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ingest,
    Pretrain,
    GenerateDescriptors,
    FitFunctor,
    BuildIndex,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Ingest => "data ingestion",
            Phase::Pretrain => "model pretraining",
            Phase::GenerateDescriptors => "descriptor generation",
            Phase::FitFunctor => "functor fitting",
            Phase::BuildIndex => "index build",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// One or both configuration documents failed to read or parse. Reported
    /// before any plugin is constructed or any data is touched.
    #[error("configuration load failed: {0}")]
    ConfigLoad(String),

    /// The documents loaded but do not describe a runnable pipeline, e.g. the
    /// requested tab does not exist.
    #[error("invalid configuration: {0}")]
    ConfigValidation(String),

    /// The selected implementation is unknown, unusable in this environment,
    /// or rejected its constructor parameters.
    #[error("plugin instantiation failed: {0}")]
    PluginInstantiation(String),

    /// A pipeline phase was entered and failed. Aborts the whole run; a
    /// partially built index is never reported as built.
    #[error("{phase} failed: {reason}")]
    Phase { phase: Phase, reason: String },
}

impl Error {
    pub fn phase(phase: Phase, err: anyhow::Error) -> Self {
        Error::Phase {
            phase,
            reason: format!("{err:#}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
