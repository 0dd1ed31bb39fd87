//! Nearest-neighbor index implementations: a brute-force baseline and an LSH
//! index whose projection functor supports the optional fitting capability.

pub mod exhaustive;
pub mod lsh;

pub use exhaustive::ExhaustiveIndex;
pub use lsh::{LshConfig, LshIndex, RandomProjectionFunctor};
