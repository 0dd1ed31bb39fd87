//! Descriptor-element storage and descriptor-generator implementations.
//!
//! `hashed_content` needs no model at all; `mean_centered_hash` exposes the
//! pretraining capability and persists its model itself.

pub mod element;
pub mod hashed;
pub mod mean_centered;

pub use element::{MemoryDescriptorElement, MemoryDescriptorFactory};
pub use hashed::{HashedContentConfig, HashedContentGenerator};
pub use mean_centered::{MeanCenteredConfig, MeanCenteredHashGenerator};
