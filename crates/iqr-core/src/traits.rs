//! Capability contracts implemented by plugins (or test doubles).
//!
//! Mandatory operations are plain trait methods. Optional extensions are
//! surfaced as explicit introspection methods returning `Option` so the
//! orchestrator can tell "capability absent" apart from "capability present
//! but its invocation failed" without ever calling speculatively.

use std::collections::BTreeMap;

use crate::types::DataElement;

/// Mutable collection of data elements, owned by one pipeline run. Only ever
/// grown by ingestion; must tolerate duplicate insertion without corrupting
/// internal state (whether duplicates collapse is the implementation's call).
pub trait DataSet {
    fn add(&mut self, element: DataElement) -> anyhow::Result<()>;

    fn count(&self) -> usize;

    /// Snapshot of stored elements in insertion order.
    fn elements(&self) -> Vec<DataElement>;
}

/// Container holding (or about to hold) one descriptor vector, keyed by the
/// generator that produced it and the data element it describes.
pub trait DescriptorElement {
    fn generator_id(&self) -> &str;

    fn data_id(&self) -> &str;

    fn has_vector(&self) -> bool;

    fn vector(&self) -> Option<Vec<f32>>;

    fn set_vector(&mut self, vector: Vec<f32>) -> anyhow::Result<()>;
}

/// Produces descriptor elements of whatever storage backend the deployment
/// configured, so generators stay agnostic of where vectors end up.
pub trait DescriptorElementFactory {
    fn create(&self, generator_id: &str, data_id: &str) -> Box<dyn DescriptorElement>;
}

pub type DescriptorIter<'a> =
    Box<dyn Iterator<Item = anyhow::Result<Box<dyn DescriptorElement>>> + 'a>;

pub trait DescriptorGenerator {
    /// Stable identity used to key produced descriptors.
    fn name(&self) -> &str;

    /// Lazily produce one descriptor per input element, in input order. The
    /// caller materializes the sequence; any per-item error is fatal to it.
    fn generate<'a>(
        &'a self,
        elements: &'a [DataElement],
        factory: &'a dyn DescriptorElementFactory,
    ) -> DescriptorIter<'a>;

    /// Optional extension: generate a persistent model from a dataset before
    /// any descriptors are computed. `None` means unsupported.
    fn pretrainer(&mut self) -> Option<&mut dyn PretrainModel> {
        None
    }
}

pub trait PretrainModel {
    fn pretrain(&mut self, data_set: &dyn DataSet) -> anyhow::Result<()>;
}

pub trait NearestNeighborsIndex {
    /// Build the index over the full descriptor collection. Not retried by
    /// the caller; failure aborts the run.
    fn build(&mut self, descriptors: &[Box<dyn DescriptorElement>]) -> anyhow::Result<()>;

    fn count(&self) -> usize;

    /// Nearest neighbors of `query` as (data id, similarity), best first.
    fn nn(&self, query: &[f32], n: usize) -> anyhow::Result<Vec<(String, f32)>>;

    /// Optional extension: an internal transform trainable from a descriptor
    /// sample before the index is built. `None` means unsupported.
    fn fittable_functor(&mut self) -> Option<&mut dyn FitFunctor> {
        None
    }
}

pub trait FitFunctor {
    fn fit(&mut self, descriptors: &[Box<dyn DescriptorElement>]) -> anyhow::Result<()>;
}

/// Required by the wider IQR service; never invoked during model generation.
pub trait SupervisedClassifier {
    fn has_model(&self) -> bool;

    fn train(&mut self, class_examples: &BTreeMap<String, Vec<Vec<f32>>>) -> anyhow::Result<()>;

    fn classify(&self, descriptor: &[f32]) -> anyhow::Result<BTreeMap<String, f32>>;
}

/// Required by the wider IQR service; never invoked during model generation.
pub trait RankRelevancyWithFeedback {
    /// Score `pool` against positive/negative exemplars. Returns the pool
    /// scores plus the uids the implementation wants user feedback on.
    fn rank_with_feedback(
        &self,
        positives: &[Vec<f32>],
        negatives: &[Vec<f32>],
        pool: &[Vec<f32>],
        pool_uids: &[String],
    ) -> anyhow::Result<(Vec<f32>, Vec<String>)>;
}
