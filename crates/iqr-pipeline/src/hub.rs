//! The four capability registries a pipeline run draws its plugins from,
//! plus registration of the built-in implementations.

use serde_json::Value;

use iqr_core::data_set::MemoryDataSet;
use iqr_core::registry::PluginRegistry;
use iqr_core::traits::{
    DataSet, DescriptorElementFactory, DescriptorGenerator, NearestNeighborsIndex,
};
use iqr_descriptors::{HashedContentGenerator, MeanCenteredHashGenerator, MemoryDescriptorFactory};
use iqr_index::{ExhaustiveIndex, LshIndex};

pub struct PluginHub {
    pub data_sets: PluginRegistry<dyn DataSet>,
    pub descriptor_factories: PluginRegistry<dyn DescriptorElementFactory>,
    pub descriptor_generators: PluginRegistry<dyn DescriptorGenerator>,
    pub neighbor_indexes: PluginRegistry<dyn NearestNeighborsIndex>,
}

impl PluginHub {
    /// Empty registries; callers register what they need. Tests use this to
    /// drive the pipeline with doubles.
    pub fn empty() -> Self {
        Self {
            data_sets: PluginRegistry::new("data set"),
            descriptor_factories: PluginRegistry::new("descriptor element factory"),
            descriptor_generators: PluginRegistry::new("descriptor generator"),
            neighbor_indexes: PluginRegistry::new("nearest-neighbor index"),
        }
    }

    /// Registries populated with every built-in implementation.
    pub fn with_defaults() -> Self {
        let mut hub = Self::empty();
        hub.data_sets.register("memory", usable, memory_data_set);
        hub.descriptor_factories
            .register("memory", usable, memory_factory);
        hub.descriptor_generators
            .register("hashed_content", usable, hashed_content);
        hub.descriptor_generators
            .register("mean_centered_hash", usable, mean_centered_hash);
        hub.neighbor_indexes
            .register("exhaustive", usable, exhaustive_index);
        hub.neighbor_indexes.register("lsh", usable, lsh_index);
        hub
    }
}

// The built-ins have no native-library requirements.
fn usable() -> bool {
    true
}

fn memory_data_set(_params: &Value) -> anyhow::Result<Box<dyn DataSet>> {
    Ok(Box::new(MemoryDataSet::new()))
}

fn memory_factory(_params: &Value) -> anyhow::Result<Box<dyn DescriptorElementFactory>> {
    Ok(Box::new(MemoryDescriptorFactory::new()))
}

fn hashed_content(params: &Value) -> anyhow::Result<Box<dyn DescriptorGenerator>> {
    let config = serde_json::from_value(params.clone())?;
    Ok(Box::new(HashedContentGenerator::new(config)))
}

fn mean_centered_hash(params: &Value) -> anyhow::Result<Box<dyn DescriptorGenerator>> {
    let config = serde_json::from_value(params.clone())?;
    Ok(Box::new(MeanCenteredHashGenerator::new(config)?))
}

fn exhaustive_index(_params: &Value) -> anyhow::Result<Box<dyn NearestNeighborsIndex>> {
    Ok(Box::new(ExhaustiveIndex::new()))
}

fn lsh_index(params: &Value) -> anyhow::Result<Box<dyn NearestNeighborsIndex>> {
    let config = serde_json::from_value(params.clone())?;
    Ok(Box::new(LshIndex::new(config)))
}
