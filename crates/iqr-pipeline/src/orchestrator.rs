use tracing::{debug, info};

use iqr_core::config::{IqrTab, ServicePlugins};
use iqr_core::error::{Error, Phase, Result};

use crate::hub::PluginHub;
use crate::ingest;
use crate::probe;

/// Summary of one completed run; the optional phases report whether they ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub files_ingested: usize,
    pub pretrained: bool,
    pub descriptor_count: usize,
    pub functor_fitted: bool,
}

/// Drive one model-generation run end to end: instantiate the four configured
/// plugins, ingest the input patterns into the dataset, then pretrain /
/// generate / fit / build strictly in that order.
///
/// All four plugins are instantiated before anything else happens, so a
/// misconfigured index aborts the run before any data is touched. The
/// optional phases are skipped when the plugin does not expose the
/// capability; every other failure aborts the run with no retry.
pub fn run(
    hub: &PluginHub,
    tab: &IqrTab,
    plugins: &ServicePlugins,
    patterns: &[String],
) -> Result<RunReport> {
    info!("instantiating plugins");
    let mut data_set = hub.data_sets.instantiate(&tab.data_set)?;
    let factory = hub
        .descriptor_factories
        .instantiate(&plugins.descriptor_factory)?;
    let mut generator = hub
        .descriptor_generators
        .instantiate(&plugins.descriptor_generator)?;
    let mut index = hub.neighbor_indexes.instantiate(&plugins.neighbor_index)?;

    info!("adding input files to the data set");
    let files_ingested = ingest::ingest(data_set.as_mut(), patterns)?;
    info!(files_ingested, total = data_set.count(), "data ingestion complete");

    let pretrained = probe::call_optional(generator.pretrainer(), Phase::Pretrain, |pretrainer| {
        pretrainer.pretrain(data_set.as_ref())
    })?
    .is_some();

    info!(generator = generator.name(), "computing descriptors for the data set");
    let elements = data_set.elements();
    let descriptors = generator
        .generate(&elements, factory.as_ref())
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| Error::phase(Phase::GenerateDescriptors, e))?;
    debug!(count = descriptors.len(), "descriptor sequence materialized");

    // Fitting must precede the build; the build below relies on the fitted
    // transform when one exists.
    let functor_fitted =
        probe::call_optional(index.fittable_functor(), Phase::FitFunctor, |functor| {
            functor.fit(&descriptors)
        })?
        .is_some();

    info!("building nearest-neighbors index");
    index
        .build(&descriptors)
        .map_err(|e| Error::phase(Phase::BuildIndex, e))?;

    Ok(RunReport {
        files_ingested,
        pretrained,
        descriptor_count: descriptors.len(),
        functor_fitted,
    })
}
