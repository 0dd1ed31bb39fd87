use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::info;

use iqr_core::traits::{
    DataSet, DescriptorElementFactory, DescriptorGenerator, DescriptorIter, PretrainModel,
};
use iqr_core::types::DataElement;

use crate::hashed::HashedContentGenerator;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeanCenteredConfig {
    pub dim: usize,
    pub seed: u64,
    /// Where the pretrained mean vector is persisted. Without it the model
    /// lives only for the process lifetime.
    pub model_path: Option<PathBuf>,
}

impl Default for MeanCenteredConfig {
    fn default() -> Self {
        Self {
            dim: 256,
            seed: 0,
            model_path: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MeanModel {
    dim: usize,
    mean: Vec<f32>,
}

/// Hashed-content descriptors centered on a dataset mean. The mean is the
/// persistent model: the pretraining extension computes it over the full
/// dataset and, when `model_path` is set, writes it out so later runs can
/// reload it at construction time.
#[derive(Debug)]
pub struct MeanCenteredHashGenerator {
    config: MeanCenteredConfig,
    mean: Option<Vec<f32>>,
}

impl MeanCenteredHashGenerator {
    /// Construct, reloading a previously persisted model when `model_path`
    /// points at one.
    pub fn new(config: MeanCenteredConfig) -> anyhow::Result<Self> {
        let mean = match &config.model_path {
            Some(path) if path.is_file() => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading model {}", path.display()))?;
                let model: MeanModel = serde_json::from_str(&raw)
                    .with_context(|| format!("parsing model {}", path.display()))?;
                if model.dim != config.dim {
                    bail!(
                        "model at {} has dimension {} but {} is configured",
                        path.display(),
                        model.dim,
                        config.dim
                    );
                }
                Some(model.mean)
            }
            _ => None,
        };
        Ok(Self { config, mean })
    }

    pub fn has_model(&self) -> bool {
        self.mean.is_some()
    }
}

impl DescriptorGenerator for MeanCenteredHashGenerator {
    fn name(&self) -> &str {
        "mean_centered_hash"
    }

    fn generate<'a>(
        &'a self,
        elements: &'a [DataElement],
        factory: &'a dyn DescriptorElementFactory,
    ) -> DescriptorIter<'a> {
        Box::new(elements.iter().map(move |element| {
            let mean = self.mean.as_ref().context(
                "no pretrained model; run pretraining or point model_path at an existing model",
            )?;
            let bytes = element
                .read_bytes()
                .with_context(|| format!("reading {}", element.path().display()))?;
            let mut vector =
                HashedContentGenerator::hash_bytes(&bytes, self.config.dim, self.config.seed);
            for (x, m) in vector.iter_mut().zip(mean) {
                *x -= m;
            }
            let mut descriptor = factory.create(self.name(), &element.id());
            descriptor.set_vector(vector)?;
            Ok(descriptor)
        }))
    }

    fn pretrainer(&mut self) -> Option<&mut dyn PretrainModel> {
        Some(self)
    }
}

impl PretrainModel for MeanCenteredHashGenerator {
    fn pretrain(&mut self, data_set: &dyn DataSet) -> anyhow::Result<()> {
        let elements = data_set.elements();
        if elements.is_empty() {
            bail!("cannot pretrain on an empty dataset");
        }
        let mut mean = vec![0f32; self.config.dim];
        for element in &elements {
            let bytes = element
                .read_bytes()
                .with_context(|| format!("reading {}", element.path().display()))?;
            let v = HashedContentGenerator::hash_bytes(&bytes, self.config.dim, self.config.seed);
            for (m, x) in mean.iter_mut().zip(&v) {
                *m += x;
            }
        }
        let n = elements.len() as f32;
        for m in &mut mean {
            *m /= n;
        }
        if let Some(path) = &self.config.model_path {
            let model = MeanModel {
                dim: self.config.dim,
                mean: mean.clone(),
            };
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating model directory {}", parent.display()))?;
            }
            fs::write(path, serde_json::to_string(&model)?)
                .with_context(|| format!("writing model {}", path.display()))?;
            info!(path = %path.display(), "persisted pretrained mean model");
        }
        self.mean = Some(mean);
        Ok(())
    }
}
