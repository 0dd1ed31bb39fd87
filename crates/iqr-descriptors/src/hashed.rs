use std::hash::Hasher;

use anyhow::Context;
use serde::Deserialize;
use twox_hash::XxHash64;

use iqr_core::traits::{DescriptorElementFactory, DescriptorGenerator, DescriptorIter};
use iqr_core::types::DataElement;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HashedContentConfig {
    pub dim: usize,
    pub seed: u64,
}

impl Default for HashedContentConfig {
    fn default() -> Self {
        Self { dim: 256, seed: 0 }
    }
}

/// Deterministic feature-hashing descriptor over raw file bytes: 4-byte
/// shingles are hashed into `dim` buckets and the bucket histogram is
/// L2-normalized. No model, no pretraining capability.
#[derive(Debug)]
pub struct HashedContentGenerator {
    config: HashedContentConfig,
}

impl HashedContentGenerator {
    pub fn new(config: HashedContentConfig) -> Self {
        Self { config }
    }

    pub(crate) fn hash_bytes(bytes: &[u8], dim: usize, seed: u64) -> Vec<f32> {
        let mut v = vec![0f32; dim];
        if bytes.is_empty() {
            return v;
        }
        let window = 4usize.min(bytes.len());
        for shingle in bytes.windows(window) {
            let mut hasher = XxHash64::with_seed(seed);
            hasher.write(shingle);
            let h = hasher.finish();
            let idx = (h as usize) % dim;
            // Bucket weight in (0.5, 1.5] derived from the upper hash bits so
            // collisions do not all contribute the same mass.
            v[idx] += (((h >> 32) as u32) as f32) / (u32::MAX as f32) + 0.5;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

impl DescriptorGenerator for HashedContentGenerator {
    fn name(&self) -> &str {
        "hashed_content"
    }

    fn generate<'a>(
        &'a self,
        elements: &'a [DataElement],
        factory: &'a dyn DescriptorElementFactory,
    ) -> DescriptorIter<'a> {
        Box::new(elements.iter().map(move |element| {
            let bytes = element
                .read_bytes()
                .with_context(|| format!("reading {}", element.path().display()))?;
            let vector = Self::hash_bytes(&bytes, self.config.dim, self.config.seed);
            let mut descriptor = factory.create(self.name(), &element.id());
            descriptor.set_vector(vector)?;
            Ok(descriptor)
        }))
    }
}
