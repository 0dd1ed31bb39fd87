use std::collections::BTreeMap;
use std::hash::Hasher;

use anyhow::bail;
use serde::Deserialize;
use tracing::debug;
use twox_hash::XxHash64;

use iqr_core::traits::{DescriptorElement, FitFunctor, NearestNeighborsIndex};

use crate::exhaustive::cosine;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LshConfig {
    pub bits: usize,
    pub seed: u64,
}

impl Default for LshConfig {
    fn default() -> Self {
        Self { bits: 16, seed: 0 }
    }
}

/// Sign-random-projection hash functor. Projection components are derived
/// deterministically from the seed; `fit` centers the projections on the
/// sample mean so hash buckets split the data instead of the origin.
#[derive(Debug)]
pub struct RandomProjectionFunctor {
    bits: usize,
    seed: u64,
    center: Option<Vec<f32>>,
}

impl RandomProjectionFunctor {
    pub fn new(bits: usize, seed: u64) -> Self {
        Self {
            bits,
            seed,
            center: None,
        }
    }

    pub fn is_fit(&self) -> bool {
        self.center.is_some()
    }

    /// Pseudo-random projection component in [-1, 1) for (bit, dimension).
    fn component(&self, bit: usize, dim_index: usize) -> f32 {
        let mut hasher = XxHash64::with_seed(self.seed ^ bit as u64);
        hasher.write_usize(dim_index);
        let h = hasher.finish();
        (((h >> 32) as u32) as f32) / (u32::MAX as f32) * 2.0 - 1.0
    }

    pub fn hash(&self, vector: &[f32]) -> u64 {
        let mut code = 0u64;
        for bit in 0..self.bits {
            let mut dot = 0f32;
            for (i, x) in vector.iter().enumerate() {
                let c = self
                    .center
                    .as_ref()
                    .and_then(|center| center.get(i).copied())
                    .unwrap_or(0.0);
                dot += (x - c) * self.component(bit, i);
            }
            if dot >= 0.0 {
                code |= 1 << bit;
            }
        }
        code
    }
}

impl FitFunctor for RandomProjectionFunctor {
    fn fit(&mut self, descriptors: &[Box<dyn DescriptorElement>]) -> anyhow::Result<()> {
        if descriptors.is_empty() {
            bail!("cannot fit functor on an empty descriptor sample");
        }
        let mut vectors = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            match descriptor.vector() {
                Some(vector) => vectors.push(vector),
                None => bail!("descriptor '{}' has no vector", descriptor.data_id()),
            }
        }
        let dim = vectors[0].len();
        let mut center = vec![0f32; dim];
        for vector in &vectors {
            if vector.len() != dim {
                bail!(
                    "inconsistent descriptor dimensions: {} vs {}",
                    vector.len(),
                    dim
                );
            }
            for (c, x) in center.iter_mut().zip(vector) {
                *c += x;
            }
        }
        let n = vectors.len() as f32;
        for c in &mut center {
            *c /= n;
        }
        self.center = Some(center);
        debug!(samples = vectors.len(), dim, "fitted random-projection functor");
        Ok(())
    }
}

/// LSH index bucketing descriptors by functor hash code. Queries scan the
/// query's own bucket, falling back to a full scan when that bucket is empty.
#[derive(Debug)]
pub struct LshIndex {
    functor: RandomProjectionFunctor,
    buckets: BTreeMap<u64, Vec<(String, Vec<f32>)>>,
    size: usize,
}

impl LshIndex {
    pub fn new(config: LshConfig) -> Self {
        Self {
            functor: RandomProjectionFunctor::new(config.bits.clamp(1, 64), config.seed),
            buckets: BTreeMap::new(),
            size: 0,
        }
    }

    pub fn functor(&self) -> &RandomProjectionFunctor {
        &self.functor
    }
}

impl NearestNeighborsIndex for LshIndex {
    fn build(&mut self, descriptors: &[Box<dyn DescriptorElement>]) -> anyhow::Result<()> {
        let mut buckets: BTreeMap<u64, Vec<(String, Vec<f32>)>> = BTreeMap::new();
        let mut size = 0usize;
        for descriptor in descriptors {
            let vector = match descriptor.vector() {
                Some(vector) => vector,
                None => bail!("descriptor '{}' has no vector", descriptor.data_id()),
            };
            let code = self.functor.hash(&vector);
            buckets
                .entry(code)
                .or_default()
                .push((descriptor.data_id().to_string(), vector));
            size += 1;
        }
        debug!(size, buckets = buckets.len(), "built LSH index");
        self.buckets = buckets;
        self.size = size;
        Ok(())
    }

    fn count(&self) -> usize {
        self.size
    }

    fn nn(&self, query: &[f32], n: usize) -> anyhow::Result<Vec<(String, f32)>> {
        if self.size == 0 {
            bail!("index has not been built");
        }
        let code = self.functor.hash(query);
        let candidates: Vec<&(String, Vec<f32>)> = match self.buckets.get(&code) {
            Some(bucket) => bucket.iter().collect(),
            None => self.buckets.values().flatten().collect(),
        };
        let mut scored: Vec<(String, f32)> = candidates
            .iter()
            .map(|(id, vector)| (id.clone(), cosine(query, vector)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n);
        Ok(scored)
    }

    fn fittable_functor(&mut self) -> Option<&mut dyn FitFunctor> {
        Some(&mut self.functor)
    }
}
