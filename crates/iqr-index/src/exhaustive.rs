use anyhow::bail;

use iqr_core::traits::{DescriptorElement, NearestNeighborsIndex};

/// Brute-force cosine-similarity index. Keeps every vector in memory and
/// scans all of them per query. No internal transform, so no fitting
/// capability.
#[derive(Debug, Default)]
pub struct ExhaustiveIndex {
    entries: Vec<(String, Vec<f32>)>,
}

impl ExhaustiveIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

pub(crate) fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

impl NearestNeighborsIndex for ExhaustiveIndex {
    fn build(&mut self, descriptors: &[Box<dyn DescriptorElement>]) -> anyhow::Result<()> {
        let mut entries = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            match descriptor.vector() {
                Some(vector) => entries.push((descriptor.data_id().to_string(), vector)),
                None => bail!("descriptor '{}' has no vector", descriptor.data_id()),
            }
        }
        self.entries = entries;
        Ok(())
    }

    fn count(&self) -> usize {
        self.entries.len()
    }

    fn nn(&self, query: &[f32], n: usize) -> anyhow::Result<Vec<(String, f32)>> {
        if self.entries.is_empty() {
            bail!("index has not been built");
        }
        let mut scored: Vec<(String, f32)> = self
            .entries
            .iter()
            .map(|(id, vector)| (id.clone(), cosine(query, vector)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n);
        Ok(scored)
    }
}
