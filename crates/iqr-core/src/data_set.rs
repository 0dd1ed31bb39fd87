use crate::traits::DataSet;
use crate::types::DataElement;

/// In-memory dataset. Keeps elements in insertion order and keeps duplicate
/// insertions; collapsing duplicates is left to backends whose key semantics
/// require it.
#[derive(Debug, Default)]
pub struct MemoryDataSet {
    elements: Vec<DataElement>,
}

impl MemoryDataSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataSet for MemoryDataSet {
    fn add(&mut self, element: DataElement) -> anyhow::Result<()> {
        self.elements.push(element);
        Ok(())
    }

    fn count(&self) -> usize {
        self.elements.len()
    }

    fn elements(&self) -> Vec<DataElement> {
        self.elements.clone()
    }
}
