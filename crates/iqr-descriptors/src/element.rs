use iqr_core::traits::{DescriptorElement, DescriptorElementFactory};

/// Descriptor container holding its vector in process memory.
#[derive(Debug, Clone)]
pub struct MemoryDescriptorElement {
    generator_id: String,
    data_id: String,
    vector: Option<Vec<f32>>,
}

impl MemoryDescriptorElement {
    pub fn new(generator_id: &str, data_id: &str) -> Self {
        Self {
            generator_id: generator_id.to_string(),
            data_id: data_id.to_string(),
            vector: None,
        }
    }
}

impl DescriptorElement for MemoryDescriptorElement {
    fn generator_id(&self) -> &str {
        &self.generator_id
    }

    fn data_id(&self) -> &str {
        &self.data_id
    }

    fn has_vector(&self) -> bool {
        self.vector.is_some()
    }

    fn vector(&self) -> Option<Vec<f32>> {
        self.vector.clone()
    }

    fn set_vector(&mut self, vector: Vec<f32>) -> anyhow::Result<()> {
        self.vector = Some(vector);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryDescriptorFactory;

impl MemoryDescriptorFactory {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorElementFactory for MemoryDescriptorFactory {
    fn create(&self, generator_id: &str, data_id: &str) -> Box<dyn DescriptorElement> {
        Box::new(MemoryDescriptorElement::new(generator_id, data_id))
    }
}
