use std::fs;

use tempfile::TempDir;

use iqr_core::data_set::MemoryDataSet;
use iqr_core::traits::{DataSet, DescriptorElementFactory, DescriptorGenerator};
use iqr_core::types::DataElement;

use iqr_descriptors::{
    HashedContentConfig, HashedContentGenerator, MeanCenteredConfig, MeanCenteredHashGenerator,
    MemoryDescriptorFactory,
};

fn element(tmp: &TempDir, name: &str, contents: &str) -> DataElement {
    let path = tmp.path().join(name);
    fs::write(&path, contents).expect("write file");
    DataElement::from_file(&path).expect("wrap file")
}

#[test]
fn factory_keys_elements_by_generator_and_data_id() {
    let factory = MemoryDescriptorFactory::new();
    let mut descriptor = factory.create("gen", "some/file");
    assert_eq!(descriptor.generator_id(), "gen");
    assert_eq!(descriptor.data_id(), "some/file");
    assert!(!descriptor.has_vector());
    descriptor.set_vector(vec![1.0, 2.0]).expect("set vector");
    assert_eq!(descriptor.vector(), Some(vec![1.0, 2.0]));
}

#[test]
fn hashed_content_is_deterministic_and_normalized() {
    let tmp = TempDir::new().expect("tempdir");
    let elements = vec![element(&tmp, "a.txt", "the quick brown fox")];
    let factory = MemoryDescriptorFactory::new();

    let generator = HashedContentGenerator::new(HashedContentConfig { dim: 32, seed: 7 });
    let first: Vec<_> = generator
        .generate(&elements, &factory)
        .collect::<anyhow::Result<Vec<_>>>()
        .expect("generate");
    let second: Vec<_> = generator
        .generate(&elements, &factory)
        .collect::<anyhow::Result<Vec<_>>>()
        .expect("generate again");

    let v1 = first[0].vector().expect("vector");
    let v2 = second[0].vector().expect("vector");
    assert_eq!(v1.len(), 32);
    assert_eq!(v1, v2, "same bytes, same seed, same descriptor");

    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-3, "unit norm, got {norm}");
}

#[test]
fn hashed_content_has_no_pretraining_capability() {
    let mut generator = HashedContentGenerator::new(HashedContentConfig::default());
    assert!(generator.pretrainer().is_none());
}

#[test]
fn mean_centered_requires_a_model_before_generation() {
    let tmp = TempDir::new().expect("tempdir");
    let elements = vec![element(&tmp, "a.txt", "payload")];
    let factory = MemoryDescriptorFactory::new();

    let generator =
        MeanCenteredHashGenerator::new(MeanCenteredConfig::default()).expect("construct");
    assert!(!generator.has_model());

    let result: anyhow::Result<Vec<_>> = generator.generate(&elements, &factory).collect();
    assert!(result.is_err(), "generation without a model fails");
}

#[test]
fn pretraining_centers_descriptors_and_persists_the_model() {
    let tmp = TempDir::new().expect("tempdir");
    let model_path = tmp.path().join("models").join("mean.json");

    let mut data_set = MemoryDataSet::new();
    data_set
        .add(element(&tmp, "a.txt", "alpha alpha alpha"))
        .expect("add");
    data_set
        .add(element(&tmp, "b.txt", "bravo bravo"))
        .expect("add");

    let config = MeanCenteredConfig {
        dim: 16,
        seed: 3,
        model_path: Some(model_path.clone()),
    };
    let mut generator = MeanCenteredHashGenerator::new(config.clone()).expect("construct");

    let pretrainer = generator.pretrainer().expect("pretraining supported");
    pretrainer.pretrain(&data_set).expect("pretrain");
    assert!(model_path.is_file(), "model written to disk");

    let factory = MemoryDescriptorFactory::new();
    let elements = data_set.elements();
    let descriptors: Vec<_> = generator
        .generate(&elements, &factory)
        .collect::<anyhow::Result<Vec<_>>>()
        .expect("generate");
    assert_eq!(descriptors.len(), 2);

    // Centered on the dataset mean: per-dimension sum over the dataset is ~0.
    let v1 = descriptors[0].vector().expect("vector");
    let v2 = descriptors[1].vector().expect("vector");
    for (a, b) in v1.iter().zip(&v2) {
        assert!((a + b).abs() < 1e-4, "dimension sum {a} + {b} not centered");
    }

    // A fresh generator reloads the persisted model and works immediately.
    let reloaded = MeanCenteredHashGenerator::new(config).expect("reload");
    assert!(reloaded.has_model());
    let again: Vec<_> = reloaded
        .generate(&elements, &factory)
        .collect::<anyhow::Result<Vec<_>>>()
        .expect("generate from reloaded model");
    assert_eq!(again[0].vector(), descriptors[0].vector());
}

#[test]
fn model_with_wrong_dimension_is_rejected_at_construction() {
    let tmp = TempDir::new().expect("tempdir");
    let model_path = tmp.path().join("mean.json");
    fs::write(&model_path, r#"{ "dim": 8, "mean": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0] }"#)
        .expect("write model");

    let config = MeanCenteredConfig {
        dim: 16,
        seed: 0,
        model_path: Some(model_path),
    };
    assert!(MeanCenteredHashGenerator::new(config).is_err());
}
