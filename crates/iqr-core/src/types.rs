//! Domain types shared across the pipeline crates.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;
use serde_json::{Map, Value};

/// Immutable handle to one source file. The pipeline never writes through a
/// data element; the type exposes no mutation API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataElement {
    path: PathBuf,
}

impl DataElement {
    /// Wrap an existing regular file. The path is canonicalized up front so
    /// that element identity is the resolved absolute path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self {
            path: fs::canonicalize(path)?,
        })
    }

    /// Element identity: the resolved absolute path as a string.
    pub fn id(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// Configuration fragment selecting one concrete plugin implementation:
/// `{ "type": "<name>", "<name>": { ...constructor parameters... } }`.
///
/// The parameter block sits under the implementation's own name so a single
/// document can carry blocks for several implementations while `type` picks
/// which one is live.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginSpec {
    #[serde(rename = "type")]
    pub impl_name: String,
    #[serde(flatten)]
    blocks: BTreeMap<String, Value>,
}

impl PluginSpec {
    pub fn new(impl_name: &str, params: Value) -> Self {
        let mut blocks = BTreeMap::new();
        blocks.insert(impl_name.to_string(), params);
        Self {
            impl_name: impl_name.to_string(),
            blocks,
        }
    }

    /// Constructor parameters for the selected implementation. An omitted
    /// block means all-defaults, returned as an empty object.
    pub fn params(&self) -> Value {
        self.blocks
            .get(&self.impl_name)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}
