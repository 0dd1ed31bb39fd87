//! Explicit plugin registry: one registry per capability interface,
//! constructed and populated by the caller. No process-global state, so tests
//! control exactly what is registered.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::PluginSpec;

type UsableFn = Box<dyn Fn() -> bool + Send + Sync>;
type ConstructFn<T> = Box<dyn Fn(&Value) -> anyhow::Result<Box<T>> + Send + Sync>;

struct Entry<T: ?Sized> {
    usable: UsableFn,
    construct: ConstructFn<T>,
}

/// Registry of known implementations for one capability interface `T`
/// (a `dyn` trait), each paired with a usability check and a constructor
/// taking its JSON parameter block.
pub struct PluginRegistry<T: ?Sized> {
    capability: &'static str,
    entries: BTreeMap<String, Entry<T>>,
}

impl<T: ?Sized> PluginRegistry<T> {
    pub fn new(capability: &'static str) -> Self {
        Self {
            capability,
            entries: BTreeMap::new(),
        }
    }

    /// Register one implementation. `usable` reports whether it can run in
    /// the current environment (required native libraries present, etc.);
    /// unusable implementations stay registered but are hidden from listings.
    pub fn register<U, C>(&mut self, name: &str, usable: U, construct: C)
    where
        U: Fn() -> bool + Send + Sync + 'static,
        C: Fn(&Value) -> anyhow::Result<Box<T>> + Send + Sync + 'static,
    {
        self.entries.insert(
            name.to_string(),
            Entry {
                usable: Box::new(usable),
                construct: Box::new(construct),
            },
        );
    }

    /// Names of the implementations usable right now.
    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| (entry.usable)())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Instantiate the implementation `spec` selects, constructed with its
    /// parameter block. No I/O happens here beyond what the implementation's
    /// own constructor performs.
    pub fn instantiate(&self, spec: &PluginSpec) -> Result<Box<T>> {
        let entry = self.entries.get(&spec.impl_name).ok_or_else(|| {
            Error::PluginInstantiation(format!(
                "no {} implementation named '{}' (available: {})",
                self.capability,
                spec.impl_name,
                self.names().join(", ")
            ))
        })?;
        if !(entry.usable)() {
            return Err(Error::PluginInstantiation(format!(
                "{} implementation '{}' is not usable in this environment",
                self.capability, spec.impl_name
            )));
        }
        (entry.construct)(&spec.params()).map_err(|e| {
            Error::PluginInstantiation(format!(
                "constructing {} implementation '{}': {e:#}",
                self.capability, spec.impl_name
            ))
        })
    }
}
