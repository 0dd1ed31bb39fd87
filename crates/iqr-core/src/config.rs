//! The two JSON configuration documents driving a pipeline run, plus path
//! expansion helpers for user-supplied patterns.
//!
//! The UI document names the tabs and each tab's dataset; the service
//! document names the descriptor factory, descriptor generator and
//! nearest-neighbor index. Both must load before anything else happens.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::PluginSpec;

/// Application ("tab") configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub iqr_tabs: BTreeMap<String, IqrTab>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IqrTab {
    pub data_set: PluginSpec,
}

/// Service ("plugin") configuration document, shared with the REST service
/// that later answers queries against the built index.
#[derive(Debug, Clone, Deserialize)]
pub struct IqrConfig {
    pub iqr_service: IqrService,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IqrService {
    pub plugins: ServicePlugins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServicePlugins {
    pub descriptor_factory: PluginSpec,
    pub descriptor_generator: PluginSpec,
    pub neighbor_index: PluginSpec,
}

impl UiConfig {
    /// Look up the named tab, failing fast with the list of known tabs. Runs
    /// strictly before any plugin instantiation.
    pub fn resolve_tab(&self, tab: &str) -> Result<&IqrTab> {
        self.iqr_tabs.get(tab).ok_or_else(|| {
            Error::ConfigValidation(format!(
                "unknown tab '{}'; available tabs: {}",
                tab,
                self.iqr_tabs.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })
    }
}

/// Load one JSON document. The failure comes back as a message rather than an
/// error type so the caller can attempt both documents before failing.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> std::result::Result<T, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Load both configuration documents, aggregating failures so one run reports
/// every unloadable document at once.
pub fn load_config_pair(ui_path: &Path, iqr_path: &Path) -> Result<(UiConfig, IqrConfig)> {
    let ui = load_document::<UiConfig>(ui_path);
    let iqr = load_document::<IqrConfig>(iqr_path);
    match (ui, iqr) {
        (Ok(ui), Ok(iqr)) => Ok((ui, iqr)),
        (ui, iqr) => {
            let failures: Vec<String> = [ui.err(), iqr.err()].into_iter().flatten().collect();
            Err(Error::ConfigLoad(failures.join("; ")))
        }
    }
}

/// Expand a leading `~` and `$VAR`/`${VAR}` references in a user-provided
/// path or glob pattern. Unknown variables leave the input untouched.
pub fn expand_pattern(input: &str) -> String {
    let expanded_env = shellexpand::env(input).unwrap_or(std::borrow::Cow::Borrowed(input));
    shellexpand::tilde(expanded_env.as_ref()).into_owned()
}
