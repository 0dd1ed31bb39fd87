use std::path::Path;

use tracing::{debug, warn};

use iqr_core::config::expand_pattern;
use iqr_core::error::{Error, Phase, Result};
use iqr_core::traits::DataSet;
use iqr_core::types::DataElement;

/// Expand each pattern and insert one read-only data element per matched
/// regular file. A pattern naming an existing file is inserted directly;
/// anything else is treated as a shell glob. Duplicate matches across
/// patterns are inserted again; collapsing them is the dataset's own
/// business. Patterns matching nothing are skipped with a warning.
pub fn ingest(data_set: &mut dyn DataSet, patterns: &[String]) -> Result<usize> {
    let mut inserted = 0usize;
    for raw in patterns {
        let pattern = expand_pattern(raw);
        let path = Path::new(&pattern);
        if path.is_file() {
            insert(data_set, path)?;
            inserted += 1;
            continue;
        }
        debug!(pattern = %pattern, "expanding glob");
        let matches = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(pattern = %raw, error = %e, "invalid glob pattern, skipping");
                continue;
            }
        };
        let mut matched = 0usize;
        for entry in matches {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!(error = %e, "unreadable glob match, skipping");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            insert(data_set, &path)?;
            inserted += 1;
            matched += 1;
        }
        if matched == 0 {
            warn!(pattern = %raw, "pattern matched no files");
        }
    }
    Ok(inserted)
}

fn insert(data_set: &mut dyn DataSet, path: &Path) -> Result<()> {
    let element = DataElement::from_file(path)
        .map_err(|e| Error::phase(Phase::Ingest, anyhow::anyhow!("{}: {}", path.display(), e)))?;
    data_set
        .add(element)
        .map_err(|e| Error::phase(Phase::Ingest, e))
}
