//! Bundle Writer: persist a Bundle as one JSON document and/or one file
//! per contained resource.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use fhirbridge_core::Bundle;

use crate::Result;

/// Write the whole Bundle as a pretty-printed JSON document.
pub fn write_bundle(bundle: &Bundle, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), bundle)?;
    tracing::info!(path = %path.as_ref().display(), entries = bundle.len(), "wrote Bundle");
    Ok(())
}

/// Write one JSON file per Bundle entry into `dir`, creating it if needed.
///
/// Files are named `<resourcetype>_<n>.json` with a 1-based index, e.g.
/// `patient_1.json`. Returns the written paths in entry order.
pub fn write_resources(bundle: &Bundle, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(bundle.len());
    for (index, resource) in bundle.resources().enumerate() {
        let kind = resource
            .get("resourceType")
            .and_then(|v| v.as_str())
            .unwrap_or("resource")
            .to_lowercase();
        let path = dir.join(format!("{}_{}.json", kind, index + 1));
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), resource)?;
        paths.push(path);
    }

    tracing::info!(dir = %dir.display(), files = paths.len(), "wrote individual resources");
    Ok(paths)
}
