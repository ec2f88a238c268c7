//! Catalog loading from JSON manifests

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

use super::{CatalogStore, ObjectSpec};
use crate::risk::RiskClassifier;

/// Root structure of a catalog manifest file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    #[serde(default)]
    pub generated_at: Option<String>,
    pub objects: Vec<ObjectSpec>,
}

/// Load a manifest from JSON, gunzipping when the path ends in `.gz`
pub fn load_manifest(path: impl AsRef<Path>) -> Result<CatalogManifest> {
    let path = path.as_ref();
    log::info!("Loading catalog manifest from {:?}", path);

    let file =
        File::open(path).with_context(|| format!("Failed to open catalog manifest: {:?}", path))?;
    let reader = BufReader::new(file);

    let gzipped = path.extension().is_some_and(|ext| ext == "gz");
    let reader: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(reader))
    } else {
        Box::new(reader)
    };

    let manifest: CatalogManifest = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse catalog manifest JSON: {:?}", path))?;

    log::info!(
        "Loaded {} manifest entries (generated at {})",
        manifest.objects.len(),
        manifest.generated_at.as_deref().unwrap_or("unknown")
    );

    Ok(manifest)
}

/// Seed missing risk levels, validate and register every entry.
///
/// Invalid entries are skipped with a warning; duplicate ids keep the first
/// registration.
pub fn build_catalog(
    specs: impl IntoIterator<Item = ObjectSpec>,
    classifier: &RiskClassifier,
) -> CatalogStore {
    let mut catalog = CatalogStore::new();
    let mut skipped = 0;
    let mut duplicates = 0;

    for spec in specs {
        let level = classifier.classify(&spec);
        match catalog.try_register(spec.into_object(level)) {
            Ok(true) => {}
            Ok(false) => duplicates += 1,
            Err(e) => {
                log::warn!("Skipping catalog entry: {}", e);
                skipped += 1;
            }
        }
    }

    log::info!(
        "Catalog ready: {} objects ({} invalid skipped, {} duplicates ignored)",
        catalog.len(),
        skipped,
        duplicates
    );
    catalog
}

/// Load a manifest file and build the catalog from it
pub fn load_catalog(path: impl AsRef<Path>, classifier: &RiskClassifier) -> Result<CatalogStore> {
    let manifest = load_manifest(path)?;
    Ok(build_catalog(manifest.objects, classifier))
}
