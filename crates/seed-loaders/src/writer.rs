/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! TOML persistence for the seed file.

use chrono::Utc;
use seed_core::types::{SeedEntry, SeedFile};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::SeedResult;
use crate::traits::SeedWriter;

/// Writes entries as a `[[currencies]]` array of tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlSeedWriter;

impl TomlSeedWriter {
  pub fn new() -> Self {
    Self
  }

  /// Render the document without touching the filesystem.
  pub fn render(entries: &[SeedEntry]) -> SeedResult<String> {
    let document = SeedFile { currencies: entries.to_vec() };
    let body = toml::to_string_pretty(&document)?;
    Ok(format!(
      "# Generated by `seed prefetch` at {}\n# Replace every CHANGEME value before importing.\n\n{}",
      Utc::now().to_rfc3339(),
      body
    ))
  }
}

impl SeedWriter for TomlSeedWriter {
  fn write(&self, path: &Path, entries: &[SeedEntry]) -> SeedResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent)?;
    }

    fs::write(path, Self::render(entries)?)?;
    info!("Wrote {} seed entries to {}", entries.len(), path.display());
    Ok(())
  }
}

/// Load a seed file written by [`TomlSeedWriter`].
pub fn read_seed_file(path: &Path) -> SeedResult<Vec<SeedEntry>> {
  let contents = fs::read_to_string(path)?;
  let document: SeedFile = toml::from_str(&contents)?;
  Ok(document.currencies)
}
