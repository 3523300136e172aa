//! Image extraction into the project's image directory.

use std::fs;
use std::path::Path;

use image::ImageFormat;
use serde::Serialize;

use crate::error::Result;
use crate::model::{detect_mime_type, Document};

use super::context::ProjectLayout;

/// Outcome of extracting one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// The file was written
    Extracted,
    /// The payload could not be decoded or written
    Failed(String),
    /// The relationship has no payload in the package
    Missing,
}

/// One image relationship and what became of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    /// Zero-based identifier in relationship-table order
    pub id: usize,
    /// Relationship ID (e.g., "rId7")
    pub rel_id: String,
    /// File name under the images directory (e.g., "image0.png")
    pub file_name: String,
    /// Extraction outcome
    pub status: ExtractionStatus,
}

impl ResourceEntry {
    /// Check if the image was written.
    pub fn is_extracted(&self) -> bool {
        self.status == ExtractionStatus::Extracted
    }
}

/// Remove `image<N>.png` files left over from an earlier run.
///
/// Returns the number of files removed.
pub fn clear_stale_images(images_dir: &Path) -> Result<usize> {
    if !images_dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(images_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if is_generated_image_name(&name.to_string_lossy()) && entry.path().is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    if removed > 0 {
        log::debug!("Removed {} stale images from {}", removed, images_dir.display());
    }
    Ok(removed)
}

fn is_generated_image_name(name: &str) -> bool {
    name.strip_prefix("image")
        .and_then(|rest| rest.strip_suffix(".png"))
        .is_some_and(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

/// Write every image relationship of the document to the images directory.
///
/// Identifiers follow relationship-table order. A failing image is logged
/// and recorded; it never aborts the run.
pub fn extract_images(
    document: &Document,
    layout: &ProjectLayout,
    transcode: bool,
) -> Result<Vec<ResourceEntry>> {
    fs::create_dir_all(&layout.images_dir)?;
    clear_stale_images(&layout.images_dir)?;

    let mut entries = Vec::new();
    for (id, rel) in document.image_relationships().enumerate() {
        let file_name = ProjectLayout::image_file_name(id);
        let path = layout.image_path(id);

        let status = match rel.data.as_deref() {
            None => {
                log::warn!(
                    "Image {} ({} -> {}) has no payload; skipping {}",
                    id,
                    rel.id,
                    rel.target,
                    file_name
                );
                ExtractionStatus::Missing
            }
            Some(data) => match write_image(data, &path, transcode) {
                Ok(()) => {
                    log::debug!("Extracted {} from {}", file_name, rel.target);
                    ExtractionStatus::Extracted
                }
                Err(e) => {
                    log::warn!("Failed to extract image {} ({}): {}", id, rel.target, e);
                    discard_partial(&path);
                    ExtractionStatus::Failed(e.to_string())
                }
            },
        };

        entries.push(ResourceEntry {
            id,
            rel_id: rel.id.clone(),
            file_name,
            status,
        });
    }

    Ok(entries)
}

/// Write a payload as PNG, transcoding other raster formats when asked.
pub fn write_image(data: &[u8], path: &Path, transcode: bool) -> Result<()> {
    if !transcode || detect_mime_type(data) == Some("image/png") {
        fs::write(path, data)?;
        return Ok(());
    }

    let decoded = image::load_from_memory(data)?;
    decoded.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

fn discard_partial(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Could not remove partial file {}: {}", path.display(), e);
        }
    }
}
