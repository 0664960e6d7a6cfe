//! Project Generator - Single Entry Point
//!
//! Owns the bed selection, project identity and the ordered object list.
//! Insertion order is z-order and is preserved through export.

use chrono::Utc;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::archive::{
    self, canvas_entry_path, ArchiveEntry, EMPTY_FONT_MAPPING, FONT_MAPPING_PATH,
    PROJECT_INFO_PATH,
};
use crate::beds::{PrintBed, PrintBedProfile};
use crate::canvas::{CanvasObject, ImageObject, ImageOptions, ObjectKind, Placement};
use crate::config::ProjectConfig;
use crate::print::PrintQuality;
use crate::serializer::{
    build_canvas_document, build_project_info, CanvasDocument, ProjectIdentity,
    ProjectInfoDocument,
};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported canvas object kind: {0}")]
    UnsupportedKind(ObjectKind),

    #[error("Image probe failed: {0}")]
    ImageProbe(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds one project archive
#[derive(Debug)]
pub struct ProjectGenerator {
    bed: PrintBed,
    name: String,
    background_color: String,
    quality: PrintQuality,
    canvas_id: String,
    project_id: String,
    objects: Vec<CanvasObject>,
}

impl ProjectGenerator {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            bed: config.bed,
            name: config.name,
            background_color: config.background_color,
            quality: config.quality,
            canvas_id: Uuid::new_v4().to_string(),
            project_id: Uuid::new_v4().to_string(),
            objects: vec![],
        }
    }

    pub fn bed(&self) -> PrintBed {
        self.bed
    }

    pub fn profile(&self) -> &'static PrintBedProfile {
        self.bed.profile()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted and kept, but not written to any document yet
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    /// Add an image placed by its bottom-right corner.
    ///
    /// On error the object list is left unchanged.
    pub fn add_image(
        &mut self,
        bytes: impl Into<Vec<u8>>,
        placement: Placement,
        options: ImageOptions,
    ) -> Result<(), GeneratorError> {
        let image = ImageObject::new(bytes.into(), placement, options)?;
        tracing::debug!(
            mime = image.mime.as_str(),
            ink_mode = image.ink_mode.name(),
            white = ?image.layers.white,
            cmyk = ?image.layers.cmyk,
            gloss = ?image.layers.gloss,
            index = self.objects.len(),
            "image added"
        );
        self.objects.push(CanvasObject::Image(image));
        Ok(())
    }

    /// Build the canvas document with a fresh id per object
    pub fn canvas_document(&self) -> Result<CanvasDocument, GeneratorError> {
        build_canvas_document(&self.objects, self.profile(), || {
            Uuid::new_v4().to_string()
        })
    }

    /// Build the project-info document stamped with `timestamp` (seconds since epoch)
    pub fn project_info_document(
        &self,
        timestamp: i64,
    ) -> Result<ProjectInfoDocument, GeneratorError> {
        let identity = ProjectIdentity {
            canvas_id: &self.canvas_id,
            project_id: &self.project_id,
            name: &self.name,
            quality: self.quality,
            timestamp,
        };
        build_project_info(identity, self.profile())
    }

    /// Serialize the whole project to archive bytes
    pub fn archive_bytes(&self) -> Result<Vec<u8>, GeneratorError> {
        let canvas = serde_json::to_vec(&self.canvas_document()?)?;
        let info = serde_json::to_vec(&self.project_info_document(Utc::now().timestamp())?)?;

        let entries = [
            ArchiveEntry::new(FONT_MAPPING_PATH, EMPTY_FONT_MAPPING),
            ArchiveEntry::new(canvas_entry_path(&self.canvas_id), canvas),
            ArchiveEntry::new(PROJECT_INFO_PATH, info),
        ];
        Ok(archive::pack(&entries)?)
    }

    /// Write the project archive to `path`
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), GeneratorError> {
        let path = path.as_ref();
        let bytes = self.archive_bytes()?;
        archive::write_archive(path, &bytes)?;
        tracing::info!(
            path = %path.display(),
            bed = %self.bed,
            objects = self.objects.len(),
            bytes = bytes.len(),
            "project exported"
        );
        Ok(())
    }
}

impl Default for ProjectGenerator {
    fn default() -> Self {
        Self::new(ProjectConfig::default())
    }
}
