//! Configuration - Project Settings and Job Files
//!
//! A job file describes one complete export:
//!
//! ```json
//! {
//!   "project": { "bed": "miniFlatbed", "name": "Coasters" },
//!   "images": [
//!     { "path": "logo.png", "x": 100, "y": 50, "width": 50, "height": 50, "inkMode": "gloss" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::beds::PrintBed;
use crate::canvas::{ImageOptions, Placement};
use crate::generator::{GeneratorError, ProjectGenerator};
use crate::print::PrintQuality;

pub const DEFAULT_PROJECT_NAME: &str = "Untitled Design";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub bed: PrintBed,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default)]
    pub quality: PrintQuality,
}

fn default_name() -> String { DEFAULT_PROJECT_NAME.to_string() }
fn default_background() -> String { DEFAULT_BACKGROUND_COLOR.to_string() }

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            bed: PrintBed::default(),
            name: default_name(),
            background_color: default_background(),
            quality: PrintQuality::default(),
        }
    }
}

/// One image placement inside a job file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageJob {
    pub path: PathBuf,
    #[serde(flatten)]
    pub placement: Placement,
    #[serde(flatten)]
    pub options: ImageOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub images: Vec<ImageJob>,
}

impl JobFile {
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path)?;
        let job = serde_json::from_str(&content)?;
        Ok(job)
    }

    /// Build a generator with every image added. Relative image paths
    /// resolve against `base_dir`.
    pub fn into_generator(self, base_dir: &Path) -> Result<ProjectGenerator, GeneratorError> {
        let mut generator = ProjectGenerator::new(self.project);
        for image in self.images {
            let path = if image.path.is_absolute() {
                image.path
            } else {
                base_dir.join(&image.path)
            };
            let bytes = fs::read(&path).map_err(|e| {
                GeneratorError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
            })?;
            generator.add_image(bytes, image.placement, image.options)?;
        }
        Ok(generator)
    }
}
