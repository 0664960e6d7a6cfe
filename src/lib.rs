//! UV Project Core - Project Archive Builder for UV Flatbed Printers
//!
//! Places images on a virtual print bed in millimeters, converts them into
//! the desktop application's internal units and canvas schema, and packs the
//! result into a project archive.
//!
//! ```no_run
//! use uvproject_core::{ProjectGenerator, Placement, ImageOptions};
//!
//! let mut generator = ProjectGenerator::default();
//! let logo = std::fs::read("logo.png")?;
//! generator.add_image(logo, Placement::new(100.0, 50.0, 50.0, 50.0), ImageOptions::default())?;
//! generator.export("design.zip")?;
//! # Ok::<(), uvproject_core::GeneratorError>(())
//! ```

pub mod units;
pub mod beds;
pub mod print;
pub mod validation;
pub mod canvas;
pub mod serializer;
pub mod archive;
pub mod hashing;
pub mod config;
pub mod generator;

pub use beds::{profile_for, PrintBed, PrintBedProfile};
pub use canvas::{CanvasObject, ImageObject, ImageOptions, ObjectKind, Placement};
pub use config::{JobFile, ProjectConfig};
pub use generator::{GeneratorError, ProjectGenerator};
pub use hashing::sha256_hex;
pub use print::{InkMode, LayerCounts, PrintQuality};
pub use units::{internal_to_mm, mm_to_internal, UNITS_PER_MM};
pub use validation::ImageMime;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
