//! Canvas Object Model
//!
//! Objects hold raw millimeter placement plus fully resolved print options.
//! They are built once by `ImageObject::new` and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::generator::GeneratorError;
use crate::print::{InkMode, LayerCounts};
use crate::validation::{sniff_mime, ImageMime};

pub const DEFAULT_LAYER_NAME: &str = "Image Layer";

/// Largest placement magnitude accepted, in millimeters. Keeps every
/// converted coordinate (and the sum of corner plus size) well inside `i64`.
pub const MAX_PLACEMENT_MM: f64 = 1.0e9;

/// Placement rectangle in millimeters, anchored at its bottom-right corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(rename = "x")]
    pub x_mm: f64,
    #[serde(rename = "y")]
    pub y_mm: f64,
    #[serde(rename = "width")]
    pub width_mm: f64,
    #[serde(rename = "height")]
    pub height_mm: f64,
}

impl Placement {
    pub fn new(x_mm: f64, y_mm: f64, width_mm: f64, height_mm: f64) -> Self {
        Self { x_mm, y_mm, width_mm, height_mm }
    }

    fn check(&self) -> Result<(), GeneratorError> {
        let all = [self.x_mm, self.y_mm, self.width_mm, self.height_mm];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(GeneratorError::InvalidInput(
                "Placement values must be finite".to_string(),
            ));
        }
        if self.width_mm <= 0.0 || self.height_mm <= 0.0 {
            return Err(GeneratorError::InvalidInput(format!(
                "Placement size must be positive, got {}x{} mm",
                self.width_mm, self.height_mm
            )));
        }
        if all.iter().any(|v| v.abs() > MAX_PLACEMENT_MM) {
            return Err(GeneratorError::InvalidInput(format!(
                "Placement values must be within +/-{} mm",
                MAX_PLACEMENT_MM
            )));
        }
        Ok(())
    }
}

/// Caller-supplied image options. Unset fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    #[serde(default)]
    pub ink_mode: Option<InkMode>,
    #[serde(default)]
    pub white_layers: Option<u32>,
    #[serde(default)]
    pub cmyk_layers: Option<u32>,
    #[serde(default)]
    pub gloss_layers: Option<u32>,
    #[serde(default)]
    pub angle: Option<f64>,
    #[serde(default)]
    pub flip_x: Option<bool>,
    #[serde(default)]
    pub flip_y: Option<bool>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub layer_name: Option<String>,
    #[serde(default)]
    pub lock: Option<bool>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub skip_print: Option<bool>,
}

/// Object kind tag. `Rect` is known to the file format but has no
/// conversion rule yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Image,
    Rect,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Image => f.write_str("image"),
            ObjectKind::Rect => f.write_str("rect"),
        }
    }
}

/// A placed image with every option resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ImageObject {
    pub bytes: Vec<u8>,
    pub mime: ImageMime,
    pub placement: Placement,
    pub ink_mode: InkMode,
    pub layers: LayerCounts,
    pub angle: f64,
    pub flip_x: bool,
    pub flip_y: bool,
    pub opacity: f64,
    pub layer_name: String,
    pub lock: bool,
    pub visible: bool,
    pub skip_print: bool,
}

impl ImageObject {
    /// Validate inputs and apply defaults. Nothing is retained on failure.
    pub fn new(
        bytes: Vec<u8>,
        placement: Placement,
        options: ImageOptions,
    ) -> Result<Self, GeneratorError> {
        let mime = sniff_mime(&bytes)?;
        placement.check()?;

        let ink_mode = options.ink_mode.unwrap_or_default();
        let layers = LayerCounts::resolve(
            ink_mode,
            options.white_layers,
            options.cmyk_layers,
            options.gloss_layers,
        )?;

        let angle = options.angle.unwrap_or(0.0);
        if !angle.is_finite() {
            return Err(GeneratorError::InvalidInput("Angle must be finite".to_string()));
        }
        let opacity = options.opacity.unwrap_or(1.0);
        if !(0.0..=1.0).contains(&opacity) {
            return Err(GeneratorError::InvalidInput(format!(
                "Opacity must be between 0 and 1, got {}",
                opacity
            )));
        }

        Ok(Self {
            bytes,
            mime,
            placement,
            ink_mode,
            layers,
            angle,
            flip_x: options.flip_x.unwrap_or(false),
            flip_y: options.flip_y.unwrap_or(false),
            opacity,
            layer_name: options
                .layer_name
                .unwrap_or_else(|| DEFAULT_LAYER_NAME.to_string()),
            lock: options.lock.unwrap_or(false),
            visible: options.visible.unwrap_or(true),
            skip_print: options.skip_print.unwrap_or(false),
        })
    }
}

/// Everything that can be placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasObject {
    Image(ImageObject),
}

impl CanvasObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            CanvasObject::Image(_) => ObjectKind::Image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal 1x1 RGBA PNG
    const PIXEL_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A,
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
        0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
        0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41,
        0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
        0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
        0x42, 0x60, 0x82,
    ];

    fn placement() -> Placement {
        Placement::new(100.0, 50.0, 50.0, 50.0)
    }

    #[test]
    fn test_defaults_applied() {
        let obj = ImageObject::new(PIXEL_PNG.to_vec(), placement(), ImageOptions::default()).unwrap();
        assert_eq!(obj.mime, ImageMime::Png);
        assert_eq!(obj.ink_mode, InkMode::WhiteCmyk);
        assert_eq!(obj.layers.white, Some(1));
        assert_eq!(obj.layers.cmyk, Some(1));
        assert_eq!(obj.layers.gloss, None);
        assert_eq!(obj.angle, 0.0);
        assert!(!obj.flip_x && !obj.flip_y);
        assert_eq!(obj.opacity, 1.0);
        assert_eq!(obj.layer_name, "Image Layer");
        assert!(!obj.lock);
        assert!(obj.visible);
        assert!(!obj.skip_print);
    }

    #[test]
    fn test_explicit_options_kept() {
        let options = ImageOptions {
            ink_mode: Some(InkMode::CmykGloss),
            gloss_layers: Some(4),
            angle: Some(45.0),
            flip_x: Some(true),
            opacity: Some(0.5),
            layer_name: Some("Logo".to_string()),
            lock: Some(true),
            visible: Some(false),
            skip_print: Some(true),
            ..Default::default()
        };
        let obj = ImageObject::new(PIXEL_PNG.to_vec(), placement(), options).unwrap();
        assert_eq!(obj.layers.white, None);
        assert_eq!(obj.layers.cmyk, Some(1));
        assert_eq!(obj.layers.gloss, Some(4));
        assert_eq!(obj.angle, 45.0);
        assert!(obj.flip_x);
        assert!(!obj.flip_y);
        assert_eq!(obj.opacity, 0.5);
        assert_eq!(obj.layer_name, "Logo");
        assert!(obj.lock && !obj.visible && obj.skip_print);
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let result = ImageObject::new(
            PIXEL_PNG.to_vec(),
            Placement::new(0.0, 0.0, 0.0, 10.0),
            ImageOptions::default(),
        );
        assert!(matches!(result, Err(GeneratorError::InvalidInput(_))));
    }

    #[test]
    fn test_nan_placement_rejected() {
        let result = ImageObject::new(
            PIXEL_PNG.to_vec(),
            Placement::new(f64::NAN, 0.0, 10.0, 10.0),
            ImageOptions::default(),
        );
        assert!(matches!(result, Err(GeneratorError::InvalidInput(_))));
    }

    #[test]
    fn test_far_out_placement_rejected() {
        for placement in [
            Placement::new(-1e16, 0.0, 10.0, 10.0),
            Placement::new(0.0, 1e16, 10.0, 10.0),
            Placement::new(0.0, 0.0, 1e16, 10.0),
        ] {
            let result = ImageObject::new(PIXEL_PNG.to_vec(), placement, ImageOptions::default());
            assert!(matches!(result, Err(GeneratorError::InvalidInput(_))), "{:?}", placement);
        }
    }

    #[test]
    fn test_negative_placement_within_range_accepted() {
        let placement = Placement::new(-MAX_PLACEMENT_MM, -500.0, 10.0, 10.0);
        assert!(ImageObject::new(PIXEL_PNG.to_vec(), placement, ImageOptions::default()).is_ok());
    }

    #[test]
    fn test_opacity_out_of_range_rejected() {
        let options = ImageOptions { opacity: Some(1.5), ..Default::default() };
        let result = ImageObject::new(PIXEL_PNG.to_vec(), placement(), options);
        assert!(matches!(result, Err(GeneratorError::InvalidInput(_))));
    }

    #[test]
    fn test_unsupported_bytes_rejected() {
        let result = ImageObject::new(b"hello".to_vec(), placement(), ImageOptions::default());
        assert!(matches!(result, Err(GeneratorError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let options: ImageOptions = serde_json::from_str(
            r#"{"inkMode": "gloss", "glossLayers": 2, "flipY": true, "skipPrint": true}"#,
        )
        .unwrap();
        assert_eq!(options.ink_mode, Some(InkMode::Gloss));
        assert_eq!(options.gloss_layers, Some(2));
        assert_eq!(options.flip_y, Some(true));
        assert_eq!(options.skip_print, Some(true));
        assert_eq!(options.white_layers, None);
    }

    #[test]
    fn test_kind_tag() {
        let obj = ImageObject::new(PIXEL_PNG.to_vec(), placement(), ImageOptions::default()).unwrap();
        assert_eq!(CanvasObject::Image(obj).kind(), ObjectKind::Image);
        assert_eq!(ObjectKind::Rect.to_string(), "rect");
    }
}
