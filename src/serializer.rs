//! Canvas Serializer - Object Model to Project JSON
//!
//! Pure transformations: no I/O, no clock, no id generation. Callers pass in
//! identifiers and timestamps so the output is reproducible in tests.

use base64::Engine;
use serde::Serialize;

use crate::beds::PrintBedProfile;
use crate::canvas::{CanvasObject, ImageObject};
use crate::generator::GeneratorError;
use crate::print::PrintQuality;
use crate::units::mm_to_internal;
use crate::validation::probe_dimensions;

/// Object schema version expected by the desktop application
pub const SCHEMA_VERSION: &str = "5.3.0";

/// Project-info document version
pub const PROJECT_INFO_VERSION: &str = "1.0.0";

/// Fixed id of the canvas element inside the canvas document
pub const CANVAS_ELEMENT_ID: &str = "canvas";

/// Added to image left/top after conversion. The application offsets images
/// by one internal unit; other object kinds have not been verified.
pub const IMAGE_PLACEMENT_CORRECTION: i64 = 1;

/// Schema fields the application requires on every image but that carry no
/// meaning for generated projects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStyle {
    pub fill: &'static str,
    pub stroke: Option<&'static str>,
    pub stroke_width: u32,
    pub stroke_dash_array: Option<&'static [u32]>,
    pub stroke_line_cap: &'static str,
    pub stroke_dash_offset: u32,
    pub stroke_line_join: &'static str,
    pub stroke_uniform: bool,
    pub stroke_miter_limit: u32,
    pub shadow: Option<&'static str>,
    pub background_color: &'static str,
    pub fill_rule: &'static str,
    pub paint_first: &'static str,
    pub global_composite_operation: &'static str,
    pub skew_x: u32,
    pub skew_y: u32,
    pub crop_x: u32,
    pub crop_y: u32,
    pub cross_origin: Option<&'static str>,
    pub filters: &'static [&'static str],
    pub selectable: bool,
    pub evented: bool,
    pub has_controls: bool,
}

pub const IMAGE_STYLE_DEFAULTS: ImageStyle = ImageStyle {
    fill: "rgb(0,0,0)",
    stroke: None,
    stroke_width: 0,
    stroke_dash_array: None,
    stroke_line_cap: "butt",
    stroke_dash_offset: 0,
    stroke_line_join: "miter",
    stroke_uniform: false,
    stroke_miter_limit: 4,
    shadow: None,
    background_color: "",
    fill_rule: "nonzero",
    paint_first: "fill",
    global_composite_operation: "source-over",
    skew_x: 0,
    skew_y: 0,
    crop_x: 0,
    crop_y: 0,
    cross_origin: None,
    filters: &[],
    selectable: true,
    evented: true,
    has_controls: true,
};

/// One image entry in the canvas document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub version: &'static str,
    pub id: String,
    pub src: String,
    pub origin_x: &'static str,
    pub origin_y: &'static str,
    pub left: i64,
    pub top: i64,
    pub width: u32,
    pub height: u32,
    pub scale_x: i64,
    pub scale_y: i64,
    pub angle: f64,
    pub flip_x: bool,
    pub flip_y: bool,
    pub opacity: f64,
    pub visible: bool,
    pub sub_print_model: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_layer_num: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_layer_num: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub varnish_layer_num: Option<u32>,
    pub layer_name: String,
    pub lock: bool,
    pub skip_print: bool,
    #[serde(flatten)]
    pub style: ImageStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanvasElement {
    Image(ImageElement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasDocument {
    pub version: &'static str,
    pub objects: Vec<CanvasElement>,
    pub id: &'static str,
    pub selection: bool,
}

/// Convert one canvas object. Every kind needs its own arm here.
pub fn convert_object(
    object: &CanvasObject,
    profile: &PrintBedProfile,
    id: String,
) -> Result<CanvasElement, GeneratorError> {
    match object {
        CanvasObject::Image(image) => convert_image(image, profile, id).map(CanvasElement::Image),
    }
}

fn convert_image(
    image: &ImageObject,
    profile: &PrintBedProfile,
    id: String,
) -> Result<ImageElement, GeneratorError> {
    let (pixel_width, pixel_height) = probe_dimensions(&image.bytes, image.mime)?;
    let p = &image.placement;

    let left = profile.zero_point.x - mm_to_internal(p.x_mm + p.width_mm) + IMAGE_PLACEMENT_CORRECTION;
    let top = profile.zero_point.y - mm_to_internal(p.y_mm + p.height_mm) + IMAGE_PLACEMENT_CORRECTION;
    let scale_x = mm_to_internal(p.width_mm / pixel_width as f64);
    let scale_y = mm_to_internal(p.height_mm / pixel_height as f64);

    Ok(ImageElement {
        kind: "image",
        version: SCHEMA_VERSION,
        id,
        src: data_url(image),
        origin_x: "left",
        origin_y: "top",
        left,
        top,
        width: pixel_width,
        height: pixel_height,
        scale_x,
        scale_y,
        angle: image.angle,
        flip_x: image.flip_x,
        flip_y: image.flip_y,
        opacity: image.opacity,
        visible: image.visible,
        sub_print_model: image.ink_mode.code(),
        white_layer_num: image.layers.white,
        color_layer_num: image.layers.cmyk,
        varnish_layer_num: image.layers.gloss,
        layer_name: image.layer_name.clone(),
        lock: image.lock,
        skip_print: image.skip_print,
        style: IMAGE_STYLE_DEFAULTS,
    })
}

fn data_url(image: &ImageObject) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
    format!("data:{};base64,{}", image.mime.as_str(), encoded)
}

/// Assemble the canvas document. `next_id` is called once per object, in order.
pub fn build_canvas_document<'a, I, F>(
    objects: I,
    profile: &PrintBedProfile,
    mut next_id: F,
) -> Result<CanvasDocument, GeneratorError>
where
    I: IntoIterator<Item = &'a CanvasObject>,
    F: FnMut() -> String,
{
    let objects = objects
        .into_iter()
        .map(|object| convert_object(object, profile, next_id()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CanvasDocument {
        version: SCHEMA_VERSION,
        objects,
        id: CANVAS_ELEMENT_ID,
        selection: true,
    })
}

// --- Project info ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSize {
    pub width: i64,
    pub height: i64,
}

/// Print parameters, embedded as a JSON string in the canvas descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintParam {
    pub quality: u8,
    pub format_size: FormatSize,
    pub base_map_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasDescriptor {
    pub canvas_id: String,
    pub canvas_file: String,
    pub base_map_name: &'static str,
    pub base_map_width: i64,
    pub base_map_height: i64,
    pub category: u32,
    pub sub_category: u32,
    pub is_standard_product: bool,
    pub create_time: i64,
    pub update_time: i64,
    pub print_param: String,
    pub thumbnail: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfoBlock {
    pub project_id: String,
    pub name: String,
    pub is_edited: bool,
    pub is_published: bool,
    pub create_time: i64,
    pub update_time: i64,
    pub cover_image: &'static str,
    pub description: &'static str,
    pub tags: Vec<String>,
    pub source: &'static str,
    pub template_id: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfoDocument {
    pub version: &'static str,
    pub canvases: Vec<CanvasDescriptor>,
    pub project_info: ProjectInfoBlock,
}

/// Inputs for the project-info document
#[derive(Debug, Clone, Copy)]
pub struct ProjectIdentity<'a> {
    pub canvas_id: &'a str,
    pub project_id: &'a str,
    pub name: &'a str,
    pub quality: PrintQuality,
    pub timestamp: i64,
}

pub fn build_project_info(
    identity: ProjectIdentity<'_>,
    profile: &PrintBedProfile,
) -> Result<ProjectInfoDocument, GeneratorError> {
    let [width_mm, height_mm] = profile.format_size_mm();
    let print_param = serde_json::to_string(&PrintParam {
        quality: identity.quality.code(),
        format_size: FormatSize { width: width_mm, height: height_mm },
        base_map_name: profile.base_map_name,
    })?;

    let canvas = CanvasDescriptor {
        canvas_id: identity.canvas_id.to_string(),
        canvas_file: crate::archive::canvas_entry_path(identity.canvas_id),
        base_map_name: profile.base_map_name,
        base_map_width: profile.base_map_width,
        base_map_height: profile.base_map_height,
        category: profile.category,
        sub_category: profile.sub_category,
        is_standard_product: profile.is_standard_product,
        create_time: identity.timestamp,
        update_time: identity.timestamp,
        print_param,
        thumbnail: "",
    };

    Ok(ProjectInfoDocument {
        version: PROJECT_INFO_VERSION,
        canvases: vec![canvas],
        project_info: ProjectInfoBlock {
            project_id: identity.project_id.to_string(),
            name: identity.name.to_string(),
            is_edited: true,
            is_published: false,
            create_time: identity.timestamp,
            update_time: identity.timestamp,
            cover_image: "",
            description: "",
            tags: Vec::new(),
            source: "",
            template_id: "",
        },
    })
}
