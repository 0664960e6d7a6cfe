//! Archive Assembler - Zip Container Packaging
//!
//! Entry paths are fixed by the desktop application and must match exactly.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

pub const FONT_MAPPING_PATH: &str = "Asset/font/font_mapping.json";
pub const PROJECT_INFO_PATH: &str = "Metadata/project_info.json";
pub const EMPTY_FONT_MAPPING: &str = "{}";

/// Path of the canvas document for a canvas id
pub fn canvas_entry_path(canvas_id: &str) -> String {
    format!("Asset/project_file/canvas_{}.json", canvas_id)
}

/// A named blob inside the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self { path: path.into(), data: data.into() }
    }
}

/// Pack entries into an in-memory zip
pub fn pack(entries: &[ArchiveEntry]) -> zip::result::ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for entry in entries {
        writer.start_file(entry.path.as_str(), options)?;
        writer.write_all(&entry.data)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Write archive bytes to disk
pub fn write_archive(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(path, bytes)
}

/// Summary of one archive entry
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EntryInfo {
    pub name: String,
    pub size: u64,
}

/// List entries of an archive in stored order
pub fn list_entries(bytes: &[u8]) -> zip::result::ZipResult<Vec<EntryInfo>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let file = archive.by_index(i)?;
        entries.push(EntryInfo {
            name: file.name().to_string(),
            size: file.size(),
        });
    }
    Ok(entries)
}

/// Read a single entry as bytes
pub fn read_entry(bytes: &[u8], name: &str) -> zip::result::ZipResult<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut file = archive.by_name(name)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}
