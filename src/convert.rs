//! Drives both pipelines over one archive.
//!
//! The archive, the scene document and the binary buffer are all loaded before the destination
//! directory is touched, so a run that fails at that stage writes nothing.  After that, each mesh
//! and texture is converted in memory and written with a single call; a failing item is logged
//! and recorded in the `Report` while the rest carry on.
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, error, info, warn};
use crate::archive::Archive;
use crate::config::{Config, MeshSlot, TextureMapping};
use crate::document::SceneDocument;
use crate::error::{Error, Result};
use crate::mesh;
use crate::obj;
use crate::texture;

#[derive(Debug)]
pub struct Failure {
    /// The output file name that could not be produced.
    pub item: String,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct Report {
    pub meshes_written: Vec<PathBuf>,
    pub textures_written: Vec<PathBuf>,
    /// Mesh positions configured as `MeshSlot::Skip`.
    pub skipped_slots: Vec<usize>,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).map_err(|source| Error::Io { path: path.to_owned(), source })
}

pub fn run(config: &Config) -> Result<Report> {
    let mut archive = Archive::open(&config.source_path)?;
    debug!("{}: {} entries", archive.path().display(), archive.entry_names().len());

    let doc = SceneDocument::from_slice(&archive.read_entry(&config.scene_entry)?)?;
    let buffer = archive.read_entry(&config.buffer_entry)?;
    info!("{}: {} meshes, {}-byte buffer",
        config.scene_entry, doc.mesh_count(), buffer.len());
    if config.mesh_slots.len() != doc.mesh_count() {
        warn!("{} mesh slots configured, but the scene has {} meshes",
            config.mesh_slots.len(), doc.mesh_count());
    }

    let dest = &config.destination_directory;
    fs::create_dir_all(dest).map_err(|source| Error::Io { path: dest.clone(), source })?;

    let mut report = Report::default();
    convert_meshes(config, &doc, &buffer, &mut report);
    convert_textures(config, &mut archive, &mut report);
    Ok(report)
}

fn convert_meshes(config: &Config, doc: &SceneDocument, buffer: &[u8], report: &mut Report) {
    for (index, slot) in config.mesh_slots.iter().enumerate() {
        let name = match slot {
            MeshSlot::Emit(name) => name,
            MeshSlot::Skip => {
                info!("mesh {}: skipped", index);
                report.skipped_slots.push(index);
                continue;
            },
        };
        let path = config.destination_directory.join(name);
        let res = mesh::extract_mesh(doc, buffer, index).and_then(|m| {
            write_file(&path, obj::to_obj_string(&m).as_bytes())?;
            Ok(m.tris.len())
        });
        match res {
            Ok(n) => {
                info!("mesh {} ({}): {} triangles -> {}",
                    index, doc.mesh_name(index).unwrap_or("unnamed"), n, path.display());
                report.meshes_written.push(path);
            },
            Err(e) => {
                error!("mesh {} -> {}: {}", index, name, e);
                report.failures.push(Failure { item: name.clone(), error: e });
            },
        }
    }
}

fn convert_textures<R>(config: &Config, archive: &mut Archive<R>, report: &mut Report)
where R: std::io::Read + std::io::Seek {
    for TextureMapping { source, destination } in &config.textures {
        let path = config.destination_directory.join(destination);
        let res = archive.read_entry(source)
            .and_then(|bytes| texture::normalize_texture(&bytes, config.max_texture_size))
            .and_then(|tga| write_file(&path, &tga));
        match res {
            Ok(()) => {
                info!("texture {} -> {}", source, path.display());
                report.textures_written.push(path);
            },
            Err(e) => {
                error!("texture {} -> {}: {}", source, destination, e);
                report.failures.push(Failure { item: destination.clone(), error: e });
            },
        }
    }
}
