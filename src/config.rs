use std::path::PathBuf;
use crate::texture;

/// What to do with the mesh at one position of the scene's mesh list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshSlot {
    /// Write the mesh to this file name in the destination directory.
    Emit(String),
    Skip,
}

impl MeshSlot {
    /// An empty name means `Skip`.
    pub fn from_name(name: &str) -> MeshSlot {
        if name.is_empty() {
            MeshSlot::Skip
        } else {
            MeshSlot::Emit(name.to_owned())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureMapping {
    /// Entry name inside the archive.
    pub source: String,
    /// File name in the destination directory.
    pub destination: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub source_path: PathBuf,
    pub destination_directory: PathBuf,
    /// Textures larger than this on either side are resized to `max_texture_size` squared.
    pub max_texture_size: u32,
    pub scene_entry: String,
    pub buffer_entry: String,
    /// Indexed by mesh position in the scene.
    pub mesh_slots: Vec<MeshSlot>,
    pub textures: Vec<TextureMapping>,
}

const VIOLET_MESHES: &[&str] = &[
    "face.obj",
    "weapon0.obj",
    "weapon1.obj",
    "headstar.obj",
    "bow.obj",
    "hair.obj",
    "skirt.obj",
    "body.obj",
];

const VIOLET_TEXTURES: &[(&str, &str)] = &[
    ("textures/1118_SunShangXiang_body_VeryHigh.002_baseColor.png", "body_diffuse.tga"),
    ("textures/1118_SunShangXiang_face_VeryHigh.002_baseColor.png", "face_diffuse.tga"),
    ("textures/1118_SunShangXiang_hair_VeryHigh.002_baseColor.png", "hair_diffuse.tga"),
    ("textures/1118_SunShangXiang_Weapon.002_baseColor.png", "weapon_diffuse.tga"),
];

impl Default for Config {
    /// The Violet model from Sketchfab
    /// (<https://sketchfab.com/3d-models/0c257bf4c4074cdaa05ad2fb55ceadb1>).
    fn default() -> Config {
        Config {
            source_path: PathBuf::from("violet_arena_of_valor_3d_model.zip"),
            destination_directory: PathBuf::from("../assets/violet"),
            max_texture_size: texture::DEFAULT_MAX_SIZE,
            scene_entry: "scene.gltf".into(),
            buffer_entry: "scene.bin".into(),
            mesh_slots: VIOLET_MESHES.iter().map(|n| MeshSlot::from_name(n)).collect(),
            textures: VIOLET_TEXTURES.iter().map(|&(source, destination)| TextureMapping {
                source: source.into(),
                destination: destination.into(),
            }).collect(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_skips() {
        assert_eq!(MeshSlot::from_name(""), MeshSlot::Skip);
        assert_eq!(MeshSlot::from_name("a.obj"), MeshSlot::Emit("a.obj".into()));
    }

    #[test]
    fn default_tables() {
        let c = Config::default();
        assert_eq!(c.max_texture_size, 512);
        assert_eq!(c.mesh_slots.len(), 8);
        assert_eq!(c.mesh_slots[7], MeshSlot::Emit("body.obj".into()));
        assert_eq!(c.textures[0].destination, "body_diffuse.tga");
        assert!(c.textures.iter().all(|t| t.source.starts_with("textures/")));
    }
}
