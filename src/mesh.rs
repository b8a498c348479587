use gltf_json::mesh::{Mode, Primitive, Semantic};
use gltf_json::validation::Checked;
use log::debug;
use crate::accessor;
use crate::document::SceneDocument;
use crate::error::{Error, Result};


#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: Option<[f32; 2]>,
    pub normal: Option<[f32; 3]>,
}

impl Vertex {
    pub fn new(pos: [f32; 3]) -> Vertex {
        Vertex { pos, uv: None, normal: None }
    }
}

/// Three vertices, in winding order.
pub type Triangle = [Vertex; 3];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedMesh {
    pub tris: Vec<Triangle>,
}


/// Extract mesh number `index` of `doc` as one triangle list.  Primitives are concatenated in
/// order, and each triangle keeps the vertex order of its index triple.
pub fn extract_mesh(doc: &SceneDocument, buffer: &[u8], index: usize) -> Result<ExtractedMesh> {
    let mesh = doc.mesh(index)?;
    let mut out = ExtractedMesh::default();
    for (i, prim) in mesh.primitives.iter().enumerate() {
        extract_primitive(doc, buffer, index, i, prim, &mut out.tris)?;
    }
    Ok(out)
}

fn extract_primitive(
    doc: &SceneDocument,
    buffer: &[u8],
    mesh_index: usize,
    prim_index: usize,
    prim: &Primitive,
    tris: &mut Vec<Triangle>,
) -> Result<()> {
    let err = |reason: String| Error::Primitive {
        mesh: mesh_index,
        primitive: prim_index,
        reason,
    };

    match prim.mode {
        Checked::Valid(Mode::Triangles) => {},
        Checked::Valid(m) => return Err(err(format!("unsupported primitive mode {:?}", m))),
        Checked::Invalid => return Err(err("invalid primitive mode".into())),
    }

    let attr = |s: Semantic| prim.attributes.get(&Checked::Valid(s)).copied();
    let pos_idx = attr(Semantic::Positions)
        .ok_or_else(|| err("primitive has no POSITION attribute".into()))?;
    let positions = accessor::read_vectors::<3>(doc, buffer, pos_idx)?;
    let uvs = attr(Semantic::TexCoords(0))
        .map(|a| accessor::read_vectors::<2>(doc, buffer, a))
        .transpose()?;
    let normals = attr(Semantic::Normals)
        .map(|a| accessor::read_vectors::<3>(doc, buffer, a))
        .transpose()?;

    let indices = match prim.indices {
        Some(a) => accessor::read_indices(doc, buffer, a)?,
        None => (0 .. positions.len() as u32).collect(),
    };
    if indices.len() % 3 != 0 {
        return Err(err(format!("index count {} is not a multiple of 3", indices.len())));
    }
    debug!("mesh {}, primitive {}: {} vertices, {} triangles, uv: {}, normals: {}",
        mesh_index, prim_index, positions.len(), indices.len() / 3,
        uvs.is_some(), normals.is_some());

    let vertex = |i: u32| -> Result<Vertex> {
        let i = i as usize;
        let pos = *positions.get(i)
            .ok_or_else(|| err(format!("vertex {} out of range of {} positions", i, positions.len())))?;
        let uv = match uvs {
            Some(ref uvs) => Some(*uvs.get(i).ok_or_else(|| err(format!(
                "vertex {} out of range of {} texture coordinates", i, uvs.len())))?),
            None => None,
        };
        let normal = match normals {
            Some(ref ns) => Some(*ns.get(i).ok_or_else(|| err(format!(
                "vertex {} out of range of {} normals", i, ns.len())))?),
            None => None,
        };
        Ok(Vertex { pos, uv, normal })
    };

    tris.reserve(indices.len() / 3);
    for t in indices.chunks_exact(3) {
        tris.push([vertex(t[0])?, vertex(t[1])?, vertex(t[2])?]);
    }
    Ok(())
}
