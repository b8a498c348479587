use gltf_json::{Accessor, Index, Mesh, Root};
use gltf_json::buffer::View;
use crate::error::{Error, Result};

pub struct SceneDocument {
    root: Root,
    /// Indices into `root.meshes`, in the order meshes are addressed by `mesh`.
    mesh_order: Vec<usize>,
}

impl SceneDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<SceneDocument> {
        let root: Root = serde_json::from_slice(bytes).map_err(Error::Document)?;
        Ok(SceneDocument::new(root))
    }

    /// Meshes are numbered by the nodes that reference them, in node order.  Documents with no
    /// mesh nodes at all are numbered by the `meshes` array instead.
    pub fn new(root: Root) -> SceneDocument {
        let mut mesh_order = root.nodes.iter()
            .filter_map(|n| n.mesh.map(|m| m.value()))
            .collect::<Vec<_>>();
        if mesh_order.is_empty() {
            mesh_order = (0 .. root.meshes.len()).collect();
        }
        SceneDocument { root, mesh_order }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn mesh_count(&self) -> usize {
        self.mesh_order.len()
    }

    pub fn mesh(&self, index: usize) -> Result<&Mesh> {
        let &mesh_idx = self.mesh_order.get(index).ok_or(Error::MeshIndex {
            index,
            count: self.mesh_count(),
        })?;
        self.root.meshes.get(mesh_idx).ok_or(Error::MeshIndex {
            index: mesh_idx,
            count: self.root.meshes.len(),
        })
    }

    pub fn mesh_name(&self, index: usize) -> Option<&str> {
        self.mesh(index).ok()?.name.as_deref()
    }

    pub fn accessor(&self, idx: Index<Accessor>) -> Result<&Accessor> {
        self.root.accessors.get(idx.value()).ok_or_else(|| Error::accessor(
            idx.value(),
            format!("no such accessor ({} defined)", self.root.accessors.len()),
        ))
    }

    pub fn view(&self, idx: Index<View>) -> Option<&View> {
        self.root.buffer_views.get(idx.value())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> SceneDocument {
        SceneDocument::from_slice(value.to_string().as_bytes()).unwrap()
    }

    fn mesh(name: &str) -> serde_json::Value {
        json!({ "name": name, "primitives": [{ "attributes": { "POSITION": 0 } }] })
    }

    #[test]
    fn meshes_follow_node_order() {
        let d = doc(json!({
            "asset": { "version": "2.0" },
            "nodes": [{ "mesh": 2 }, { "name": "empty" }, { "mesh": 0 }],
            "meshes": [mesh("a"), mesh("b"), mesh("c")],
        }));
        assert_eq!(d.mesh_count(), 2);
        assert_eq!(d.mesh_name(0), Some("c"));
        assert_eq!(d.mesh_name(1), Some("a"));
    }

    #[test]
    fn child_nodes_count_in_node_order() {
        let d = doc(json!({
            "asset": { "version": "2.0" },
            "scenes": [{ "nodes": [0] }],
            "nodes": [
                { "name": "root", "children": [1, 2] },
                { "name": "group", "children": [3] },
                { "mesh": 1 },
                { "mesh": 0 },
            ],
            "meshes": [mesh("deep"), mesh("shallow")],
        }));
        assert_eq!(d.mesh_count(), 2);
        assert_eq!(d.mesh_name(0), Some("shallow"));
        assert_eq!(d.mesh_name(1), Some("deep"));
    }

    #[test]
    fn falls_back_to_mesh_array() {
        let d = doc(json!({
            "asset": { "version": "2.0" },
            "meshes": [mesh("a"), mesh("b")],
        }));
        assert_eq!(d.mesh_count(), 2);
        assert_eq!(d.mesh_name(1), Some("b"));
    }

    #[test]
    fn index_out_of_range() {
        let d = doc(json!({
            "asset": { "version": "2.0" },
            "nodes": [{ "mesh": 0 }],
            "meshes": [mesh("a")],
        }));
        match d.mesh(1) {
            Err(Error::MeshIndex { index, count }) => {
                assert_eq!(index, 1);
                assert_eq!(count, 1);
            },
            _ => panic!("expected MeshIndex error"),
        }
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(SceneDocument::from_slice(b"{ not json"), Err(Error::Document(_))));
    }
}
