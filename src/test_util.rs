use serde_json::{json, Value};
use crate::document::SceneDocument;

pub const U8: u32 = 5121;
pub const U16: u32 = 5123;
pub const U32: u32 = 5125;
pub const F32: u32 = 5126;

#[derive(Default)]
pub struct SceneBuilder {
    pub bin: Vec<u8>,
    pub views: Vec<Value>,
    pub accessors: Vec<Value>,
    pub meshes: Vec<Value>,
    pub nodes: Vec<Value>,
}

impl SceneBuilder {
    pub fn push_view(&mut self, data: &[u8], stride: Option<usize>) -> usize {
        let offset = self.bin.len();
        self.bin.extend_from_slice(data);
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let mut view = json!({ "buffer": 0, "byteOffset": offset, "byteLength": data.len() });
        if let Some(stride) = stride {
            view["byteStride"] = json!(stride);
        }
        self.views.push(view);
        self.views.len() - 1
    }

    pub fn push_accessor(
        &mut self,
        view: usize,
        byte_offset: usize,
        component_type: u32,
        type_: &str,
        count: usize,
    ) -> usize {
        self.accessors.push(json!({
            "bufferView": view,
            "byteOffset": byte_offset,
            "componentType": component_type,
            "type": type_,
            "count": count,
        }));
        self.accessors.len() - 1
    }

    pub fn push_floats<const N: usize>(&mut self, data: &[[f32; N]]) -> usize {
        let bytes = data.iter().flatten().flat_map(|x| x.to_le_bytes()).collect::<Vec<_>>();
        let view = self.push_view(&bytes, None);
        let type_ = match N {
            2 => "VEC2",
            3 => "VEC3",
            4 => "VEC4",
            _ => "SCALAR",
        };
        self.push_accessor(view, 0, F32, type_, data.len())
    }

    pub fn push_u16_indices(&mut self, data: &[u16]) -> usize {
        let bytes = data.iter().flat_map(|x| x.to_le_bytes()).collect::<Vec<_>>();
        let view = self.push_view(&bytes, None);
        self.push_accessor(view, 0, U16, "SCALAR", data.len())
    }

    /// Add a mesh and a node referencing it.
    pub fn push_mesh(&mut self, name: &str, primitives: Vec<Value>) -> usize {
        self.meshes.push(json!({ "name": name, "primitives": primitives }));
        let idx = self.meshes.len() - 1;
        self.nodes.push(json!({ "mesh": idx }));
        idx
    }

    pub fn json(&self) -> Value {
        json!({
            "asset": { "version": "2.0" },
            "buffers": [{ "byteLength": self.bin.len(), "uri": "scene.bin" }],
            "bufferViews": self.views,
            "accessors": self.accessors,
            "meshes": self.meshes,
            "nodes": self.nodes,
        })
    }

    pub fn finish(self) -> (SceneDocument, Vec<u8>) {
        let doc = SceneDocument::from_slice(self.json().to_string().as_bytes())
            .expect("test document should parse");
        (doc, self.bin)
    }
}

pub fn primitive(position: usize, indices: Option<usize>) -> Value {
    let mut p = json!({ "attributes": { "POSITION": position } });
    if let Some(i) = indices {
        p["indices"] = json!(i);
    }
    p
}
