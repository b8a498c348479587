use std::io;
use gltf_json::{Accessor, Index};
use gltf_json::accessor::{ComponentType, GenericComponentType, Type};
use gltf_json::validation::Checked;
use log::debug;
use crate::document::SceneDocument;
use crate::error::{Error, Result};
use crate::read_from::{self, ReadFrom};

/// Where an accessor's elements live in the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Absolute byte offset of the first element.
    pub start: usize,
    pub stride: usize,
    pub count: usize,
    pub component_type: ComponentType,
    /// Components per element, e.g. 3 for `VEC3`.
    pub components: usize,
    pub normalized: bool,
}

impl Layout {
    pub fn element_width(&self) -> usize {
        component_size(self.component_type) * self.components
    }

    /// Number of bytes between the first byte of the first element and the last byte of the last.
    pub fn span(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.count - 1) * self.stride + self.element_width()
        }
    }
}

pub fn component_size(c: ComponentType) -> usize {
    match c {
        ComponentType::I8 | ComponentType::U8 => 1,
        ComponentType::I16 | ComponentType::U16 => 2,
        ComponentType::U32 | ComponentType::F32 => 4,
    }
}

pub fn type_components(t: Type) -> usize {
    match t {
        Type::Scalar => 1,
        Type::Vec2 => 2,
        Type::Vec3 => 3,
        Type::Vec4 | Type::Mat2 => 4,
        Type::Mat3 => 9,
        Type::Mat4 => 16,
    }
}

fn shape(a: usize, acc: &Accessor) -> Result<(ComponentType, usize)> {
    let component_type = match acc.component_type {
        Checked::Valid(GenericComponentType(c)) => c,
        Checked::Invalid => return Err(Error::accessor(a, "invalid componentType")),
    };
    let components = match acc.type_ {
        Checked::Valid(t) => type_components(t),
        Checked::Invalid => return Err(Error::accessor(a, "invalid type")),
    };
    Ok((component_type, components))
}

/// Compute and bounds-check the layout of accessor `idx`.  Returns `None` for an accessor with
/// no bufferView, whose elements are all zero.
pub fn layout(
    doc: &SceneDocument,
    buffer_len: usize,
    idx: Index<Accessor>,
) -> Result<Option<Layout>> {
    let a = idx.value();
    let acc = doc.accessor(idx)?;
    if acc.sparse.is_some() {
        return Err(Error::accessor(a, "sparse accessors are not supported"));
    }
    let (component_type, components) = shape(a, acc)?;
    let count = acc.count.0 as usize;
    let elem_width = component_size(component_type) * components;

    let view_idx = match acc.buffer_view {
        Some(v) => v,
        None => return Ok(None),
    };
    let view = doc.view(view_idx).ok_or_else(|| Error::buffer_range(
        a, format!("bufferView {} does not exist", view_idx.value()),
    ))?;
    if view.buffer.value() != 0 {
        return Err(Error::buffer_range(
            a, format!("bufferView {} uses buffer {}, but only buffer 0 is available",
                view_idx.value(), view.buffer.value()),
        ));
    }
    let view_offset = view.byte_offset.map_or(0, |o| o.0 as usize);
    let view_len = view.byte_length.0 as usize;
    match view_offset.checked_add(view_len) {
        Some(end) if end <= buffer_len => {},
        _ => return Err(Error::buffer_range(
            a, format!("bufferView {} ({} bytes at {}) overruns the {}-byte buffer",
                view_idx.value(), view_len, view_offset, buffer_len),
        )),
    }

    let stride = view.byte_stride.map_or(elem_width, |s| s.0 as usize);
    if stride < elem_width {
        return Err(Error::buffer_range(
            a, format!("stride {} is smaller than the {}-byte element", stride, elem_width),
        ));
    }

    let acc_offset = acc.byte_offset.map_or(0, |o| o.0 as usize);
    let span = count.checked_sub(1)
        .map_or(Some(0), |n| n.checked_mul(stride).and_then(|x| x.checked_add(elem_width)));
    match span.and_then(|s| s.checked_add(acc_offset)) {
        Some(end) if end <= view_len => {},
        _ => return Err(Error::buffer_range(
            a, format!("{} elements of {} bytes (stride {}) at offset {} overrun the {}-byte \
                bufferView {}", count, elem_width, stride, acc_offset, view_len, view_idx.value()),
        )),
    }
    // `acc_offset <= view_len` and the view lies inside the buffer, so this cannot overflow.
    Ok(Some(Layout {
        start: view_offset + acc_offset,
        stride,
        count,
        component_type,
        components,
        normalized: acc.normalized,
    }))
}

fn decode<T: ReadFrom>(buffer: &[u8], layout: &Layout) -> io::Result<Vec<T>> {
    let mut out = Vec::with_capacity(layout.count * layout.components);
    for i in 0 .. layout.count {
        let offset = layout.start + i * layout.stride;
        out.extend(read_from::read_many_at::<T>(buffer, offset, layout.components)?);
    }
    Ok(out)
}

fn decode_floats(buffer: &[u8], layout: &Layout) -> io::Result<Vec<f32>> {
    let norm = layout.normalized;
    Ok(match layout.component_type {
        ComponentType::F32 => decode::<f32>(buffer, layout)?,
        ComponentType::U8 => decode::<u8>(buffer, layout)?.into_iter()
            .map(|x| if norm { x as f32 / 255. } else { x as f32 })
            .collect(),
        ComponentType::I8 => decode::<i8>(buffer, layout)?.into_iter()
            .map(|x| if norm { (x as f32 / 127.).max(-1.) } else { x as f32 })
            .collect(),
        ComponentType::U16 => decode::<u16>(buffer, layout)?.into_iter()
            .map(|x| if norm { x as f32 / 65535. } else { x as f32 })
            .collect(),
        ComponentType::I16 => decode::<i16>(buffer, layout)?.into_iter()
            .map(|x| if norm { (x as f32 / 32767.).max(-1.) } else { x as f32 })
            .collect(),
        ComponentType::U32 => decode::<u32>(buffer, layout)?.into_iter()
            .map(|x| x as f32)
            .collect(),
    })
}

/// Elements of an accessor with no bufferView.  The count is capped so that the zeros would fit
/// in the buffer the rest of the document uses.
fn zeroed<const N: usize>(
    doc: &SceneDocument,
    buffer_len: usize,
    idx: Index<Accessor>,
) -> Result<Vec<[f32; N]>> {
    let a = idx.value();
    let acc = doc.accessor(idx)?;
    let (component_type, components) = shape(a, acc)?;
    if components != N {
        return Err(Error::accessor(
            a, format!("expected {} components per element, but found {}", N, components),
        ));
    }
    let count = acc.count.0 as usize;
    match count.checked_mul(component_size(component_type) * components) {
        Some(len) if len <= buffer_len => Ok(vec![[0.; N]; count]),
        _ => Err(Error::buffer_range(
            a, format!("{} zero elements exceed the {}-byte buffer", count, buffer_len),
        )),
    }
}

/// Decode accessor `idx` as `N`-component float vectors.
pub fn read_vectors<const N: usize>(
    doc: &SceneDocument,
    buffer: &[u8],
    idx: Index<Accessor>,
) -> Result<Vec<[f32; N]>> {
    let a = idx.value();
    let layout = match layout(doc, buffer.len(), idx)? {
        Some(l) => l,
        None => return zeroed::<N>(doc, buffer.len(), idx),
    };
    if layout.components != N {
        return Err(Error::accessor(
            a, format!("expected {} components per element, but found {}", N, layout.components),
        ));
    }
    let flat = decode_floats(buffer, &layout)
        .map_err(|e| Error::buffer_range(a, e.to_string()))?;
    debug!("accessor {}: {} x {} floats from offset {}", a, layout.count, N, layout.start);
    Ok(flat.chunks_exact(N).map(|c| {
        let mut v = [0.; N];
        v.copy_from_slice(c);
        v
    }).collect())
}

/// Decode accessor `idx` as a list of vertex indices.
pub fn read_indices(
    doc: &SceneDocument,
    buffer: &[u8],
    idx: Index<Accessor>,
) -> Result<Vec<u32>> {
    let a = idx.value();
    let layout = match layout(doc, buffer.len(), idx)? {
        Some(l) => l,
        None => return Err(Error::accessor(a, "index accessor has no bufferView")),
    };
    if layout.components != 1 {
        return Err(Error::accessor(a, "index accessor must be SCALAR"));
    }
    let res = match layout.component_type {
        ComponentType::U8 => decode::<u8>(buffer, &layout)
            .map(|v| v.into_iter().map(u32::from).collect()),
        ComponentType::U16 => decode::<u16>(buffer, &layout)
            .map(|v| v.into_iter().map(u32::from).collect()),
        ComponentType::U32 => decode::<u32>(buffer, &layout),
        c => return Err(Error::accessor(
            a, format!("index accessor has unsupported component type {:?}", c),
        )),
    };
    res.map_err(|e| Error::buffer_range(a, e.to_string()))
}
