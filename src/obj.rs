//! Wavefront OBJ output.
//!
//! Each triangle is written as one record: three `v` lines, then three `vt` and three `vn` lines
//! when the vertices carry texture coordinates or normals, then an `f` line referencing them.
//! Indices are absolute and 1-based, with separate counters for `v`, `vt` and `vn`, so a face
//! token is `p`, `p/t`, `p//n` or `p/t/n`.  Texture coordinates are written unchanged.
use std::io::{self, Write};
use crate::mesh::{ExtractedMesh, Triangle, Vertex};

pub fn write_obj<W: Write>(w: &mut W, m: &ExtractedMesh) -> io::Result<()> {
    writeln!(w, "# {} triangles", m.tris.len())?;
    let (mut nv, mut nt, mut nn) = (0, 0, 0);
    for tri in &m.tris {
        let mut refs = [(0, None, None); 3];
        for (r, v) in refs.iter_mut().zip(tri) {
            let [x, y, z] = v.pos;
            writeln!(w, "v {} {} {}", x, y, z)?;
            nv += 1;
            r.0 = nv;
        }
        for (r, v) in refs.iter_mut().zip(tri) {
            if let Some([s, t]) = v.uv {
                writeln!(w, "vt {} {}", s, t)?;
                nt += 1;
                r.1 = Some(nt);
            }
        }
        for (r, v) in refs.iter_mut().zip(tri) {
            if let Some([x, y, z]) = v.normal {
                writeln!(w, "vn {} {} {}", x, y, z)?;
                nn += 1;
                r.2 = Some(nn);
            }
        }
        write!(w, "f")?;
        for &(p, t, n) in &refs {
            match (t, n) {
                (None, None) => write!(w, " {}", p)?,
                (Some(t), None) => write!(w, " {}/{}", p, t)?,
                (None, Some(n)) => write!(w, " {}//{}", p, n)?,
                (Some(t), Some(n)) => write!(w, " {}/{}/{}", p, t, n)?,
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

pub fn to_obj_string(m: &ExtractedMesh) -> String {
    let mut buf = Vec::new();
    // Writing into a `Vec` cannot fail.
    let _ = write_obj(&mut buf, m);
    String::from_utf8_lossy(&buf).into_owned()
}


fn bad_data(line: usize, msg: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("line {}: {}", line, msg))
}

fn parse_floats<const N: usize>(line: usize, fields: &[&str]) -> io::Result<[f32; N]> {
    if fields.len() != N {
        return Err(bad_data(line, format!("expected {} values, got {}", N, fields.len())));
    }
    let mut out = [0.; N];
    for (o, f) in out.iter_mut().zip(fields) {
        *o = f.parse().map_err(|e| bad_data(line, e))?;
    }
    Ok(out)
}

fn lookup<T: Copy>(line: usize, items: &[T], token: &str) -> io::Result<T> {
    let i: usize = token.parse().map_err(|e| bad_data(line, e))?;
    i.checked_sub(1)
        .and_then(|i| items.get(i).copied())
        .ok_or_else(|| bad_data(line, format!("index {} out of range", i)))
}

/// Read back the layout produced by `write_obj`.  Only `v`, `vt`, `vn` and triangular `f`
/// records are understood; comments and blank lines are skipped.
pub fn parse_obj(text: &str) -> io::Result<ExtractedMesh> {
    let mut pos = Vec::new();
    let mut uv = Vec::new();
    let mut nrm = Vec::new();
    let mut tris = Vec::new();

    for (i, l) in text.lines().enumerate() {
        let line = i + 1;
        let fields = l.split_whitespace().collect::<Vec<_>>();
        match fields.split_first() {
            None => {},
            Some((&tag, _)) if tag.starts_with('#') => {},
            Some((&"v", rest)) => pos.push(parse_floats::<3>(line, rest)?),
            Some((&"vt", rest)) => uv.push(parse_floats::<2>(line, rest)?),
            Some((&"vn", rest)) => nrm.push(parse_floats::<3>(line, rest)?),
            Some((&"f", rest)) => {
                if rest.len() != 3 {
                    return Err(bad_data(line, "only triangular faces are supported"));
                }
                let mut tri: Triangle = [Vertex::new([0.; 3]); 3];
                for (v, tok) in tri.iter_mut().zip(rest) {
                    let mut parts = tok.split('/');
                    let p = parts.next().unwrap_or("");
                    v.pos = lookup(line, &pos, p)?;
                    v.uv = match parts.next() {
                        Some("") | None => None,
                        Some(t) => Some(lookup(line, &uv, t)?),
                    };
                    v.normal = match parts.next() {
                        Some("") | None => None,
                        Some(n) => Some(lookup(line, &nrm, n)?),
                    };
                }
                tris.push(tri);
            },
            Some((tag, _)) => return Err(bad_data(line, format!("unknown record {:?}", tag))),
        }
    }
    Ok(ExtractedMesh { tris })
}
