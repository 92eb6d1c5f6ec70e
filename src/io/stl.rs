use super::IoError;
use crate::float_types::Real;
use crate::mesh::TriMesh;
use nalgebra::Point3;
use std::io::Cursor;

/// Import an ASCII or binary STL byte buffer.
///
/// `stl_io` already merges identical vertices, so the result is indexed.
///
/// ```rust
/// # use ctslice::io::parse_stl;
/// let ascii = b"solid t
///   facet normal 0 0 1
///     outer loop
///       vertex 0 0 0
///       vertex 1 0 0
///       vertex 0 1 0
///     endloop
///   endfacet
/// endsolid t
/// ";
/// let mesh = parse_stl(ascii).unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
pub fn parse_stl(bytes: &[u8]) -> Result<TriMesh, IoError> {
    let mut cursor = Cursor::new(bytes);
    let stl = stl_io::read_stl(&mut cursor)?;

    #[allow(clippy::unnecessary_cast)]
    let vertices: Vec<Point3<Real>> = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as Real, v[1] as Real, v[2] as Real))
        .collect();

    let mut triangles = Vec::with_capacity(stl.faces.len());
    for face in &stl.faces {
        let mut tri = [0u32; 3];
        for (slot, &index) in tri.iter_mut().zip(face.vertices.iter()) {
            if index >= vertices.len() {
                return Err(IoError::IndexOutOfRange {
                    index: index as i64,
                    vertex_count: vertices.len(),
                });
            }
            *slot = index as u32;
        }
        triangles.push(tri);
    }

    Ok(TriMesh::new(vertices, triangles))
}
