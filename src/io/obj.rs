//! Wavefront OBJ import.
//!
//! Only geometry is read: `v` positions and `f` faces. Texture coordinates,
//! normals, lines, groups, smoothing and material statements are skipped, as are
//! trailing vertex values such as per-vertex colours. A line ending in `\` continues
//! on the next one. Faces with more than three corners are fan-triangulated.

use super::IoError;
use crate::float_types::Real;
use crate::mesh::TriMesh;
use nalgebra::Point3;
use nom::{
    IResult,
    bytes::complete::take_till1,
    character::complete::{char, i64 as parse_i64, space0, space1},
    combinator::{all_consuming, opt},
    multi::{many0, many1},
    number::complete::double,
    sequence::{pair, preceded, terminated, tuple},
};

/// `v x y z [w | r g b ...]`
fn vertex(input: &str) -> IResult<&str, [f64; 3]> {
    let (input, (x, y, z)) = tuple((
        preceded(space1, double),
        preceded(space1, double),
        preceded(space1, double),
    ))(input)?;
    let (input, _extra) = many0(preceded(space1, double))(input)?;
    Ok((input, [x, y, z]))
}

/// One face corner: `i`, `i/t`, `i//n` or `i/t/n`. Only the position index is kept.
fn face_corner(input: &str) -> IResult<&str, i64> {
    terminated(
        parse_i64,
        opt(pair(
            preceded(char('/'), opt(parse_i64)),
            opt(preceded(char('/'), opt(parse_i64))),
        )),
    )(input)
}

fn face(input: &str) -> IResult<&str, Vec<i64>> {
    many1(preceded(space1, face_corner))(input)
}

fn keyword(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace())(input)
}

fn malformed(line: usize, what: &str, text: &str) -> IoError {
    IoError::Malformed {
        line,
        message: format!("invalid {what} statement {text:?}"),
    }
}

/// Resolves a 1-based (or negative, relative) OBJ index against the vertices read so far.
fn resolve_index(index: i64, vertex_count: usize) -> Result<u32, IoError> {
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => vertex_count as i64 + i,
        _ => -1,
    };
    if resolved < 0 || resolved > u32::MAX as i64 {
        return Err(IoError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }
    Ok(resolved as u32)
}

/// Joins `\`-continued lines, yielding each logical line with the number of the
/// physical line it starts on.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    for (i, raw) in text.lines().enumerate() {
        let (start, mut joined) = pending.take().unwrap_or_else(|| (i + 1, String::new()));
        match raw.strip_suffix('\\') {
            Some(head) => {
                joined.push_str(head);
                joined.push(' ');
                pending = Some((start, joined));
            },
            None => {
                joined.push_str(raw);
                out.push((start, joined));
            },
        }
    }
    out.extend(pending);
    out
}

/// Parses OBJ text into a [`TriMesh`].
pub fn parse_obj(text: &str) -> Result<TriMesh, IoError> {
    let mut vertices: Vec<Point3<Real>> = Vec::new();
    let mut triangles: Vec<[u32; 3]> = Vec::new();

    for (line_no, raw) in logical_lines(text) {
        let line = match raw.find('#') {
            Some(hash) => &raw[..hash],
            None => raw.as_str(),
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        let (rest, kw) = keyword(line).map_err(|_| malformed(line_no, "unknown", line))?;
        match kw {
            "v" => {
                let (_, [x, y, z]) = all_consuming(terminated(vertex, space0))(rest)
                    .map_err(|_| malformed(line_no, "vertex", line))?;
                vertices.push(Point3::new(x as Real, y as Real, z as Real));
            },
            "f" => {
                let (_, corners) = all_consuming(terminated(face, space0))(rest)
                    .map_err(|_| malformed(line_no, "face", line))?;
                if corners.len() < 3 {
                    return Err(malformed(line_no, "face", line));
                }
                let indices = corners
                    .into_iter()
                    .map(|i| resolve_index(i, vertices.len()))
                    .collect::<Result<Vec<_>, _>>()?;
                for k in 1..indices.len() - 1 {
                    triangles.push([indices[0], indices[k], indices[k + 1]]);
                }
            },
            _ => {},
        }
    }

    if let Some(&bad) = triangles.iter().flatten().find(|&&i| i as usize >= vertices.len()) {
        return Err(IoError::IndexOutOfRange {
            index: bad as i64 + 1,
            vertex_count: vertices.len(),
        });
    }

    Ok(TriMesh::new(vertices, triangles))
}
