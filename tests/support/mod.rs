//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use ctslice::{TriMesh, float_types::Real};
use std::fmt::Write as _;
use std::path::Path;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Serializes a mesh as Wavefront OBJ text (1-based indices).
pub fn to_obj(mesh: &TriMesh) -> String {
    let mut out = String::from("# written by tests\n");
    for v in &mesh.vertices {
        let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
    }
    for [a, b, c] in &mesh.triangles {
        let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
    }
    out
}

/// Writes `mesh` as `<dir>/<name>`, creating `dir` first.
pub fn write_obj(dir: &Path, name: &str, mesh: &TriMesh) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), to_obj(mesh)).unwrap();
}

/// Sorted list of file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
