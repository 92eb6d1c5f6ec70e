mod support;

use ctslice::{
    Sliceable, TriMesh,
    io::{IoError, load_mesh},
};
use support::write_obj;

#[test]
fn obj_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let cube = TriMesh::cube(1.0).translate(0.5, 0.5, -2.0);
    write_obj(dir.path(), "model.obj", &cube);

    let loaded = load_mesh(dir.path().join("model.obj")).unwrap();
    assert_eq!(loaded.triangles, cube.triangles);
    assert_eq!(loaded.bounding_box(), cube.bounding_box());
    assert!(loaded.slice_at_height(-1.5).is_some());
}

#[test]
fn obj_without_faces_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("points.obj");
    std::fs::write(&path, "v 0 0 0\nv 1 1 1\n").unwrap();
    assert!(matches!(load_mesh(&path), Err(IoError::Empty)));
}

#[test]
fn obj_with_garbage_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.obj");
    std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2\n").unwrap();
    assert!(matches!(load_mesh(&path), Err(IoError::Malformed { line: 4, .. })));
}

#[test]
fn exported_obj_with_colours_lines_and_continuations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.obj");
    let src = "\
mtllib model.mtl
o body
v 0 0 0 0.8 0.1 0.1
v 1 0 0 0.8 0.1 0.1
v 1 1 0 0.8 0.1 0.1
v 0 1 0 0.8 0.1 0.1
v 0.5 0.5 1 0.2 0.9 0.2
vt 0 0
vn 0 0 -1
usemtl red
s off
l 1 2
f 1 4 3 \\
  2
f 1/1 2/1 5/1
f 2 3 5
f 3 4 5
f 4 1 5
";
    std::fs::write(&path, src).unwrap();

    let mesh = load_mesh(&path).unwrap();
    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.triangle_count(), 6);
    assert_eq!(mesh.bounding_box().maxs.z, 1.0);
    assert!(mesh.slice_at_height(0.5).is_some());
}
