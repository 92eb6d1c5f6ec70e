mod support;

use ctslice::{
    SliceConfig, SliceError, SlicePolygon, Sliceable, TriMesh,
    batch::{MONTAGE_FILE, discover_models, process_model, run_batch},
    float_types::{Real, parry3d::bounding_volume::Aabb},
};
use nalgebra::{Point3, Vector3};
use support::{file_names, write_obj};

/// A cube that claims to reach slightly above its real top.
struct TallerThanItLooks(TriMesh);

impl Sliceable for TallerThanItLooks {
    fn bounding_box(&self) -> Aabb {
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.01))
    }

    fn slice(&self, origin: Point3<Real>, normal: Vector3<Real>) -> Option<SlicePolygon> {
        self.0.slice(origin, normal)
    }
}

/// Every cut is a straight line along y.
struct Sliver;

impl Sliceable for Sliver {
    fn bounding_box(&self) -> Aabb {
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 1.0))
    }

    fn slice(&self, _origin: Point3<Real>, _normal: Vector3<Real>) -> Option<SlicePolygon> {
        Some(SlicePolygon::from_points([(0.0, 0.0), (0.0, 1.0)]))
    }
}

fn dataset_with_missing_model(root: &std::path::Path) {
    write_obj(&root.join("chair").join("a01"), "model.obj", &TriMesh::cube(1.0));
    write_obj(&root.join("chair").join("a02"), "model.obj", &TriMesh::pyramid(2.0, 3.0));
    write_obj(
        &root.join("table").join("b01"),
        "model.obj",
        &TriMesh::cuboid(3.0, 1.0, 0.5),
    );
    std::fs::create_dir_all(root.join("table").join("b02")).unwrap();
}

#[test]
fn missing_height_skips_only_that_index() {
    let out = tempfile::tempdir().unwrap();
    let mesh = TallerThanItLooks(TriMesh::cube(1.0));
    let config = SliceConfig {
        num_slices: 3,
        ..Default::default()
    };

    let report = process_model(&mesh, out.path(), &config).unwrap();
    assert_eq!(report.heights, vec![1.01, 0.505, 0.0]);
    assert_eq!(report.no_intersection, vec![0]);
    assert_eq!(report.written, vec![1, 2]);
    assert_eq!(file_names(out.path()), vec!["1.png", "2.png"]);
}

#[test]
fn degenerate_sections_write_nothing() {
    let out = tempfile::tempdir().unwrap();
    let config = SliceConfig {
        num_slices: 4,
        ..Default::default()
    };

    let report = process_model(&Sliver, out.path(), &config).unwrap();
    assert_eq!(report.degenerate, vec![0, 1, 2, 3]);
    assert!(report.written.is_empty());
    assert!(file_names(out.path()).is_empty());
}

#[test]
fn montage_is_written_when_enabled() {
    let out = tempfile::tempdir().unwrap();
    let config = SliceConfig {
        num_slices: 5,
        montage: true,
        ..Default::default()
    };

    process_model(&TriMesh::cube(1.0), out.path(), &config).unwrap();
    let strip = image::open(out.path().join(MONTAGE_FILE)).unwrap().to_luma8();
    assert_eq!(strip.dimensions(), (500, 100));
}

#[test]
fn discovery_is_sorted_and_keeps_missing_meshes() {
    let root = tempfile::tempdir().unwrap();
    dataset_with_missing_model(root.path());
    std::fs::write(root.path().join("README.txt"), "not a category").unwrap();

    let models = discover_models(root.path(), "model.obj").unwrap();
    let ids: Vec<_> = models
        .iter()
        .map(|m| format!("{}/{}", m.category, m.model_id))
        .collect();
    assert_eq!(ids, vec!["chair/a01", "chair/a02", "table/b01", "table/b02"]);
    assert_eq!(
        models[3].mesh_path,
        root.path().join("table").join("b02").join("model.obj")
    );
}

#[test]
fn batch_continues_past_missing_mesh() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    dataset_with_missing_model(root.path());

    let config = SliceConfig {
        num_slices: 3,
        ..SliceConfig::new(root.path(), out.path().join("slices"))
    };
    let report = run_batch(&config).unwrap();

    assert_eq!(report.models.len(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].entry.model_id, "b02");
    assert!(matches!(report.failures[0].error, SliceError::MeshLoad { .. }));
    assert!(!report.is_clean());

    let slices = out.path().join("slices");
    for model in ["chair/a01", "chair/a02", "table/b01"] {
        let names = file_names(&slices.join(model));
        assert!(!names.is_empty(), "{model} has no images");
        assert!(names.iter().all(|n| n.ends_with(".png")));
    }
    // the pyramid apex is a single point, so its top height is skipped
    assert_eq!(file_names(&slices.join("chair/a02")), vec!["1.png", "2.png"]);
    assert!(file_names(&slices.join("table/b02")).is_empty());
}

#[test]
fn missing_dataset_is_fatal() {
    let out = tempfile::tempdir().unwrap();
    let config = SliceConfig::new(out.path().join("nope"), out.path().join("slices"));
    let err = run_batch(&config).unwrap_err();
    assert!(matches!(err, SliceError::DatasetUnreadable { .. }));
    assert!(err.is_fatal());
}

#[test]
fn output_root_that_is_a_file_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    dataset_with_missing_model(root.path());
    let blocker = root.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let config = SliceConfig::new(root.path(), blocker.join("slices"));
    assert!(matches!(
        run_batch(&config),
        Err(SliceError::OutputRootInaccessible { .. })
    ));
}

#[test]
fn invalid_config_is_rejected_before_any_work() {
    let root = tempfile::tempdir().unwrap();
    let config = SliceConfig {
        num_slices: 0,
        ..SliceConfig::new(root.path(), root.path().join("slices"))
    };
    assert!(matches!(
        run_batch(&config),
        Err(SliceError::InvalidConfig(_))
    ));
    assert!(!root.path().join("slices").exists());
}

#[test]
fn vanishing_step_fails_each_model_without_stopping_the_run() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    dataset_with_missing_model(root.path());

    let config = SliceConfig {
        step_size: Some(1e-6),
        ..SliceConfig::new(root.path(), out.path().join("slices"))
    };
    let report = run_batch(&config).unwrap();

    assert!(report.models.is_empty());
    assert_eq!(report.failures.len(), 4);
    let too_many: Vec<_> = report
        .failures
        .iter()
        .filter(|f| matches!(f.error, SliceError::TooManyHeights { .. }))
        .collect();
    assert_eq!(too_many.len(), 3);
    assert!(too_many.iter().all(|f| !f.error.is_fatal()));
    assert_eq!(report.images_written(), 0);
}

#[test]
fn too_many_tiles_skips_only_the_montage() {
    let out = tempfile::tempdir().unwrap();
    let config = SliceConfig {
        num_slices: 2,
        montage: true,
        resolution: ctslice::raster::Resolution::new(u32::MAX / 2 + 1, 1),
        ..Default::default()
    };
    // the degenerate sliver never allocates a tile, only the strip width is checked
    let report = process_model(&Sliver, out.path(), &config).unwrap();
    assert_eq!(report.degenerate, vec![0, 1]);
    assert!(!out.path().join(MONTAGE_FILE).exists());
}
