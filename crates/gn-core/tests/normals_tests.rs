//! End-to-end properties of the grid normal estimator

use approx::assert_abs_diff_eq;
use glam::Vec3;
use gn_core::{
    EstimatorConfig, GridDims, GridNormalEstimator, Interval, as_vec4_slice,
    estimate_grid_normals, sample_heightfield,
};

const TOLERANCE: f32 = 1e-5;

/// Grid on the plane `origin + i * a + j * b`
fn planar_grid(dims: GridDims, origin: Vec3, a: Vec3, b: Vec3) -> Vec<[f32; 4]> {
    (0..dims.vertex_count())
        .map(|idx| {
            let (i, j) = dims.coords(idx);
            (origin + i as f32 * a + j as f32 * b).extend(1.0).to_array()
        })
        .collect()
}

fn assert_vec3_near(actual: Vec3, expected: Vec3, tolerance: f32) {
    assert_abs_diff_eq!(actual.x, expected.x, epsilon = tolerance);
    assert_abs_diff_eq!(actual.y, expected.y, epsilon = tolerance);
    assert_abs_diff_eq!(actual.z, expected.z, epsilon = tolerance);
}

fn tilted_plane() -> (Vec3, Vec3, Vec3, Vec3) {
    let origin = Vec3::new(2.0, -1.0, 3.0);
    let a = Vec3::new(1.0, 0.2, 0.5);
    let b = Vec3::new(-0.3, 1.0, 0.25);
    (origin, a, b, b.cross(a).normalize())
}

#[test]
fn test_planar_interior_normals() {
    let dims = GridDims::new(6, 5).unwrap();
    let (origin, a, b, expected) = tilted_plane();
    let out = estimate_grid_normals(&planar_grid(dims, origin, a, b), dims).unwrap();

    for j in 1..dims.height() - 1 {
        for i in 1..dims.width() - 1 {
            assert_vec3_near(out[dims.index(i, j)].normal(), expected, TOLERANCE);
        }
    }
}

#[test]
fn test_planar_boundary_normals() {
    let dims = GridDims::new(6, 5).unwrap();
    let (origin, a, b, expected) = tilted_plane();
    let out = estimate_grid_normals(&planar_grid(dims, origin, a, b), dims).unwrap();

    for (idx, vertex) in out.iter().enumerate() {
        let (i, j) = dims.coords(idx);
        let on_boundary = i == 0 || j == 0 || i == dims.width() - 1 || j == dims.height() - 1;
        if on_boundary {
            assert_vec3_near(vertex.normal(), expected, TOLERANCE);
        }
        assert_eq!(vertex.normal[3], 0.0);
    }
}

#[test]
fn test_corners_combine_edge_stencils() {
    let dims = GridDims::new(5, 5).unwrap();
    let (origin, a, b, expected) = tilted_plane();
    let out = estimate_grid_normals(&planar_grid(dims, origin, a, b), dims).unwrap();

    for (i, j) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
        assert_vec3_near(out[dims.index(i, j)].normal(), expected, TOLERANCE);
    }
}

#[test]
fn test_identical_rows_are_degenerate() {
    let dims = GridDims::new(5, 4).unwrap();
    let positions: Vec<[f32; 4]> = (0..dims.vertex_count())
        .map(|idx| {
            let (i, _) = dims.coords(idx);
            let x = i as f32;
            [x, 0.0, 0.25 * x * x, 1.0]
        })
        .collect();

    let out = estimate_grid_normals(&positions, dims).unwrap();
    for vertex in &out {
        assert_eq!(vertex.normal, [0.0, 0.0, 0.0, 0.0]);
        assert!(vertex.is_degenerate());
    }
}

#[test]
fn test_parametric_coordinate() {
    let dims = GridDims::new(4, 3).unwrap();
    let positions = planar_grid(dims, Vec3::ZERO, Vec3::X, Vec3::Y);
    let out = estimate_grid_normals(&positions, dims).unwrap();

    let param = out[dims.index(2, 1)].param;
    assert_abs_diff_eq!(param[0], 2.0 / 3.0, epsilon = TOLERANCE);
    assert_abs_diff_eq!(param[1], 0.5, epsilon = TOLERANCE);
    assert_eq!(param[2], 0.0);
    assert_eq!(param[3], 0.0);

    assert_eq!(out[dims.index(0, 0)].param, [0.0, 0.0, 0.0, 0.0]);
    assert_eq!(out[dims.index(3, 2)].param, [1.0, 1.0, 0.0, 0.0]);
}

#[test]
fn test_record_layout_passes_positions_through() {
    let dims = GridDims::new(7, 3).unwrap();
    let mut positions = planar_grid(dims, Vec3::ZERO, Vec3::X, Vec3::new(0.0, 1.0, 0.3));
    for (idx, p) in positions.iter_mut().enumerate() {
        p[3] = idx as f32 * 0.5;
    }

    let out = estimate_grid_normals(&positions, dims).unwrap();
    let flat = as_vec4_slice(&out);
    assert_eq!(flat.len(), 3 * dims.width() as usize * dims.height() as usize);
    assert_eq!(flat.len(), dims.output_len());
    for (idx, position) in positions.iter().enumerate() {
        assert_eq!(flat[idx * 3], *position);
        assert_eq!(flat[idx * 3 + 1], out[idx].normal);
        assert_eq!(flat[idx * 3 + 2], out[idx].param);
    }
}

#[test]
fn test_facing_direction() {
    // Plane z = x: +x rises, so cross(y_tangent, x_tangent) points to +x, -z
    let dims = GridDims::new(4, 4).unwrap();
    let positions = planar_grid(dims, Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0), Vec3::Y);
    let out = estimate_grid_normals(&positions, dims).unwrap();

    let expected = Vec3::new(1.0, 0.0, -1.0).normalize();
    for vertex in &out {
        assert_vec3_near(vertex.normal(), expected, TOLERANCE);
        assert!(vertex.normal().dot(-expected) < 0.0);
    }
}

#[test]
fn test_quadratic_heightfield_matches_analytic_normal() {
    // z = 0.5 x^2 - 0.25 y^2 + 0.1 x y, quadratic along each axis so the
    // three-point stencils are exact up to rounding
    let dims = GridDims::new(9, 7).unwrap();
    let h = |x: f32, y: f32| 0.5 * x * x - 0.25 * y * y + 0.1 * x * y;
    let positions = sample_heightfield(
        dims,
        Interval::new(-1.0, 1.0),
        Interval::new(-1.5, 1.5),
        h,
    );

    let out = estimate_grid_normals(&positions, dims).unwrap();
    for (idx, vertex) in out.iter().enumerate() {
        let [x, y, _, _] = positions[idx];
        let hx = x + 0.1 * y;
        let hy = -0.5 * y + 0.1 * x;
        let expected = Vec3::new(hx, hy, -1.0).normalize();
        assert_vec3_near(vertex.normal(), expected, 1e-4);
    }
}

#[test]
fn test_custom_epsilon_zeroes_small_normals() {
    // Very fine grid spacing: |cross| = 1e-6 per vertex
    let dims = GridDims::new(3, 3).unwrap();
    let positions = planar_grid(dims, Vec3::ZERO, Vec3::X * 1e-3, Vec3::Y * 1e-3);

    let default = estimate_grid_normals(&positions, dims).unwrap();
    assert!(default.iter().all(|v| v.is_degenerate()));

    let config = EstimatorConfig {
        degenerate_epsilon: 1e-8,
        ..EstimatorConfig::default()
    };
    let fine = GridNormalEstimator::with_config(dims, config)
        .unwrap()
        .estimate(&positions)
        .unwrap();
    for vertex in &fine {
        assert_vec3_near(vertex.normal(), Vec3::NEG_Z, TOLERANCE);
    }
}

#[test]
fn test_two_vertex_axes() {
    // Too short for three-point stencils: both axes of a 2x2 grid and the
    // rows of a 2x5 grid use the two-point difference
    let (origin, a, b, expected) = tilted_plane();
    for (width, height) in [(2, 2), (2, 5), (5, 2)] {
        let dims = GridDims::new(width, height).unwrap();
        let out = estimate_grid_normals(&planar_grid(dims, origin, a, b), dims).unwrap();
        assert_eq!(out.len(), dims.vertex_count());
        for vertex in &out {
            assert_vec3_near(vertex.normal(), expected, TOLERANCE);
        }
    }
}
