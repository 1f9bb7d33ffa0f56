//! Triangle meshes shared by the tests, as flat vertex lists (three vertices per triangle).

use meshbvh3d::math::{Point, Real, Vector};
use meshbvh3d::query::Ray;

/// A `subdivisions x subdivisions` grid of quads covering `[-1, 1]²` in the plane `z = 0`.
///
/// Every triangle faces `+z`.
pub fn plane(subdivisions: usize) -> Vec<Point<Real>> {
    let step = 2.0 / subdivisions as Real;
    let mut vertices = Vec::with_capacity(subdivisions * subdivisions * 6);

    for i in 0..subdivisions {
        for j in 0..subdivisions {
            let x0 = -1.0 + i as Real * step;
            let y0 = -1.0 + j as Real * step;
            let x1 = x0 + step;
            let y1 = y0 + step;

            vertices.extend_from_slice(&[
                Point::new(x0, y0, 0.0),
                Point::new(x1, y0, 0.0),
                Point::new(x1, y1, 0.0),
                Point::new(x0, y0, 0.0),
                Point::new(x1, y1, 0.0),
                Point::new(x0, y1, 0.0),
            ]);
        }
    }

    vertices
}

/// The eight corners of the cube `[-1, 1]³` and its twelve outward-facing triangles.
pub fn indexed_cube() -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let corners = (0..8)
        .map(|i| {
            Point::new(
                if i & 1 == 0 { -1.0 } else { 1.0 },
                if i & 2 == 0 { -1.0 } else { 1.0 },
                if i & 4 == 0 { -1.0 } else { 1.0 },
            )
        })
        .collect();

    let indices = vec![
        // -x
        [0, 4, 6],
        [0, 6, 2],
        // +x
        [1, 3, 7],
        [1, 7, 5],
        // -y
        [0, 1, 5],
        [0, 5, 4],
        // +y
        [2, 6, 7],
        [2, 7, 3],
        // -z
        [0, 2, 3],
        [0, 3, 1],
        // +z
        [4, 5, 7],
        [4, 7, 6],
    ];

    (corners, indices)
}

/// The cube `[-1, 1]³` as twelve outward-facing triangles.
pub fn cube() -> Vec<Point<Real>> {
    let (corners, indices) = indexed_cube();
    indices
        .iter()
        .flat_map(|tri| tri.iter().map(|i| corners[*i as usize]))
        .collect()
}

/// A unit UV-sphere centered at the origin.
///
/// The triangles touching the poles are degenerate.
pub fn sphere(stacks: usize, slices: usize) -> Vec<Point<Real>> {
    let vertex = |i: usize, j: usize| {
        let theta = core::f64::consts::PI * i as f64 / stacks as f64;
        let phi = core::f64::consts::TAU * j as f64 / slices as f64;
        Point::new(
            (theta.sin() * phi.cos()) as Real,
            (theta.sin() * phi.sin()) as Real,
            theta.cos() as Real,
        )
    };
    let mut vertices = Vec::with_capacity(stacks * slices * 6);

    for i in 0..stacks {
        for j in 0..slices {
            vertices.extend_from_slice(&[
                vertex(i, j),
                vertex(i + 1, j),
                vertex(i + 1, j + 1),
                vertex(i, j),
                vertex(i + 1, j + 1),
                vertex(i, j + 1),
            ]);
        }
    }

    vertices
}

/// A ray starting on the sphere of radius `distance` and aiming at a random point of
/// `[-1.5, 1.5]³`. Some of these rays miss the test meshes.
pub fn random_ray(rng: &mut oorandom::Rand32, distance: Real) -> Ray {
    let mut coord = || rng.rand_float() as Real * 2.0 - 1.0;
    let mut origin = Vector::new(coord(), coord(), coord());

    while origin.norm_squared() < 1.0e-3 {
        origin = Vector::new(coord(), coord(), coord());
    }

    let origin = Point::from(origin.normalize() * distance);
    let target = Point::new(coord(), coord(), coord()) * 1.5;

    Ray::new(origin, (target - origin).normalize())
}
