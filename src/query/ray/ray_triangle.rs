use crate::math::{Point, Real};
use crate::query::Ray;
use crate::shape::Triangle;
use num::Zero;

/// Which faces of a triangle a ray is allowed to hit.
///
/// A triangle `(a, b, c)` is front-facing for a ray when its vertices appear counter-clockwise
/// from the ray origin, i.e., when the ray direction points against `(b - a) × (c - a)`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum TriangleCulling {
    /// Both faces can be hit.
    #[default]
    None,
    /// Back faces are ignored.
    Back,
    /// Front faces are ignored.
    Front,
}

/// The result of a successful ray/triangle intersection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriangleRayHit {
    /// The ray parameter of the hit point.
    pub t: Real,
    /// Barycentric coordinate of the hit point relative to the triangle's second vertex.
    pub u: Real,
    /// Barycentric coordinate of the hit point relative to the triangle's third vertex.
    pub v: Real,
    /// `true` if the ray hit the front face of the triangle.
    pub front_face: bool,
}

impl Triangle {
    /// Casts a ray on this triangle, see [`ray_intersection_with_triangle`].
    #[inline]
    pub fn cast_ray(
        &self,
        ray: &Ray,
        t0: Real,
        t1: Real,
        culling: TriangleCulling,
    ) -> Option<TriangleRayHit> {
        ray_intersection_with_triangle(&self.a, &self.b, &self.c, ray, t0, t1, culling)
    }
}

/// Computes the intersection between a triangle and a ray using the Möller–Trumbore algorithm.
///
/// The hit point is `a + (b - a) * u + (c - a) * v`. Hits on the triangle edges are reported:
/// `u`, `v` and `u + v` are tested inclusively against `[0, 1]`. Only hits with `t` inside the
/// inclusive interval `[t0, t1]` are returned.
///
/// Rays parallel to the triangle plane never hit it, and degenerate triangles (zero area) are
/// never hit either.
pub fn ray_intersection_with_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    ray: &Ray,
    t0: Real,
    t1: Real,
    culling: TriangleCulling,
) -> Option<TriangleRayHit> {
    let e1 = *b - *a;
    let e2 = *c - *a;
    let pvec = ray.dir.cross(&e2);
    let det = e1.dot(&pvec);

    let culled = match culling {
        TriangleCulling::None => det.is_zero(),
        TriangleCulling::Back => det <= 0.0,
        TriangleCulling::Front => det >= 0.0,
    };

    // NaN determinants are rejected too.
    if culled || det.is_nan() {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray.origin - *a;
    let u = tvec.dot(&pvec) * inv_det;

    if u < 0.0 || u > 1.0 {
        return None;
    }

    let qvec = tvec.cross(&e1);
    let v = ray.dir.dot(&qvec) * inv_det;

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(&qvec) * inv_det;

    if t < t0 || t > t1 {
        return None;
    }

    Some(TriangleRayHit {
        t,
        u,
        v,
        front_face: det > 0.0,
    })
}
