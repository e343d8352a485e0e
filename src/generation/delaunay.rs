//! Delaunay triangulation via convex hull
//!
//! Lifting planar sites onto the paraboloid `z = x² + y²` turns the Delaunay
//! triangulation into the lower convex hull of the lifted points. This module
//! wraps parry3d's convex hull and maps its faces back to site indices.

use std::collections::HashMap;

use glam::DVec2;
use parry3d::math::{Point, Vector};
use parry3d::transformation;

/// Faces whose outward normal has a z component above this (relative) value
/// are treated as upper or vertical hull faces and discarded.
const LOWER_FACE_EPSILON: f32 = 1.0e-6;

/// Lifted points closer than this to a face plane count as lying on it.
/// Lifted coordinates are in [-1, 1] x [-1, 1] x [0, 2].
const PLANE_EPSILON: f32 = 1.0e-5;

/// Triangles of a Delaunay triangulation
///
/// Each triangle holds three site indices, ordered counter-clockwise.
#[derive(Debug, Clone, Default)]
pub struct DelaunayResult {
    /// Triangle site indices (counter-clockwise)
    pub triangles: Vec<[usize; 3]>,
}

/// Triangulate `sites`, which must contain at least three non-collinear points
///
/// The Delaunay triangulation of planar points is the lower convex hull of
/// the points lifted onto the paraboloid `z = x² + y²`. When every site lies
/// on one circle the lifted points are coplanar and the hull is flat; any
/// triangulation is then Delaunay, and the sites are fanned in angular order.
///
/// Duplicate sites collapse onto their first occurrence; later copies never
/// appear in a triangle.
///
/// # Arguments
///
/// * `sites` - Planar site positions, not all collinear
///
/// # Returns
///
/// DelaunayResult with counter-clockwise triangles indexing into `sites`
///
/// # Performance
///
/// O(n log n) for the hull, plus O(n) per face when a face's orientation
/// cannot be read from the hull centroid
pub fn compute_delaunay(sites: &[DVec2]) -> DelaunayResult {
    let lifted = lift_sites(sites);
    let (hull_vertices, hull_faces) = transformation::convex_hull(&lifted);

    // The hull reorders and drops points; recover site indices by exact position
    let mut site_by_position: HashMap<(u32, u32), usize> = HashMap::new();
    for (index, point) in lifted.iter().enumerate() {
        site_by_position
            .entry((point.x.to_bits(), point.y.to_bits()))
            .or_insert(index);
    }
    let hull_to_site: Vec<Option<usize>> = hull_vertices
        .iter()
        .map(|p| site_by_position.get(&(p.x.to_bits(), p.y.to_bits())).copied())
        .collect();

    let centroid = hull_vertices
        .iter()
        .fold(Vector::zeros(), |acc: Vector<f32>, p| acc + p.coords)
        / hull_vertices.len().max(1) as f32;

    let mut triangles = Vec::new();
    for face in &hull_faces {
        let [a, b, c] = face.map(|i| hull_vertices[i as usize]);
        let mut normal = (b - a).cross(&(c - a));
        let length = normal.norm();
        if length == 0.0 {
            continue;
        }

        // Orient outward against the interior: the centroid when it sits
        // clearly off the face plane, else the farthest hull vertex
        let mut inside = normal.dot(&(centroid - a.coords)) / length;
        if inside.abs() <= PLANE_EPSILON {
            inside = farthest_offset(&hull_vertices, a, &normal, length);
        }
        if inside.abs() <= PLANE_EPSILON {
            let mut distinct: Vec<usize> = site_by_position.values().copied().collect();
            distinct.sort_unstable();
            return DelaunayResult {
                triangles: fan_cocircular(&distinct, sites),
            };
        }
        if inside > 0.0 {
            normal = -normal;
        }
        if normal.z >= -LOWER_FACE_EPSILON * length {
            continue;
        }

        let ids = face.map(|i| hull_to_site[i as usize]);
        if let [Some(i), Some(j), Some(k)] = ids {
            triangles.push(counter_clockwise([i, j, k], sites));
        }
    }

    DelaunayResult { triangles }
}

/// Signed distance of the hull vertex farthest from the plane through `a`
fn farthest_offset(
    hull_vertices: &[Point<f32>],
    a: Point<f32>,
    normal: &Vector<f32>,
    length: f32,
) -> f32 {
    hull_vertices
        .iter()
        .map(|&p| normal.dot(&(p - a)) / length)
        .fold(0.0, |best: f32, d| if d.abs() > best.abs() { d } else { best })
}

/// Fan triangulation of sites that all lie on one circle
///
/// Sites are sorted by angle around their mean, which makes the polygon
/// convex and every fan triangle counter-clockwise.
fn fan_cocircular(distinct: &[usize], sites: &[DVec2]) -> Vec<[usize; 3]> {
    if distinct.len() < 3 {
        return Vec::new();
    }

    let center = distinct.iter().map(|&i| sites[i]).sum::<DVec2>() / distinct.len() as f64;
    let mut order = distinct.to_vec();
    order.sort_by(|&i, &j| {
        let (oi, oj) = (sites[i] - center, sites[j] - center);
        let ti = oi.y.atan2(oi.x);
        let tj = oj.y.atan2(oj.x);
        ti.partial_cmp(&tj).unwrap_or(std::cmp::Ordering::Equal)
    });

    order
        .windows(2)
        .skip(1)
        .map(|pair| counter_clockwise([order[0], pair[0], pair[1]], sites))
        .collect()
}

/// Whether every site lies on one line (or fewer than three distinct sites exist)
pub fn is_degenerate(sites: &[DVec2]) -> bool {
    let Some(&origin) = sites.first() else {
        return true;
    };
    let far = sites
        .iter()
        .copied()
        .max_by(|a, b| {
            origin
                .distance_squared(*a)
                .partial_cmp(&origin.distance_squared(*b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(origin);

    let axis = far - origin;
    let length_squared = axis.length_squared();
    if length_squared == 0.0 {
        return true;
    }

    sites.iter().all(|&p| {
        let offset = p - origin;
        let cross = axis.perp_dot(offset);
        cross * cross <= 1.0e-18 * length_squared * offset.length_squared().max(length_squared)
    })
}

/// Lift sites onto the paraboloid after centering them on the unit square
///
/// Normalizing first keeps the f32 hull well conditioned regardless of the
/// domain size.
fn lift_sites(sites: &[DVec2]) -> Vec<Point<f32>> {
    let min = sites.iter().copied().fold(DVec2::splat(f64::INFINITY), DVec2::min);
    let max = sites.iter().copied().fold(DVec2::splat(f64::NEG_INFINITY), DVec2::max);
    let center = (min + max) * 0.5;
    let half_extent = ((max - min) * 0.5).max_element().max(f64::MIN_POSITIVE);

    sites
        .iter()
        .map(|&site| {
            let p = (site - center) / half_extent;
            Point::new(p.x as f32, p.y as f32, p.length_squared() as f32)
        })
        .collect()
}

fn counter_clockwise(tri: [usize; 3], sites: &[DVec2]) -> [usize; 3] {
    let [a, b, c] = tri;
    let area = (sites[b] - sites[a]).perp_dot(sites[c] - sites[a]);
    if area < 0.0 {
        [a, c, b]
    } else {
        tri
    }
}

/// Circumcenter of a triangle
///
/// Falls back to the vertex average for a degenerate triangle.
pub fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> DVec2 {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * ab.perp_dot(ac);
    if d.abs() < f64::EPSILON {
        return (a + b + c) / 3.0;
    }

    let ab2 = ab.length_squared();
    let ac2 = ac.length_squared();
    a + DVec2::new(ac.y * ab2 - ab.y * ac2, ab.x * ac2 - ac.x * ab2) / d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_with_center() {
        let sites = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
            DVec2::new(2.0, 2.1),
        ];
        let result = compute_delaunay(&sites);

        // Four triangles fan around the interior site
        assert_eq!(result.triangles.len(), 4);
        for tri in &result.triangles {
            assert!(tri.contains(&4));
            let [a, b, c] = tri.map(|i| sites[i]);
            assert!((b - a).perp_dot(c - a) > 0.0, "triangles must be counter-clockwise");
        }
    }

    #[test]
    fn test_empty_circumcircles() {
        let sites: Vec<DVec2> = (0..30)
            .map(|i| {
                let t = i as f64;
                DVec2::new((t * 7.3) % 10.0, (t * 3.7 + t * t * 0.11) % 10.0)
            })
            .collect();
        let result = compute_delaunay(&sites);
        assert!(!result.triangles.is_empty());

        for tri in &result.triangles {
            let [a, b, c] = tri.map(|i| sites[i]);
            let center = circumcenter(a, b, c);
            let radius = center.distance(a);
            for (index, site) in sites.iter().enumerate() {
                if tri.contains(&index) {
                    continue;
                }
                assert!(center.distance(*site) >= radius * (1.0 - 1.0e-3));
            }
        }
    }

    #[test]
    fn test_circumcenter_equidistant() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(4.0, 0.0);
        let c = DVec2::new(0.0, 3.0);
        let center = circumcenter(a, b, c);
        assert!((center - DVec2::new(2.0, 1.5)).length() < 1.0e-12);
    }

    #[test]
    fn test_three_sites_form_one_triangle() {
        let sites = vec![
            DVec2::new(9.32, 7.91),
            DVec2::new(5.29, 4.93),
            DVec2::new(3.57, 9.78),
        ];
        let result = compute_delaunay(&sites);

        assert_eq!(result.triangles.len(), 1);
        let [a, b, c] = result.triangles[0].map(|i| sites[i]);
        assert!((b - a).perp_dot(c - a) > 0.0);
    }

    #[test]
    fn test_cocircular_sites_are_fanned() {
        for k in 3..9 {
            for rotation in 0..20 {
                let offset = rotation as f64 * 0.137;
                let sites: Vec<DVec2> = (0..k)
                    .map(|i| {
                        let angle = offset + i as f64 * std::f64::consts::TAU / k as f64;
                        DVec2::new(5.0, 5.0) + DVec2::new(angle.cos(), angle.sin()) * 3.0
                    })
                    .collect();
                let result = compute_delaunay(&sites);

                assert_eq!(result.triangles.len(), k - 2, "{}-gon, rotation {}", k, rotation);
                for tri in &result.triangles {
                    let [a, b, c] = tri.map(|i| sites[i]);
                    assert!((b - a).perp_dot(c - a) > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_detection() {
        assert!(is_degenerate(&[]));
        assert!(is_degenerate(&[DVec2::ONE, DVec2::ONE]));
        assert!(is_degenerate(&[
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(3.0, 3.0)
        ]));
        assert!(!is_degenerate(&[
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0)
        ]));
    }
}
