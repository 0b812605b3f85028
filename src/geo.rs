//! Great-circle distance/azimuth math and nearest-neighbor spacing.
//!
//! Distances use spherical-triangle formulas with the sphere radius taken
//! at the mid-latitude of the pair (WGS84 semi-axes). Neighbor search
//! ranks candidates in web-mercator pixel space, then reports the
//! great-circle distance and initial azimuth of the winner.

use crate::data_models::NeighborInfo;
use rayon::prelude::*;

pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

// WGS84
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0; // radius at equator, meters
const FLATTENING: f64 = 1.0 / 298.257223563;

fn semi_minor_axis() -> f64 {
    (1.0 - FLATTENING) * SEMI_MAJOR_AXIS
}

/// Earth radius in meters at a geodetic latitude (degrees).
fn radius_at_latitude(lat_deg: f64) -> f64 {
    let lat = lat_deg.to_radians();
    let a = SEMI_MAJOR_AXIS;
    let b = semi_minor_axis();
    let (sin_lat, cos_lat) = lat.sin_cos();
    (((a.powi(4) * cos_lat.powi(2) + b.powi(4) * sin_lat.powi(2))
        / (a.powi(2) * cos_lat.powi(2) + b.powi(2) * sin_lat.powi(2)))
    .sqrt())
}

/// Normalize an angle into [0, 360).
fn angle_fixup(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + 360.0
    } else if angle >= 360.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// Great-circle distance (nautical miles) and forward/reverse azimuths
/// (degrees) between two points given as (lng, lat) in degrees.
pub fn gc_dist_dir(lng1: f64, lat1: f64, lng2: f64, lat2: f64) -> (f64, f64, f64) {
    let a = (90.0 - lat2).to_radians();
    let b = (90.0 - lat1).to_radians();
    let gamma = (lng2 - lng1).to_radians();

    let c = f64::atan2(
        ((a.sin() * b.cos() - a.cos() * b.sin() * gamma.cos()).powi(2)
            + (b.sin() * gamma.sin()).powi(2))
        .sqrt(),
        a.cos() * b.cos() + a.sin() * b.sin() * gamma.cos(),
    );
    let alpha = f64::atan2(
        a.sin() * gamma.sin(),
        b.sin() * a.cos() - b.cos() * a.sin() * gamma.cos(),
    );
    let beta = f64::atan2(
        b.sin() * gamma.sin(),
        a.sin() * b.cos() - a.cos() * b.sin() * gamma.cos(),
    );

    let r = radius_at_latitude((lat1 + lat2) / 2.0);
    let dist_nmi = c * r / METERS_PER_NAUTICAL_MILE;
    let a1_to_2 = angle_fixup(360.0 + alpha.to_degrees());
    let a2_to_1 = angle_fixup(360.0 - beta.to_degrees());
    (dist_nmi, a1_to_2, a2_to_1)
}

/// A located record handed to the neighbor search.
#[derive(Debug, Clone, Copy)]
pub struct LocatedPoint {
    pub id: usize,
    pub lat: f64,
    pub lng: f64,
}

/// Web-mercator pixel coordinates at a fixed zoom, used only to rank
/// neighbor candidates.
fn mercator_xy(point: &LocatedPoint) -> (f64, f64) {
    let zoom = f64::from(1u32 << 10);
    let scale = 128.0 / std::f64::consts::PI * zoom;
    let lng = point.lng.to_radians();
    // Clamp so poles stay finite.
    let lat = point.lat.to_radians().clamp(-1.4844, 1.4844);
    let x = scale * (lng + std::f64::consts::PI);
    let y = scale * (std::f64::consts::PI - (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln());
    (x, y)
}

/// For each point, find the nearest *other* point and report the
/// great-circle distance and initial azimuth towards it. Returns one
/// entry per input point, in input order; `None` when there is no other
/// point to measure against.
///
/// Pure per-point work over a shared read-only slice, so the scan runs
/// as a rayon parallel map.
pub fn nearest_neighbors(points: &[LocatedPoint]) -> Vec<Option<NeighborInfo>> {
    if points.len() < 2 {
        return vec![None; points.len()];
    }

    let projected: Vec<(f64, f64)> = points.iter().map(mercator_xy).collect();

    (0..points.len())
        .into_par_iter()
        .map(|i| {
            let (xi, yi) = projected[i];
            let mut best: Option<(usize, f64)> = None;
            for (j, &(xj, yj)) in projected.iter().enumerate() {
                if j == i {
                    continue;
                }
                let d2 = (xj - xi).powi(2) + (yj - yi).powi(2);
                if best.map_or(true, |(_, bd2)| d2 < bd2) {
                    best = Some((j, d2));
                }
            }
            best.map(|(j, _)| {
                let (dist_nmi, azimuth, _) = gc_dist_dir(
                    points[i].lng,
                    points[i].lat,
                    points[j].lng,
                    points[j].lat,
                );
                NeighborInfo {
                    id: points[j].id,
                    dist_nmi,
                    azimuth,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_degree_of_latitude_is_about_sixty_nautical_miles() {
        let (dist, az_fwd, az_rev) = gc_dist_dir(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(dist, 60.0, max_relative = 0.01);
        // Due north going, due south coming back.
        assert_relative_eq!(az_fwd, 0.0, epsilon = 1e-6);
        assert_relative_eq!(az_rev, 180.0, epsilon = 1e-6);
    }

    #[test]
    fn equatorial_east_heading() {
        let (dist, az_fwd, _) = gc_dist_dir(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(dist, 60.0, max_relative = 0.01);
        assert_relative_eq!(az_fwd, 90.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_distance_pair() {
        let (dist, _, _) = gc_dist_dir(-122.4, 37.8, -122.4, 37.8);
        assert_relative_eq!(dist, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn nearest_of_collinear_points_is_the_closer_one() {
        let points = [
            LocatedPoint { id: 10, lat: 0.0, lng: 0.0 },
            LocatedPoint { id: 11, lat: 0.0, lng: 0.1 },
            LocatedPoint { id: 12, lat: 0.0, lng: 0.3 },
        ];
        let neighbors = nearest_neighbors(&points);
        assert_eq!(neighbors[0].unwrap().id, 11);
        assert_eq!(neighbors[1].unwrap().id, 10);
        assert_eq!(neighbors[2].unwrap().id, 11);
        assert_relative_eq!(neighbors[0].unwrap().dist_nmi, 6.0, max_relative = 0.01);
    }

    #[test]
    fn lone_point_has_no_neighbor() {
        let points = [LocatedPoint { id: 0, lat: 37.8, lng: -122.4 }];
        assert_eq!(nearest_neighbors(&points), vec![None]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(nearest_neighbors(&[]).is_empty());
    }
}
