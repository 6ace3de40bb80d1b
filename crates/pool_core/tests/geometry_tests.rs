use pool_core::geo::{haversine_m, path_length_m, Point};
use pool_core::overlap::{overlap_percent, DEFAULT_TOLERANCE_M};
use pool_core::polyline::{decode, encode};
use pool_core::resample::resample;
use pool_core::test_helpers::{
    east_of, straight_north_route, REFERENCE_POINTS, REFERENCE_POLYLINE, TEST_ORIGIN,
};

fn round5(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}

#[test]
fn reference_polyline_decodes_to_documented_coordinates() {
    let points = decode(REFERENCE_POLYLINE);
    let rounded: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (round5(p.lat), round5(p.lng)))
        .collect();
    assert_eq!(rounded, REFERENCE_POINTS.to_vec());
}

#[test]
fn haversine_of_a_point_with_itself_is_zero() {
    for p in [
        Point::new(0.0, 0.0),
        Point::new(-89.9, 179.9),
        TEST_ORIGIN,
    ] {
        assert_eq!(haversine_m(p, p), 0.0);
    }
}

#[test]
fn decoded_route_length_matches_encoded_geometry() {
    let route = straight_north_route(TEST_ORIGIN, 5_000.0, 21);
    let decoded = decode(&encode(&route));
    assert_eq!(decoded.len(), route.len());
    // 1e-5 degree quantisation moves each vertex by at most ~1 m.
    assert!((path_length_m(&decoded) - 5_000.0).abs() < 2.0);
}

#[test]
fn resampled_route_keeps_its_endpoints() {
    let mut route = straight_north_route(TEST_ORIGIN, 3_333.0, 7);
    route.push(east_of(route[6], 410.0));
    let out = resample(&route, 250.0);
    assert_eq!(out.first(), route.first());
    assert_eq!(out.last(), route.last());
    assert!(out.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn identity_overlap_is_full_for_any_real_route() {
    for len in [400.0, 2_750.0, 12_000.0] {
        let route = straight_north_route(TEST_ORIGIN, len, 5);
        assert_eq!(overlap_percent(&route, &route, DEFAULT_TOLERANCE_M), 100.0);
    }
}

#[test]
fn routes_beyond_tolerance_do_not_overlap() {
    let a = straight_north_route(TEST_ORIGIN, 3_000.0, 4);
    let b = straight_north_route(east_of(TEST_ORIGIN, 152.0), 3_000.0, 4);
    assert_eq!(overlap_percent(&a, &b, 150.0), 0.0);
}
