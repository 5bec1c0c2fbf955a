#![no_main]
use libfuzzer_sys::fuzz_target;
use miniball_points::{read_point_set, ArrayPointSet, PointSet};

fuzz_target!(|data: &[u8]| {
    if let Ok(points) = read_point_set::<ArrayPointSet, _>(data) {
        assert_eq!(points.coordinates().len(), points.size() * points.dimension());
        assert!(points.coordinates().iter().all(|c| c.is_finite()));
    }
});
