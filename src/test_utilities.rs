#![allow(missing_docs)]
use std::fmt::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::PointSet;

pub const SEED: &[u8; 32] = b"wPYxAkIiHcEmSBAxQFoXFrpYToCe1B71";
pub const SEED2: &[u8; 32] = b"14LzG37Y9EHTcmLW8vBDqWwtYsCeVVyF";

pub fn seeded_rng(seed: &[u8; 32]) -> StdRng {
    StdRng::from_seed(*seed)
}

/// Writes a point set in the `<n> <d>` header plus one row per point layout accepted by
/// [crate::read_point_set].
pub fn to_text<P: PointSet>(points: &P) -> String {
    let mut result = String::new();
    writeln!(result, "{} {}", points.size(), points.dimension()).unwrap();
    for i in 0..points.size() {
        let row = (0..points.dimension())
            .map(|j| format!("{:?}", points.coord(i, j)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(result, "{}", row).unwrap();
    }
    result
}
