//! Built-in Kathmandu valley road network.
//!
//! Ten named junctions, coordinates in metres east/north of Thapathali.
//! Segment lengths are left to the coordinate fallback, so every road is
//! as long as the straight line between its ends.  `data/` holds the same
//! tables as CSV for `--junctions` / `--segments`.

use amb_spatial::{JunctionRecord, RoadNetwork, SegmentRecord, SpatialResult};

/// `(id, x, y, name)` for every junction.
const JUNCTIONS: [(u32, f64, f64, &str); 10] = [
    (1,    -300.0, -1_400.0, "Pulchowk"),
    (2,   1_800.0,    400.0, "Baneswor"),
    (3,       0.0,      0.0, "Thapathali"),
    (4,     600.0,    300.0, "Maitighar"),
    (5,   2_000.0, -2_000.0, "Gwarko"),
    (6,     300.0, -2_200.0, "Patan"),
    (7,    -800.0,  1_200.0, "RNAC"),
    (8,  -1_200.0,  4_000.0, "Balaju"),
    (9,   2_800.0,  5_000.0, "Kapan"),
    (10,  2_600.0,  2_600.0, "Chabel"),
];

/// Undirected roads as `(from, to)`.
const ROADS: [(u32, u32); 14] = [
    (3, 4),  // Thapathali – Maitighar
    (4, 2),  // Maitighar – Baneswor
    (3, 1),  // Thapathali – Pulchowk
    (1, 6),  // Pulchowk – Patan
    (6, 5),  // Patan – Gwarko
    (5, 2),  // Gwarko – Baneswor
    (3, 7),  // Thapathali – RNAC
    (4, 7),  // Maitighar – RNAC
    (7, 8),  // RNAC – Balaju
    (8, 9),  // Balaju – Kapan
    (9, 10), // Kapan – Chabel
    (10, 2), // Chabel – Baneswor
    (10, 4), // Chabel – Maitighar
    (1, 5),  // Pulchowk – Gwarko (ring road)
];

/// Names of the built-in junctions, in id order.
pub fn locations() -> impl Iterator<Item = &'static str> {
    JUNCTIONS.iter().map(|&(_, _, _, name)| name)
}

/// Build the built-in network.
pub fn build_network() -> SpatialResult<RoadNetwork> {
    let junctions: Vec<JunctionRecord> = JUNCTIONS
        .iter()
        .map(|&(id, x, y, name)| JunctionRecord::named(id, x, y, name))
        .collect();
    let segments: Vec<SegmentRecord> = ROADS
        .iter()
        .map(|&(from, to)| SegmentRecord::new(from, to, None))
        .collect();
    RoadNetwork::from_records(&junctions, &segments)
}
