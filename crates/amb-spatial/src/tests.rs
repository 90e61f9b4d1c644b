//! Unit tests for amb-spatial.
//!
//! All tests use hand-crafted networks.

#[cfg(test)]
mod helpers {
    use amb_core::{JunctionId, Point, SegmentId};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    pub const A: JunctionId = JunctionId(1);
    pub const B: JunctionId = JunctionId(2);
    pub const C: JunctionId = JunctionId(3);
    pub const D: JunctionId = JunctionId(4);

    /// Diamond network:
    ///
    /// ```text
    ///        B
    ///   2  /   \  2
    ///     A     D
    ///   1  \   /  1
    ///        C
    /// ```
    ///
    /// Returns `(network, [ab, bd, ac, cd])`.
    pub fn diamond() -> (RoadNetwork, [SegmentId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        b.add_named_junction(A, Point::new(0.0, 0.0), "A").unwrap();
        b.add_named_junction(B, Point::new(1.0, 1.0), "B").unwrap();
        b.add_named_junction(C, Point::new(0.5, -0.5), "C").unwrap();
        b.add_named_junction(D, Point::new(1.0, 0.0), "D").unwrap();
        let ab = b.add_segment(A, B, Some(2.0)).unwrap();
        let bd = b.add_segment(B, D, Some(2.0)).unwrap();
        let ac = b.add_segment(A, C, Some(1.0)).unwrap();
        let cd = b.add_segment(C, D, Some(1.0)).unwrap();
        (b.build(), [ab, bd, ac, cd])
    }

    /// `w × h` grid with unit spacing; junction id = `y * w + x + 1`.
    /// Lengths are derived from coordinates.
    pub fn grid(w: u32, h: u32) -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        let id = |x: u32, y: u32| JunctionId(y * w + x + 1);
        for y in 0..h {
            for x in 0..w {
                b.add_junction(id(x, y), Point::new(x as f64, y as f64)).unwrap();
            }
        }
        for y in 0..h {
            for x in 0..w {
                if x + 1 < w {
                    b.add_segment(id(x, y), id(x + 1, y), None).unwrap();
                }
                if y + 1 < h {
                    b.add_segment(id(x, y), id(x, y + 1), None).unwrap();
                }
            }
        }
        b.build()
    }

    /// Every simple path from `from` to `to`, as segment lists.
    pub fn all_simple_paths(net: &RoadNetwork, from: JunctionId, to: JunctionId) -> Vec<Vec<SegmentId>> {
        fn walk(
            net: &RoadNetwork,
            at: JunctionId,
            to: JunctionId,
            visited: &mut Vec<JunctionId>,
            segs: &mut Vec<SegmentId>,
            out: &mut Vec<Vec<SegmentId>>,
        ) {
            if at == to {
                out.push(segs.clone());
                return;
            }
            let next: Vec<_> = net.neighbors(at).unwrap().collect();
            for inc in next {
                if visited.contains(&inc.neighbor) {
                    continue;
                }
                visited.push(inc.neighbor);
                segs.push(inc.segment);
                walk(net, inc.neighbor, to, visited, segs, out);
                segs.pop();
                visited.pop();
            }
        }
        let mut out = Vec::new();
        walk(net, from, to, &mut vec![from], &mut Vec::new(), &mut out);
        out
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use amb_core::{JunctionId, Point};
    use crate::{RoadNetworkBuilder, SpatialError};
    use super::helpers::*;

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.junction_count(), 0);
        assert_eq!(net.segment_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn duplicate_junction_rejected() {
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        let err = b.add_junction(A, Point::new(1.0, 0.0)).unwrap_err();
        assert!(matches!(err, SpatialError::DuplicateId(id) if id == A));
        assert_eq!(b.junction_count(), 1);
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        let err = b.add_segment(A, B, Some(1.0)).unwrap_err();
        assert!(matches!(err, SpatialError::UnknownJunction(id) if id == B));
        assert_eq!(b.segment_count(), 0);
    }

    #[test]
    fn length_derived_from_coordinates() {
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        b.add_junction(B, Point::new(6.0, 8.0)).unwrap();
        let s = b.add_segment(A, B, None).unwrap();
        let net = b.build();
        assert_eq!(net.length(s), 10.0);
    }

    #[test]
    fn bad_lengths_rejected() {
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        b.add_junction(B, Point::new(0.0, 0.0)).unwrap(); // coincident
        assert!(matches!(b.add_segment(A, B, None), Err(SpatialError::MalformedInput(_))));
        assert!(matches!(b.add_segment(A, B, Some(0.0)), Err(SpatialError::MalformedInput(_))));
        assert!(matches!(b.add_segment(A, B, Some(-3.0)), Err(SpatialError::MalformedInput(_))));
        assert!(matches!(b.add_segment(A, B, Some(f64::INFINITY)), Err(SpatialError::MalformedInput(_))));
        assert!(matches!(b.add_segment(A, A, Some(1.0)), Err(SpatialError::MalformedInput(_))));
        // Coincident junctions are fine with an explicit length.
        assert!(b.add_segment(A, B, Some(2.0)).is_ok());
    }

    #[test]
    fn reserved_id_and_bad_coordinate_rejected() {
        let mut b = RoadNetworkBuilder::new();
        assert!(b.add_junction(JunctionId::INVALID, Point::new(0.0, 0.0)).is_err());
        assert!(b.add_junction(A, Point::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut b = RoadNetworkBuilder::new();
        b.add_named_junction(A, Point::new(0.0, 0.0), "Patan").unwrap();
        assert!(matches!(
            b.add_named_junction(B, Point::new(1.0, 0.0), "Patan"),
            Err(SpatialError::MalformedInput(_))
        ));
    }

    #[test]
    fn neighbors_and_degree() {
        let (net, [ab, _, ac, _]) = diamond();
        let mut around_a: Vec<_> = net.neighbors(A).unwrap().map(|i| (i.segment, i.neighbor)).collect();
        around_a.sort();
        assert_eq!(around_a, vec![(ab, B), (ac, C)]);
        assert_eq!(net.degree(D), 2);
        assert_eq!(net.degree(JunctionId(99)), 0);
        assert!(matches!(net.neighbors(JunctionId(99)), Err(SpatialError::UnknownJunction(_))));
    }

    #[test]
    fn one_way_has_no_return_half_edge() {
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        b.add_junction(B, Point::new(1.0, 0.0)).unwrap();
        b.add_one_way_segment(A, B, None).unwrap();
        let net = b.build();
        assert_eq!(net.degree(A), 1);
        assert_eq!(net.degree(B), 0);
        assert!(net.segment_between(B, A).is_none());
    }

    #[test]
    fn names_and_endpoints() {
        let (net, [ab, ..]) = diamond();
        assert_eq!(net.junction_by_name("C"), Some(C));
        assert_eq!(net.junction_name(B), Some("B"));
        assert_eq!(net.label(D), "D");
        assert_eq!(net.segment_endpoints(ab).unwrap(), (A, B));
        assert_eq!(net.opposite(ab, B).unwrap(), A);
        assert!(net.opposite(ab, D).is_err());
        assert_eq!(net.segment_between(B, A), Some(ab));
    }

    #[test]
    fn heuristic_scale_tracks_short_segments() {
        let (net, _) = diamond();
        // Every declared length is at least its coordinate distance.
        assert_eq!(net.heuristic_scale(), 1.0);

        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        b.add_junction(B, Point::new(10.0, 0.0)).unwrap();
        b.add_segment(A, B, Some(4.0)).unwrap();
        assert!((b.build().heuristic_scale() - 0.4).abs() < 1e-12);
    }
}

// ── Costs & congestion ────────────────────────────────────────────────────────

#[cfg(test)]
mod congestion {
    use amb_core::SegmentId;
    use crate::{SpatialError, MIN_CONGESTION};
    use super::helpers::*;

    #[test]
    fn cost_is_length_times_congestion() {
        let (mut net, [ab, bd, ac, cd]) = diamond();
        for s in [ab, bd, ac, cd] {
            assert_eq!(net.congestion(s), MIN_CONGESTION);
            assert_eq!(net.current_cost(s), net.length(s));
        }
        net.update_congestion(bd, 2.5).unwrap();
        assert_eq!(net.current_cost(bd), 5.0);
        for s in net.segments() {
            assert!(net.current_cost(s) > 0.0);
            assert_eq!(net.current_cost(s), net.length(s) * net.congestion(s));
        }
    }

    #[test]
    fn zero_factor_rejected_and_value_kept() {
        let (mut net, [ab, ..]) = diamond();
        net.update_congestion(ab, 3.0).unwrap();
        let before = net.current_cost(ab);

        let err = net.update_congestion(ab, 0.0).unwrap_err();
        assert!(matches!(err, SpatialError::InvalidCongestion { segment, factor } if segment == ab && factor == 0.0));
        assert_eq!(net.current_cost(ab), before);
    }

    #[test]
    fn sub_minimum_and_non_finite_rejected() {
        let (mut net, [ab, ..]) = diamond();
        for bad in [-1.0, 0.5, 0.999, f64::NAN, f64::INFINITY] {
            assert!(net.update_congestion(ab, bad).is_err(), "{bad} accepted");
        }
        assert_eq!(net.congestion(ab), MIN_CONGESTION);
    }

    #[test]
    fn unknown_segment_rejected() {
        let (mut net, _) = diamond();
        assert!(matches!(
            net.update_congestion(SegmentId(40), 2.0),
            Err(SpatialError::UnknownSegment(_))
        ));
    }

    #[test]
    fn snapshot_is_a_copy_and_reset_restores_free_flow() {
        let (mut net, [ab, ..]) = diamond();
        net.update_congestion(ab, 4.0).unwrap();
        let snap = net.congestion_factors();
        net.update_congestion(ab, 2.0).unwrap();
        assert_eq!(snap[ab.index()], 4.0);

        net.reset_congestion();
        assert!(net.congestion_factors().iter().all(|&f| f == MIN_CONGESTION));
    }

    #[test]
    fn set_factors_restores_a_copy() {
        let (mut net, [ab, _, ac, _]) = diamond();
        net.update_congestion(ac, 3.0).unwrap();
        let saved = net.congestion_factors();
        net.reset_congestion();
        net.set_congestion_factors(&saved).unwrap();
        assert_eq!(net.congestion(ac), 3.0);
        assert_eq!(net.congestion(ab), MIN_CONGESTION);
    }

    #[test]
    fn set_factors_is_all_or_nothing() {
        let (mut net, [ab, bd, ..]) = diamond();
        net.update_congestion(ab, 2.0).unwrap();

        let err = net.set_congestion_factors(&[4.0, 0.5, 4.0, 4.0]).unwrap_err();
        assert!(matches!(err, SpatialError::InvalidCongestion { segment, .. } if segment == bd));
        assert_eq!(net.congestion_factors(), vec![2.0, 1.0, 1.0, 1.0]);

        let err = net.set_congestion_factors(&[4.0]).unwrap_err();
        assert!(matches!(err, SpatialError::MalformedInput(_)));
        assert_eq!(net.congestion(ab), 2.0);
    }

    #[test]
    fn debug_output_summarises() {
        let (net, _) = diamond();
        let text = format!("{net:?}");
        assert!(text.contains("junctions: 4") && text.contains("segments: 4"), "{text}");
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use amb_core::Point;
    use crate::RoadNetworkBuilder;
    use super::helpers::*;

    #[test]
    fn snap_nearest() {
        let (net, _) = diamond();
        assert_eq!(net.snap_to_junction(Point::new(0.1, 0.1)), Some(A));
        assert_eq!(net.snap_to_junction(Point::new(1.4, 0.1)), Some(D));
    }

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetworkBuilder::new().build();
        assert!(net.snap_to_junction(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn k_nearest_order() {
        let (net, _) = diamond();
        let nearest = net.k_nearest_junctions(Point::new(0.0, 0.0), 2);
        assert_eq!(nearest, vec![A, C]);
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use amb_core::{JunctionId, Point, SimRng};
    use crate::{AStarPathFinder, DijkstraPathFinder, PathFinder, RoadNetworkBuilder, Route, SpatialError};
    use super::helpers::*;

    fn finders() -> [(&'static str, Box<dyn PathFinder>); 2] {
        [("dijkstra", Box::new(DijkstraPathFinder)), ("astar", Box::new(AStarPathFinder))]
    }

    #[test]
    fn diamond_prefers_cheap_side_then_reroutes_under_congestion() {
        for (name, finder) in finders() {
            let (mut net, [ab, bd, ac, cd]) = diamond();

            let r = finder.find_shortest_path(&net, A, D).unwrap();
            assert_eq!(r.junctions, vec![A, C, D], "{name}");
            assert_eq!(r.segments, vec![ac, cd], "{name}");
            assert_eq!(r.cost, 2.0, "{name}");

            net.update_congestion(ac, 5.0).unwrap();
            let r = finder.find_shortest_path(&net, A, D).unwrap();
            assert_eq!(r.junctions, vec![A, B, D], "{name}");
            assert_eq!(r.segments, vec![ab, bd], "{name}");
            assert_eq!(r.cost, 4.0, "{name}");
        }
    }

    #[test]
    fn same_source_and_destination_is_trivial() {
        let (net, _) = diamond();
        for (_, finder) in finders() {
            let r = finder.find_shortest_path(&net, B, B).unwrap();
            assert!(r.is_trivial());
            assert_eq!(r, Route::trivial(B));
            assert_eq!(r.cost, 0.0);
        }
    }

    #[test]
    fn unknown_endpoints() {
        let (net, _) = diamond();
        for (_, finder) in finders() {
            assert!(matches!(
                finder.find_shortest_path(&net, JunctionId(77), D),
                Err(SpatialError::UnknownJunction(JunctionId(77)))
            ));
            assert!(matches!(
                finder.find_shortest_path(&net, A, JunctionId(78)),
                Err(SpatialError::UnknownJunction(JunctionId(78)))
            ));
        }
    }

    #[test]
    fn disconnected_is_no_path() {
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        b.add_junction(B, Point::new(1.0, 0.0)).unwrap();
        let net = b.build();
        for (_, finder) in finders() {
            assert!(matches!(
                finder.find_shortest_path(&net, A, B),
                Err(SpatialError::NoPath { from, to }) if from == A && to == B
            ));
        }
    }

    #[test]
    fn one_way_blocks_return() {
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        b.add_junction(B, Point::new(1.0, 0.0)).unwrap();
        b.add_one_way_segment(A, B, None).unwrap();
        let net = b.build();
        assert!(DijkstraPathFinder.find_shortest_path(&net, A, B).is_ok());
        assert!(DijkstraPathFinder.find_shortest_path(&net, B, A).is_err());
    }

    #[test]
    fn equal_cost_prefers_lexicographically_smaller_sequence() {
        // Square A-B-D / A-C-D, all unit length.  C's segments go in first so
        // insertion order cannot explain the outcome.
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        b.add_junction(B, Point::new(0.0, 1.0)).unwrap();
        b.add_junction(C, Point::new(1.0, 0.0)).unwrap();
        b.add_junction(D, Point::new(1.0, 1.0)).unwrap();
        b.add_segment(A, C, None).unwrap();
        b.add_segment(C, D, None).unwrap();
        b.add_segment(A, B, None).unwrap();
        b.add_segment(B, D, None).unwrap();
        let net = b.build();

        for (name, finder) in finders() {
            let r = finder.find_shortest_path(&net, A, D).unwrap();
            assert_eq!(r.junctions, vec![A, B, D], "{name}");
            let back = finder.find_shortest_path(&net, D, A).unwrap();
            assert_eq!(back.junctions, vec![D, B, A], "{name}");
        }
    }

    #[test]
    fn equal_cost_prefers_fewer_hops() {
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        b.add_junction(B, Point::new(1.0, 0.0)).unwrap();
        b.add_junction(D, Point::new(2.0, 0.0)).unwrap();
        b.add_segment(A, B, Some(1.0)).unwrap();
        b.add_segment(B, D, Some(1.0)).unwrap();
        let direct = b.add_segment(A, D, Some(2.0)).unwrap();
        let net = b.build();

        for (name, finder) in finders() {
            let r = finder.find_shortest_path(&net, A, D).unwrap();
            assert_eq!(r.segments, vec![direct], "{name}");
            assert_eq!(r.hops(), 1);
        }
    }

    #[test]
    fn repeated_queries_are_identical() {
        let mut net = grid(5, 5);
        let mut rng = SimRng::new(9);
        let segs: Vec<_> = net.segments().collect();
        for s in segs {
            let f = rng.gen_range(1.0..3.0);
            net.update_congestion(s, f).unwrap();
        }
        let first = DijkstraPathFinder.find_shortest_path(&net, JunctionId(1), JunctionId(25)).unwrap();
        for _ in 0..5 {
            let again = DijkstraPathFinder.find_shortest_path(&net, JunctionId(1), JunctionId(25)).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn route_is_no_worse_than_any_simple_path() {
        let mut net = grid(3, 3);
        let mut rng = SimRng::new(1234);
        for round in 0..10 {
            let segs: Vec<_> = net.segments().collect();
            for s in segs {
                let f = rng.gen_range(1.0..6.0);
                net.update_congestion(s, f).unwrap();
            }
            let best = DijkstraPathFinder.find_shortest_path(&net, JunctionId(1), JunctionId(9)).unwrap();
            assert!((best.current_cost(&net) - best.cost).abs() < 1e-9);
            for path in all_simple_paths(&net, JunctionId(1), JunctionId(9)) {
                assert!(best.cost <= net.path_cost(&path) + 1e-9, "round {round}");
            }
        }
    }

    #[test]
    fn astar_matches_dijkstra() {
        let mut net = grid(6, 4);
        let mut rng = SimRng::new(77);
        for _ in 0..20 {
            let segs: Vec<_> = net.segments().collect();
            for s in segs {
                let f = rng.gen_range(1.0..4.0);
                net.update_congestion(s, f).unwrap();
            }
            let from = JunctionId(rng.gen_range(1..=24));
            let to = JunctionId(rng.gen_range(1..=24));
            let d = DijkstraPathFinder.find_shortest_path(&net, from, to).unwrap();
            let a = AStarPathFinder.find_shortest_path(&net, from, to).unwrap();
            assert!((d.cost - a.cost).abs() < 1e-9);
            assert_eq!(d.junctions, a.junctions);
        }
    }

    #[test]
    fn astar_stays_optimal_with_short_explicit_lengths() {
        // The direct A–D road is drawn far apart but declared short, so a
        // raw straight-line heuristic would overestimate through it.
        let mut b = RoadNetworkBuilder::new();
        b.add_junction(A, Point::new(0.0, 0.0)).unwrap();
        b.add_junction(B, Point::new(5.0, 5.0)).unwrap();
        b.add_junction(D, Point::new(10.0, 0.0)).unwrap();
        b.add_segment(A, B, None).unwrap();
        b.add_segment(B, D, None).unwrap();
        let shortcut = b.add_segment(A, D, Some(3.0)).unwrap();
        let net = b.build();

        let r = AStarPathFinder.find_shortest_path(&net, A, D).unwrap();
        assert_eq!(r.segments, vec![shortcut]);
        assert_eq!(r.cost, 3.0);
    }

    #[test]
    fn legs_and_suffix() {
        let (mut net, [_, _, ac, cd]) = diamond();
        let r = DijkstraPathFinder.find_shortest_path(&net, A, D).unwrap();
        let legs: Vec<_> = r.legs().collect();
        assert_eq!(legs, vec![(A, ac, C), (C, cd, D)]);

        net.update_congestion(cd, 3.0).unwrap();
        let rest = r.suffix(1, &net);
        assert_eq!(rest.junctions, vec![C, D]);
        assert_eq!(rest.cost, 3.0);
        assert_eq!(r.current_cost(&net), 4.0);
        assert!(r.suffix(2, &net).is_trivial());
        assert_eq!(r.source(), A);
        assert_eq!(r.destination(), D);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use amb_core::JunctionId;
    use crate::{load_network_csv, load_network_readers, JunctionRecord, RoadNetwork, SegmentRecord, SpatialError};

    const JUNCTIONS: &str = "\
id,x,y,name
1,0,0,Pulchowk
2,3,4,Baneswor
3,3,0,
";

    const SEGMENTS: &str = "\
from,to,length,oneway
1,2,,
2,3,7.5,1
1,3,3,0
";

    #[test]
    fn reads_tables() {
        let net = load_network_readers(Cursor::new(JUNCTIONS), Cursor::new(SEGMENTS)).unwrap();
        assert_eq!(net.junction_count(), 3);
        assert_eq!(net.segment_count(), 3);
        assert_eq!(net.junction_by_name("Baneswor"), Some(JunctionId(2)));
        assert_eq!(net.junction_name(JunctionId(3)), None);

        let s12 = net.segment_between(JunctionId(1), JunctionId(2)).unwrap();
        assert_eq!(net.length(s12), 5.0);

        // 2 → 3 is one-way.
        assert!(net.segment_between(JunctionId(2), JunctionId(3)).is_some());
        assert!(net.segment_between(JunctionId(3), JunctionId(2)).is_none());
    }

    #[test]
    fn dangling_reference_is_malformed() {
        let segs = "from,to,length\n1,9,2\n";
        let err = load_network_readers(Cursor::new(JUNCTIONS), Cursor::new(segs)).unwrap_err();
        match err {
            SpatialError::MalformedInput(msg) => assert!(msg.contains("segments row 0"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn duplicate_id_is_malformed() {
        let junctions = vec![JunctionRecord::new(1, 0.0, 0.0), JunctionRecord::new(1, 1.0, 1.0)];
        let err = RoadNetwork::from_records(&junctions, &[]).unwrap_err();
        assert!(matches!(err, SpatialError::MalformedInput(_)));
    }

    #[test]
    fn bad_oneway_flag_is_malformed() {
        let junctions = vec![JunctionRecord::new(1, 0.0, 0.0), JunctionRecord::new(2, 1.0, 1.0)];
        let mut seg = SegmentRecord::new(1, 2, None);
        seg.oneway = Some("sometimes".into());
        assert!(matches!(
            RoadNetwork::from_records(&junctions, &[seg]),
            Err(SpatialError::MalformedInput(_))
        ));
    }

    #[test]
    fn unparsable_row_is_malformed() {
        let junctions = "id,x,y\n1,zero,0\n";
        let err = load_network_readers(Cursor::new(junctions), Cursor::new("from,to\n")).unwrap_err();
        assert!(matches!(err, SpatialError::MalformedInput(_)));
    }

    #[test]
    fn loads_from_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let jp = dir.path().join("junctions.csv");
        let sp = dir.path().join("segments.csv");
        std::fs::write(&jp, JUNCTIONS).unwrap();
        std::fs::write(&sp, SEGMENTS).unwrap();
        let net = load_network_csv(&jp, &sp).unwrap();
        assert_eq!(net.segment_count(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_network_csv(&dir.path().join("nope.csv"), &dir.path().join("nope2.csv")).unwrap_err();
        assert!(matches!(err, SpatialError::Io(_)));
    }

    #[test]
    fn records_helpers() {
        let j = JunctionRecord::named(5, 1.0, 2.0, "Kapan");
        assert_eq!(j.name.as_deref(), Some("Kapan"));
        let s = SegmentRecord::one_way(5, 6, Some(1.0));
        assert_eq!(s.oneway.as_deref(), Some("1"));
    }
}
