//! Route type, the `PathFinder` trait, and Dijkstra / A* implementations.
//!
//! # Pluggability
//!
//! The vehicle and simulation crates call routing through the [`PathFinder`]
//! trait, so the search algorithm can be swapped without touching them.
//!
//! # Cost
//!
//! Every search reads the network's **live** costs (`length * congestion`)
//! at call time.  Nothing is cached between calls: a [`Route`] is a value
//! snapshot and goes stale as congestion changes.
//!
//! # Determinism
//!
//! Among paths whose total costs are equal (relative tolerance
//! [`COST_TOLERANCE`]), the one with fewer hops wins, then the one whose
//! `JunctionId` sequence is lexicographically smallest.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use amb_core::{JunctionId, SegmentId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

/// Relative tolerance under which two path costs count as equal.
pub const COST_TOLERANCE: f64 = 1e-9;

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered junction sequence plus its total cost when computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Junctions from source to destination, inclusive.  Never empty.
    pub junctions: Vec<JunctionId>,
    /// `segments[i]` connects `junctions[i]` to `junctions[i + 1]`.
    pub segments: Vec<SegmentId>,
    /// Total live cost at computation time.
    pub cost: f64,
}

impl Route {
    /// Zero-length, zero-cost route that stays at `at`.
    pub fn trivial(at: JunctionId) -> Self {
        Self { junctions: vec![at], segments: vec![], cost: 0.0 }
    }

    /// `true` if the source and destination are the same junction.
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn source(&self) -> JunctionId {
        self.junctions[0]
    }

    pub fn destination(&self) -> JunctionId {
        self.junctions[self.junctions.len() - 1]
    }

    /// Number of segments on the route.
    pub fn hops(&self) -> usize {
        self.segments.len()
    }

    /// `(from, segment, to)` for each leg, in travel order.
    pub fn legs(&self) -> impl Iterator<Item = (JunctionId, SegmentId, JunctionId)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, &s)| (self.junctions[i], s, self.junctions[i + 1]))
    }

    /// Cost of the whole route under the network's current congestion.
    pub fn current_cost(&self, network: &RoadNetwork) -> f64 {
        network.path_cost(&self.segments)
    }

    /// The part of the route starting at leg `from_leg`, re-costed live.
    ///
    /// `from_leg == hops()` yields the trivial route at the destination.
    pub fn suffix(&self, from_leg: usize, network: &RoadNetwork) -> Route {
        let from_leg = from_leg.min(self.segments.len());
        let segments = self.segments[from_leg..].to_vec();
        Route {
            junctions: self.junctions[from_leg..].to_vec(),
            cost: network.path_cost(&segments),
            segments,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self.junctions.iter().map(|j| j.0.to_string()).collect();
        write!(f, "[{}] cost {:.2}", ids.join(" -> "), self.cost)
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// Implementations must be pure functions of the network's current cost
/// snapshot: the same snapshot and endpoints always yield the same `Route`.
pub trait PathFinder: Send + Sync {
    /// Compute the minimum-cost route from `source` to `destination`.
    ///
    /// - `source == destination` → [`Route::trivial`].
    /// - [`SpatialError::UnknownJunction`] if either endpoint is absent.
    /// - [`SpatialError::NoPath`] if `destination` is unreachable.
    fn find_shortest_path(
        &self,
        network: &RoadNetwork,
        source: JunctionId,
        destination: JunctionId,
    ) -> SpatialResult<Route>;
}

impl<P: PathFinder + ?Sized> PathFinder for Box<P> {
    fn find_shortest_path(
        &self,
        network: &RoadNetwork,
        source: JunctionId,
        destination: JunctionId,
    ) -> SpatialResult<Route> {
        (**self).find_shortest_path(network, source, destination)
    }
}

// ── Implementations ───────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the CSR half-edge arrays.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraPathFinder;

impl PathFinder for DijkstraPathFinder {
    fn find_shortest_path(
        &self,
        network: &RoadNetwork,
        source: JunctionId,
        destination: JunctionId,
    ) -> SpatialResult<Route> {
        search(network, source, destination, |_| 0.0)
    }
}

/// A* with a straight-line heuristic.
///
/// The heuristic is `heuristic_scale * distance(v, destination)`.  Congestion
/// never drops below 1.0, so live cost ≥ length ≥ scaled distance and the
/// heuristic never overestimates; results match [`DijkstraPathFinder`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarPathFinder;

impl PathFinder for AStarPathFinder {
    fn find_shortest_path(
        &self,
        network: &RoadNetwork,
        source: JunctionId,
        destination: JunctionId,
    ) -> SpatialResult<Route> {
        let target = network.junction_point(destination)?;
        let scale = network.heuristic_scale();
        search(network, source, destination, |ix| {
            scale * network.junction_points[ix].distance(target)
        })
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Best known way to reach a junction.
#[derive(Copy, Clone)]
struct Label {
    cost: f64,
    hops: u32,
    /// Junction index of the predecessor; `NONE` at the source.
    prev: u32,
    via: SegmentId,
}

const NONE: u32 = u32::MAX;

/// Compare two costs, treating values within [`COST_TOLERANCE`] as equal.
fn cmp_cost(a: f64, b: f64) -> Ordering {
    let tol = COST_TOLERANCE * a.abs().max(b.abs()).max(1.0);
    if (a - b).abs() <= tol {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Best-first search shared by Dijkstra (`h ≡ 0`) and A*.
///
/// `h` must be consistent.  The heap is keyed by `(f, g, hops, id)` so that,
/// when a junction is popped, every equal-cost predecessor has already been
/// settled and the lexicographic tie-break sees all candidates.
fn search<H>(
    network: &RoadNetwork,
    source: JunctionId,
    destination: JunctionId,
    h: H,
) -> SpatialResult<Route>
where
    H: Fn(usize) -> f64,
{
    let src = network
        .junction_index(source)
        .ok_or(SpatialError::UnknownJunction(source))?;
    let dst = network
        .junction_index(destination)
        .ok_or(SpatialError::UnknownJunction(destination))?;

    if src == dst {
        return Ok(Route::trivial(source));
    }

    let n = network.junction_count();
    let mut best: Vec<Option<Label>> = vec![None; n];
    let mut settled = vec![false; n];

    best[src] = Some(Label { cost: 0.0, hops: 0, prev: NONE, via: SegmentId::INVALID });

    // Min-heap via Reverse.  JunctionId as last key keeps pop order deterministic.
    type Key = (OrderedFloat<f64>, OrderedFloat<f64>, u32, JunctionId, u32);
    let mut heap: BinaryHeap<Reverse<Key>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(h(src)), OrderedFloat(0.0), 0, source, src as u32)));

    while let Some(Reverse((_, _, _, _, u))) = heap.pop() {
        let u = u as usize;
        if settled[u] {
            continue;
        }
        settled[u] = true;

        if u == dst {
            return Ok(reconstruct(network, &best, dst));
        }

        let Some(label) = best[u] else { continue };

        for (segment, v) in network.half_edges(u) {
            if settled[v] {
                continue;
            }
            let cost = label.cost + network.current_cost(segment);
            let hops = label.hops + 1;
            let candidate = Label { cost, hops, prev: u as u32, via: segment };

            let improves = match best[v] {
                None => true,
                Some(current) => cmp_cost(cost, current.cost)
                    .then(hops.cmp(&current.hops))
                    .then_with(|| cmp_lex(network, &best, &candidate, &current))
                    .is_lt(),
            };

            if improves {
                best[v] = Some(candidate);
                heap.push(Reverse((
                    OrderedFloat(cost + h(v)),
                    OrderedFloat(cost),
                    hops,
                    network.junction_ids[v],
                    v as u32,
                )));
            }
        }
    }

    Err(SpatialError::NoPath { from: source, to: destination })
}

/// Lexicographic order of the junction sequences behind two equal-cost,
/// equal-hop labels for the same junction.  Parallel segments between the
/// same pair fall back to the smaller `SegmentId`.
fn cmp_lex(network: &RoadNetwork, best: &[Option<Label>], a: &Label, b: &Label) -> Ordering {
    if a.prev == b.prev {
        return a.via.cmp(&b.via);
    }
    let pa = junction_path(network, best, a.prev as usize);
    let pb = junction_path(network, best, b.prev as usize);
    pa.cmp(&pb)
}

/// Junction ids from the source to junction index `ix`, following `prev`.
fn junction_path(network: &RoadNetwork, best: &[Option<Label>], ix: usize) -> Vec<JunctionId> {
    let mut path = Vec::new();
    let mut cur = ix as u32;
    while cur != NONE {
        path.push(network.junction_ids[cur as usize]);
        cur = match best[cur as usize] {
            Some(label) => label.prev,
            None => NONE,
        };
    }
    path.reverse();
    path
}

fn reconstruct(network: &RoadNetwork, best: &[Option<Label>], dst: usize) -> Route {
    let mut junctions = Vec::new();
    let mut segments = Vec::new();
    let mut cur = dst as u32;
    let cost = best[dst].map_or(0.0, |l| l.cost);

    while cur != NONE {
        junctions.push(network.junction_ids[cur as usize]);
        match best[cur as usize] {
            Some(label) => {
                if label.prev != NONE {
                    segments.push(label.via);
                }
                cur = label.prev;
            }
            None => break,
        }
    }
    junctions.reverse();
    segments.reverse();

    Route { junctions, segments, cost }
}
