//! Road network representation and builder.
//!
//! # Data layout
//!
//! Junctions are stored in flat arrays indexed by a dense **junction index**
//! (insertion order).  Caller-facing [`JunctionId`]s map to that index via a
//! hash map.  Segments are stored in flat arrays indexed by [`SegmentId`].
//!
//! Adjacency uses **Compressed Sparse Row (CSR)** format over half-edges.  An
//! undirected segment contributes two half-edges, a one-way segment one.
//! Given junction index `j`, its outgoing half-edges occupy:
//!
//! ```text
//! half_segment[ half_start[j] .. half_start[j+1] ]
//! ```
//!
//! Topology is frozen by [`RoadNetworkBuilder::build`].  The only mutable
//! state afterwards is the per-segment congestion factor, so the routing hot
//! loop is a contiguous scan plus one multiply per half-edge.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a map coordinate to the nearest junction.
//! Used to snap raw coordinates (e.g. a clicked point) to the road graph.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use amb_core::{JunctionId, Point, SegmentId};

use crate::{SpatialError, SpatialResult};

/// Lowest legal congestion factor (free flow).
pub const MIN_CONGESTION: f64 = 1.0;

// ── R-tree junction entry ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct JunctionEntry {
    point: [f64; 2],
    id: JunctionId,
}

impl RTreeObject for JunctionEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for JunctionEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Incidence ─────────────────────────────────────────────────────────────────

/// One traversable segment leaving a junction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Incidence {
    pub segment: SegmentId,
    pub neighbor: JunctionId,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Road graph with static segment lengths and live congestion factors.
///
/// Static arrays are `pub` for direct indexed access.  Congestion is private:
/// it only changes through [`update_congestion`](Self::update_congestion),
/// which enforces the `factor >= MIN_CONGESTION` invariant.  Construct with
/// [`RoadNetworkBuilder`].
#[derive(Clone)]
pub struct RoadNetwork {
    // ── Junction data (indexed by junction index) ─────────────────────────
    /// Caller-facing id of each junction.
    pub junction_ids: Vec<JunctionId>,

    /// Map coordinate of each junction.
    pub junction_points: Vec<Point>,

    junction_names: Vec<Option<String>>,
    index: FxHashMap<JunctionId, u32>,
    names: FxHashMap<String, JunctionId>,

    // ── CSR half-edge adjacency ───────────────────────────────────────────
    half_start: Vec<u32>,
    half_segment: Vec<SegmentId>,
    half_to: Vec<u32>,

    // ── Segment data (indexed by SegmentId) ───────────────────────────────
    /// First endpoint of each segment (the tail for one-way segments).
    pub segment_from: Vec<JunctionId>,

    /// Second endpoint of each segment (the head for one-way segments).
    pub segment_to: Vec<JunctionId>,

    /// Static length of each segment, in map units.  Always finite and > 0.
    pub segment_length: Vec<f64>,

    /// `true` for segments traversable only `from → to`.
    pub segment_one_way: Vec<bool>,

    congestion: Vec<f64>,

    heuristic_scale: f64,
    spatial_idx: RTree<JunctionEntry>,
}

impl std::fmt::Debug for RoadNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadNetwork")
            .field("junctions", &self.junction_count())
            .field("segments", &self.segment_count())
            .field("congestion", &self.congestion)
            .finish_non_exhaustive()
    }
}

impl RoadNetwork {
    /// Construct an empty network with no junctions or segments.
    ///
    /// Any routing request against it fails with
    /// [`SpatialError::UnknownJunction`].
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn junction_count(&self) -> usize {
        self.junction_ids.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segment_length.len()
    }

    pub fn is_empty(&self) -> bool {
        self.junction_ids.is_empty()
    }

    // ── Junction lookups ──────────────────────────────────────────────────

    pub fn contains(&self, junction: JunctionId) -> bool {
        self.index.contains_key(&junction)
    }

    /// Dense index of `junction`, or `None` if it is not in the network.
    #[inline]
    pub fn junction_index(&self, junction: JunctionId) -> Option<usize> {
        self.index.get(&junction).map(|&i| i as usize)
    }

    pub fn junction_point(&self, junction: JunctionId) -> SpatialResult<Point> {
        self.junction_index(junction)
            .map(|i| self.junction_points[i])
            .ok_or(SpatialError::UnknownJunction(junction))
    }

    pub fn junction_name(&self, junction: JunctionId) -> Option<&str> {
        self.junction_index(junction)
            .and_then(|i| self.junction_names[i].as_deref())
    }

    /// Look up a junction by its human-readable name (exact match).
    pub fn junction_by_name(&self, name: &str) -> Option<JunctionId> {
        self.names.get(name).copied()
    }

    /// Human-readable label: the name if present, else the id.
    pub fn label(&self, junction: JunctionId) -> String {
        match self.junction_name(junction) {
            Some(name) => name.to_owned(),
            None => junction.to_string(),
        }
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Segments traversable from `junction`, with the junction each leads to.
    pub fn neighbors(
        &self,
        junction: JunctionId,
    ) -> SpatialResult<impl Iterator<Item = Incidence> + '_> {
        let ix = self
            .junction_index(junction)
            .ok_or(SpatialError::UnknownJunction(junction))?;
        Ok(self.half_edges(ix).map(|(segment, to)| Incidence {
            segment,
            neighbor: self.junction_ids[to],
        }))
    }

    /// Outgoing half-edges of junction index `ix` as `(segment, head index)`.
    ///
    /// A contiguous index range: no heap allocation.
    #[inline]
    pub(crate) fn half_edges(&self, ix: usize) -> impl Iterator<Item = (SegmentId, usize)> + '_ {
        let start = self.half_start[ix] as usize;
        let end = self.half_start[ix + 1] as usize;
        (start..end).map(|h| (self.half_segment[h], self.half_to[h] as usize))
    }

    /// Number of segments traversable from `junction` (0 if unknown).
    pub fn degree(&self, junction: JunctionId) -> usize {
        match self.junction_index(junction) {
            Some(ix) => (self.half_start[ix + 1] - self.half_start[ix]) as usize,
            None => 0,
        }
    }

    /// The cheapest segment currently leading from `from` to `to`, if any.
    pub fn segment_between(&self, from: JunctionId, to: JunctionId) -> Option<SegmentId> {
        let from_ix = self.junction_index(from)?;
        let to_ix = self.junction_index(to)?;
        self.half_edges(from_ix)
            .filter(|&(_, head)| head == to_ix)
            .map(|(segment, _)| segment)
            .min_by(|&a, &b| self.current_cost(a).total_cmp(&self.current_cost(b)).then(a.cmp(&b)))
    }

    /// Both endpoints of `segment`.
    pub fn segment_endpoints(&self, segment: SegmentId) -> SpatialResult<(JunctionId, JunctionId)> {
        self.check_segment(segment)?;
        Ok((self.segment_from[segment.index()], self.segment_to[segment.index()]))
    }

    /// The far end of `segment` when entered from `junction`.
    pub fn opposite(&self, segment: SegmentId, junction: JunctionId) -> SpatialResult<JunctionId> {
        let (a, b) = self.segment_endpoints(segment)?;
        if junction == a {
            Ok(b)
        } else if junction == b {
            Ok(a)
        } else {
            Err(SpatialError::UnknownJunction(junction))
        }
    }

    // ── Costs and congestion ──────────────────────────────────────────────

    #[inline]
    pub fn length(&self, segment: SegmentId) -> f64 {
        self.segment_length[segment.index()]
    }

    #[inline]
    pub fn congestion(&self, segment: SegmentId) -> f64 {
        self.congestion[segment.index()]
    }

    /// Live traversal cost: `length * congestion`.  Always finite and > 0.
    ///
    /// # Panics
    /// Panics if `segment` was not issued by this network's builder.
    #[inline]
    pub fn current_cost(&self, segment: SegmentId) -> f64 {
        self.segment_length[segment.index()] * self.congestion[segment.index()]
    }

    /// Sum of live costs over `segments`.
    pub fn path_cost(&self, segments: &[SegmentId]) -> f64 {
        segments.iter().map(|&s| self.current_cost(s)).sum()
    }

    /// Set the live congestion factor of `segment`.
    ///
    /// Rejects non-finite factors and factors below [`MIN_CONGESTION`] with
    /// [`SpatialError::InvalidCongestion`]; the previous value is kept.
    pub fn update_congestion(&mut self, segment: SegmentId, factor: f64) -> SpatialResult<()> {
        let slot = self
            .congestion
            .get_mut(segment.index())
            .ok_or(SpatialError::UnknownSegment(segment))?;
        if !factor.is_finite() || factor < MIN_CONGESTION {
            return Err(SpatialError::InvalidCongestion { segment, factor });
        }
        *slot = factor;
        Ok(())
    }

    /// Restore free flow on every segment (start of a new run).
    pub fn reset_congestion(&mut self) {
        self.congestion.fill(MIN_CONGESTION);
    }

    /// Replace every congestion factor at once, e.g. with an earlier
    /// [`congestion_factors`](Self::congestion_factors) copy.
    ///
    /// All-or-nothing: a wrong length is [`SpatialError::MalformedInput`], a
    /// bad factor is [`SpatialError::InvalidCongestion`], and in both cases
    /// no factor changes.
    pub fn set_congestion_factors(&mut self, factors: &[f64]) -> SpatialResult<()> {
        if factors.len() != self.congestion.len() {
            return Err(SpatialError::MalformedInput(format!(
                "expected {} congestion factors, got {}",
                self.congestion.len(),
                factors.len()
            )));
        }
        if let Some((i, &factor)) = factors
            .iter()
            .enumerate()
            .find(|&(_, f)| !f.is_finite() || *f < MIN_CONGESTION)
        {
            return Err(SpatialError::InvalidCongestion { segment: SegmentId(i as u32), factor });
        }
        self.congestion.copy_from_slice(factors);
        Ok(())
    }

    /// Point-in-time copy of every congestion factor, indexed by `SegmentId`.
    pub fn congestion_factors(&self) -> Vec<f64> {
        self.congestion.clone()
    }

    /// Iterator over all segment ids.
    pub fn segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        (0..self.segment_count()).map(|i| SegmentId(i as u32))
    }

    /// Multiplier that keeps a straight-line A* heuristic admissible.
    ///
    /// `min(1, min over segments of length / endpoint distance)`.  Equal to
    /// 1.0 when every length is at least its coordinate distance.
    pub fn heuristic_scale(&self) -> f64 {
        self.heuristic_scale
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the junction nearest to `point`.
    ///
    /// Returns `None` only if the network has no junctions.
    pub fn snap_to_junction(&self, point: Point) -> Option<JunctionId> {
        self.spatial_idx
            .nearest_neighbor(&[point.x, point.y])
            .map(|e| e.id)
    }

    /// Return up to `k` junctions nearest to `point`, by ascending distance.
    pub fn k_nearest_junctions(&self, point: Point, k: usize) -> Vec<JunctionId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[point.x, point.y])
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    fn check_segment(&self, segment: SegmentId) -> SpatialResult<()> {
        if segment.index() < self.segment_count() {
            Ok(())
        } else {
            Err(SpatialError::UnknownSegment(segment))
        }
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Every `add_*` call validates its input immediately, so a builder never
/// holds a dangling reference and `build()` is infallible.
///
/// # Example
///
/// ```
/// use amb_core::{JunctionId, Point};
/// use amb_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_junction(JunctionId(1), Point::new(0.0, 0.0)).unwrap();
/// b.add_junction(JunctionId(2), Point::new(3.0, 4.0)).unwrap();
/// let seg = b.add_segment(JunctionId(1), JunctionId(2), None).unwrap();
/// let net = b.build();
/// assert_eq!(net.junction_count(), 2);
/// assert_eq!(net.length(seg), 5.0); // derived from coordinates
/// ```
pub struct RoadNetworkBuilder {
    junctions: Vec<RawJunction>,
    index: FxHashMap<JunctionId, u32>,
    names: FxHashMap<String, JunctionId>,
    raw_segments: Vec<RawSegment>,
}

struct RawJunction {
    id: JunctionId,
    point: Point,
    name: Option<String>,
}

struct RawSegment {
    from: u32,
    to: u32,
    length: f64,
    one_way: bool,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            junctions: Vec::new(),
            index: FxHashMap::default(),
            names: FxHashMap::default(),
            raw_segments: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of junctions and segments.
    pub fn with_capacity(junctions: usize, segments: usize) -> Self {
        Self {
            junctions: Vec::with_capacity(junctions),
            index: FxHashMap::with_capacity_and_hasher(junctions, Default::default()),
            names: FxHashMap::default(),
            raw_segments: Vec::with_capacity(segments),
        }
    }

    /// Add an unnamed junction.
    pub fn add_junction(&mut self, id: JunctionId, point: Point) -> SpatialResult<()> {
        self.push_junction(id, point, None)
    }

    /// Add a junction with a human-readable name (unique per network).
    pub fn add_named_junction(
        &mut self,
        id: JunctionId,
        point: Point,
        name: impl Into<String>,
    ) -> SpatialResult<()> {
        self.push_junction(id, point, Some(name.into()))
    }

    /// Add an **undirected** segment between `from` and `to`.
    ///
    /// `length` falls back to the Euclidean distance between the endpoints
    /// when `None`.  Returns the new segment's id.
    pub fn add_segment(
        &mut self,
        from: JunctionId,
        to: JunctionId,
        length: Option<f64>,
    ) -> SpatialResult<SegmentId> {
        self.push_segment(from, to, length, false)
    }

    /// Add a **one-way** segment traversable only from `from` to `to`.
    pub fn add_one_way_segment(
        &mut self,
        from: JunctionId,
        to: JunctionId,
        length: Option<f64>,
    ) -> SpatialResult<SegmentId> {
        self.push_segment(from, to, length, true)
    }

    pub fn contains(&self, id: JunctionId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn junction_count(&self) -> usize { self.junctions.len() }
    pub fn segment_count(&self) -> usize { self.raw_segments.len() }

    fn push_junction(&mut self, id: JunctionId, point: Point, name: Option<String>) -> SpatialResult<()> {
        if id == JunctionId::INVALID {
            return Err(SpatialError::MalformedInput(format!("{id} is reserved")));
        }
        if self.index.contains_key(&id) {
            return Err(SpatialError::DuplicateId(id));
        }
        if !point.is_finite() {
            return Err(SpatialError::MalformedInput(format!(
                "junction {id} has non-finite coordinate {point}"
            )));
        }
        if let Some(name) = &name {
            if let Some(&other) = self.names.get(name) {
                return Err(SpatialError::MalformedInput(format!(
                    "junction {id} reuses the name {name:?} of {other}"
                )));
            }
            self.names.insert(name.clone(), id);
        }
        self.index.insert(id, self.junctions.len() as u32);
        self.junctions.push(RawJunction { id, point, name });
        Ok(())
    }

    fn push_segment(
        &mut self,
        from: JunctionId,
        to: JunctionId,
        length: Option<f64>,
        one_way: bool,
    ) -> SpatialResult<SegmentId> {
        let from_ix = *self.index.get(&from).ok_or(SpatialError::UnknownJunction(from))?;
        let to_ix = *self.index.get(&to).ok_or(SpatialError::UnknownJunction(to))?;
        if from_ix == to_ix {
            return Err(SpatialError::MalformedInput(format!(
                "segment {from} -> {to} is a self-loop"
            )));
        }

        let length = match length {
            Some(l) => l,
            None => self.junctions[from_ix as usize]
                .point
                .distance(self.junctions[to_ix as usize].point),
        };
        if !length.is_finite() || length <= 0.0 {
            return Err(SpatialError::MalformedInput(format!(
                "segment {from} -> {to} has non-positive length {length}"
            )));
        }

        let id = SegmentId(self.raw_segments.len() as u32);
        self.raw_segments.push(RawSegment { from: from_ix, to: to_ix, length, one_way });
        Ok(id)
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for the half-edge sort + O(N log N) for
    /// the R-tree bulk load.
    pub fn build(self) -> RoadNetwork {
        let junction_count = self.junctions.len();

        // Half-edges as (tail, head, segment); sorted by tail for CSR.
        let mut halves: Vec<(u32, u32, SegmentId)> = Vec::with_capacity(self.raw_segments.len() * 2);
        for (i, s) in self.raw_segments.iter().enumerate() {
            let seg = SegmentId(i as u32);
            halves.push((s.from, s.to, seg));
            if !s.one_way {
                halves.push((s.to, s.from, seg));
            }
        }
        halves.sort_unstable_by_key(|&(tail, _, seg)| (tail, seg));

        let mut half_start = vec![0u32; junction_count + 1];
        for &(tail, _, _) in &halves {
            half_start[tail as usize + 1] += 1;
        }
        for i in 1..=junction_count {
            half_start[i] += half_start[i - 1];
        }
        debug_assert_eq!(half_start[junction_count] as usize, halves.len());

        let half_to: Vec<u32> = halves.iter().map(|&(_, head, _)| head).collect();
        let half_segment: Vec<SegmentId> = halves.iter().map(|&(_, _, seg)| seg).collect();

        let junction_ids: Vec<JunctionId> = self.junctions.iter().map(|j| j.id).collect();
        let junction_points: Vec<Point> = self.junctions.iter().map(|j| j.point).collect();

        let segment_from = self.raw_segments.iter().map(|s| junction_ids[s.from as usize]).collect();
        let segment_to = self.raw_segments.iter().map(|s| junction_ids[s.to as usize]).collect();
        let segment_length: Vec<f64> = self.raw_segments.iter().map(|s| s.length).collect();
        let segment_one_way = self.raw_segments.iter().map(|s| s.one_way).collect();

        let heuristic_scale = self
            .raw_segments
            .iter()
            .filter_map(|s| {
                let d = junction_points[s.from as usize].distance(junction_points[s.to as usize]);
                (d > 0.0).then(|| s.length / d)
            })
            .fold(1.0_f64, f64::min);

        let entries: Vec<JunctionEntry> = self
            .junctions
            .iter()
            .map(|j| JunctionEntry { point: [j.point.x, j.point.y], id: j.id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let junction_names = self.junctions.into_iter().map(|j| j.name).collect();

        RoadNetwork {
            congestion: vec![MIN_CONGESTION; segment_length.len()],
            junction_ids,
            junction_points,
            junction_names,
            index: self.index,
            names: self.names,
            half_start,
            half_segment,
            half_to,
            segment_from,
            segment_to,
            segment_length,
            segment_one_way,
            heuristic_scale,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
