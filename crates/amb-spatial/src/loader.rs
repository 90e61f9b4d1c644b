//! Junction / segment table loading.
//!
//! # CSV format
//!
//! Two tables.  Junctions, one row each; `name` is optional:
//!
//! ```csv
//! id,x,y,name
//! 1,120,40,Pulchowk
//! 2,180,95,Baneswor
//! ```
//!
//! Segments, one row each.  An empty `length` is derived from the endpoint
//! coordinates; `oneway` is optional and accepts `1`/`true`/`yes`:
//!
//! ```csv
//! from,to,length,oneway
//! 1,2,,
//! 2,3,7.5,1
//! ```
//!
//! Validation is all-or-nothing: the first bad row aborts loading with
//! [`SpatialError::MalformedInput`] naming the table and row.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use amb_core::{JunctionId, Point};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::{SpatialError, SpatialResult};

// ── Records ───────────────────────────────────────────────────────────────────

/// One junction row: `(id, x, y[, name])`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct JunctionRecord {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub name: Option<String>,
}

/// One segment row: `(from, to[, length][, oneway])`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SegmentRecord {
    pub from: u32,
    pub to: u32,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub oneway: Option<String>,
}

impl JunctionRecord {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y, name: None }
    }

    pub fn named(id: u32, x: f64, y: f64, name: impl Into<String>) -> Self {
        Self { id, x, y, name: Some(name.into()) }
    }
}

impl SegmentRecord {
    pub fn new(from: u32, to: u32, length: Option<f64>) -> Self {
        Self { from, to, length, oneway: None }
    }

    pub fn one_way(from: u32, to: u32, length: Option<f64>) -> Self {
        Self { from, to, length, oneway: Some("1".into()) }
    }

    fn is_one_way(&self) -> SpatialResult<bool> {
        match self.oneway.as_deref().map(str::trim) {
            None | Some("") => Ok(false),
            Some("1" | "true" | "yes") => Ok(true),
            Some("0" | "false" | "no") => Ok(false),
            Some(other) => Err(SpatialError::MalformedInput(format!(
                "invalid oneway flag {other:?}: expected 1/0, true/false, or yes/no"
            ))),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

impl RoadNetwork {
    /// Build a network from in-memory tables.
    ///
    /// Any duplicate id, dangling reference, or bad length fails the whole
    /// call with [`SpatialError::MalformedInput`]; no partial network is
    /// returned.
    pub fn from_records(
        junctions: &[JunctionRecord],
        segments: &[SegmentRecord],
    ) -> SpatialResult<RoadNetwork> {
        let mut b = RoadNetworkBuilder::with_capacity(junctions.len(), segments.len());

        for (row, j) in junctions.iter().enumerate() {
            let id = JunctionId(j.id);
            let point = Point::new(j.x, j.y);
            let added = match &j.name {
                Some(name) if !name.trim().is_empty() => b.add_named_junction(id, point, name.trim()),
                _ => b.add_junction(id, point),
            };
            added.map_err(|e| malformed("junctions", row, e))?;
        }

        for (row, s) in segments.iter().enumerate() {
            let from = JunctionId(s.from);
            let to = JunctionId(s.to);
            let one_way = s.is_one_way().map_err(|e| malformed("segments", row, e))?;
            let added = if one_way {
                b.add_one_way_segment(from, to, s.length)
            } else {
                b.add_segment(from, to, s.length)
            };
            added.map_err(|e| malformed("segments", row, e))?;
        }

        let net = b.build();
        log::debug!(
            "road network built: {} junctions, {} segments",
            net.junction_count(),
            net.segment_count()
        );
        Ok(net)
    }
}

/// Load a network from two CSV files.
pub fn load_network_csv(junctions: &Path, segments: &Path) -> SpatialResult<RoadNetwork> {
    let j = std::fs::File::open(junctions)?;
    let s = std::fs::File::open(segments)?;
    load_network_readers(j, s)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded tables.
pub fn load_network_readers<J: Read, S: Read>(junctions: J, segments: S) -> SpatialResult<RoadNetwork> {
    let junction_rows = read_table::<JunctionRecord, _>("junctions", junctions)?;
    let segment_rows = read_table::<SegmentRecord, _>("segments", segments)?;
    RoadNetwork::from_records(&junction_rows, &segment_rows)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_table<T, R>(table: &str, reader: R) -> SpatialResult<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<T>()
        .enumerate()
        .map(|(row, result)| result.map_err(|e| malformed(table, row, e)))
        .collect()
}

fn malformed(table: &str, row: usize, err: impl std::fmt::Display) -> SpatialError {
    SpatialError::MalformedInput(format!("{table} row {row}: {err}"))
}
