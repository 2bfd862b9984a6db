//! Pixel rectangles and their exact union.
//!
//! # Dissolve
//!
//! Pixels are grouped into edge-connected (4-connected) regions.  For each
//! region every pixel side that faces a cell outside the region becomes a
//! directed boundary edge, oriented clockwise on screen (row axis pointing
//! down) so the region is always on the walker's right.  Following edges
//! vertex to vertex yields closed loops: exactly one outer loop per region,
//! plus one loop per hole.  The outer loop is the one with positive
//! screen-space shoelace area; hole loops are discarded.
//!
//! Where two region pixels meet only at a corner, the vertex has two
//! outgoing edges.  Taking the rightmost turn keeps the walker on the pixel
//! it arrived along, so diagonal contact never joins two loops.
//!
//! Everything runs on integer lattice coordinates, so the union is exact;
//! only the final ring vertices are mapped to lon/lat.

use std::collections::VecDeque;

use geo::{Coord, LineString, Polygon};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::{GeoTransform, Raster};

/// One hazard cell as a lon/lat rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelPolygon {
    pub col: usize,
    pub row: usize,
    pub polygon: Polygon<f64>,
}

/// One rectangle per hazard cell, in row-major order.
pub fn polygonize(raster: &Raster, transform: &GeoTransform) -> Vec<PixelPolygon> {
    let mut pixels = Vec::with_capacity(raster.hazard_count());
    for row in 0..raster.height() {
        for col in 0..raster.width() {
            if !raster.is_hazard(col, row) {
                continue;
            }
            let (x, y) = (col as i64, row as i64);
            let ring = [(x, y), (x + 1, y), (x + 1, y + 1), (x, y + 1)]
                .into_iter()
                .map(|(vx, vy)| lattice_coord(transform, vx, vy))
                .collect::<Vec<_>>();
            pixels.push(PixelPolygon { col, row, polygon: Polygon::new(LineString::new(ring), vec![]) });
        }
    }
    pixels
}

/// Union pixel rectangles into one outer ring per 4-connected region.
/// Interior holes are not kept.
pub fn dissolve(pixels: &[PixelPolygon], transform: &GeoTransform) -> Vec<Polygon<f64>> {
    let cells: FxHashSet<Cell> = pixels.iter().map(|p| (p.col as i64, p.row as i64)).collect();
    let regions = regions_4(&cells);

    let mut polygons = Vec::with_capacity(regions.len());
    let mut holes = 0usize;
    for region in &regions {
        let members: FxHashSet<Cell> = region.iter().copied().collect();
        for ring in boundary_loops(&members) {
            if shoelace2(&ring) > 0 {
                let coords = ring.iter().map(|&(x, y)| lattice_coord(transform, x, y)).collect();
                polygons.push(Polygon::new(LineString::new(coords), vec![]));
            } else {
                holes += 1;
            }
        }
    }

    debug!(pixels = cells.len(), regions = regions.len(), holes_dropped = holes, "pixels dissolved");
    polygons
}

// ── Lattice internals ─────────────────────────────────────────────────────────

type Cell = (i64, i64);
type Vertex = (i64, i64);

fn lattice_coord(transform: &GeoTransform, x: i64, y: i64) -> Coord<f64> {
    let (lon, lat) = transform.vertex(x, y);
    Coord { x: lon, y: lat }
}

/// Screen directions in clockwise order; `(d + 1) % 4` is a right turn.
const STEPS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const RIGHT: usize = 0;
const DOWN: usize = 1;
const LEFT: usize = 2;
const UP: usize = 3;

fn regions_4(cells: &FxHashSet<Cell>) -> Vec<Vec<Cell>> {
    // Sorted seeds keep output order deterministic.
    let mut seeds: Vec<Cell> = cells.iter().copied().collect();
    seeds.sort_unstable_by_key(|&(x, y)| (y, x));

    let mut seen: FxHashSet<Cell> = FxHashSet::default();
    let mut regions = Vec::new();
    let mut queue = VecDeque::new();

    for seed in seeds {
        if !seen.insert(seed) {
            continue;
        }
        let mut region = Vec::new();
        queue.push_back(seed);
        while let Some((x, y)) = queue.pop_front() {
            region.push((x, y));
            for (dx, dy) in STEPS {
                let next = (x + dx, y + dy);
                if cells.contains(&next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        regions.push(region);
    }
    regions
}

/// All closed boundary loops of one region, each as its corner vertices
/// (collinear runs collapsed, closing vertex not repeated).
fn boundary_loops(region: &FxHashSet<Cell>) -> Vec<Vec<Vertex>> {
    // Directed edge = (start vertex, direction).  At most one edge leaves a
    // vertex in each direction.
    let mut edges: Vec<(Vertex, usize)> = Vec::new();
    for &(x, y) in region {
        if !region.contains(&(x, y - 1)) {
            edges.push(((x, y), RIGHT));
        }
        if !region.contains(&(x + 1, y)) {
            edges.push(((x + 1, y), DOWN));
        }
        if !region.contains(&(x, y + 1)) {
            edges.push(((x + 1, y + 1), LEFT));
        }
        if !region.contains(&(x - 1, y)) {
            edges.push(((x, y + 1), UP));
        }
    }
    edges.sort_unstable_by_key(|&((x, y), d)| (y, x, d));

    let mut outgoing: FxHashMap<Vertex, [Option<usize>; 4]> = FxHashMap::default();
    for (i, &(start, dir)) in edges.iter().enumerate() {
        outgoing.entry(start).or_default()[dir] = Some(i);
    }

    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();

    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        let mut ring: Vec<Vertex> = Vec::new();
        let mut current = first;
        loop {
            used[current] = true;
            let (start, dir) = edges[current];
            let end = (start.0 + STEPS[dir].0, start.1 + STEPS[dir].1);

            let Some(next) = next_edge(&outgoing, end, dir) else {
                // Every boundary vertex has as many exits as entries.
                trace!(?end, "boundary walk hit a dead end");
                break;
            };
            if edges[next].1 != dir {
                ring.push(end);
            }
            if next == first {
                break;
            }
            current = next;
        }
        if ring.len() >= 4 {
            loops.push(ring);
        }
    }
    loops
}

/// Rightmost available exit from `vertex` when arriving in direction `dir`.
fn next_edge(outgoing: &FxHashMap<Vertex, [Option<usize>; 4]>, vertex: Vertex, dir: usize) -> Option<usize> {
    let exits = outgoing.get(&vertex)?;
    [(dir + 1) % 4, dir, (dir + 3) % 4].into_iter().find_map(|d| exits[d])
}

/// Twice the signed shoelace area in lattice units.  Positive for loops
/// that run clockwise on screen.
fn shoelace2(ring: &[Vertex]) -> i64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (x0, y0) = ring[i];
            let (x1, y1) = ring[(i + 1) % n];
            x0 * y1 - x1 * y0
        })
        .sum()
}

#[cfg(test)]
pub(crate) fn loops_for_test(cells: &[Cell]) -> Vec<Vec<Vertex>> {
    boundary_loops(&cells.iter().copied().collect())
}
