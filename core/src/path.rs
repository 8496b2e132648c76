use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Connector between two matched tiles, as grid waypoints from the first
/// selected tile to the second. Consecutive waypoints are axis-aligned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    waypoints: SmallVec<[Coord2; 4]>,
}

impl Path {
    pub fn straight(a: Coord2, b: Coord2) -> Self {
        Self {
            waypoints: SmallVec::from_buf_and_len([a, b, b, b], 2),
        }
    }

    pub fn corner(a: Coord2, corner: Coord2, b: Coord2) -> Self {
        Self {
            waypoints: SmallVec::from_buf_and_len([a, corner, b, b], 3),
        }
    }

    pub fn bridge(a: Coord2, first: Coord2, second: Coord2, b: Coord2) -> Self {
        Self {
            waypoints: SmallVec::from_buf([a, first, second, b]),
        }
    }

    pub fn waypoints(&self) -> &[Coord2] {
        &self.waypoints
    }

    pub fn bends(&self) -> usize {
        self.waypoints.len() - 2
    }

    /// Every cell the connector passes over, in order, endpoints included.
    pub fn cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        let start = self.waypoints.first().copied();
        start.into_iter().chain(
            self.waypoints
                .windows(2)
                .flat_map(|leg| LineIter::new(leg[0], leg[1]).skip(1)),
        )
    }
}

/// Looks for a connector between `a` and `b` with at most two bends that
/// only crosses cleared cells.
///
/// Tile values are not compared here; `a` and `b` themselves never block.
/// Shapes are tried straight, then single corner, then a bridge column, then
/// a bridge row, and the first hit is returned.
pub fn find_path(board: &Board, a: Coord2, b: Coord2) -> Option<Path> {
    if a == b || !board.contains(a) || !board.contains(b) {
        return None;
    }

    let finder = PathFinder { board, a, b };
    let path = finder
        .straight()
        .or_else(|| finder.corner())
        .or_else(|| finder.bridge_column())
        .or_else(|| finder.bridge_row());

    log::trace!("path {:?} -> {:?}: {:?}", a, b, path);
    path
}

struct PathFinder<'a> {
    board: &'a Board,
    a: Coord2,
    b: Coord2,
}

impl PathFinder<'_> {
    fn is_clear(&self, from: Coord2, to: Coord2) -> bool {
        debug_assert!(from.0 == to.0 || from.1 == to.1);
        LineIter::new(from, to)
            .filter(|&pos| pos != self.a && pos != self.b)
            .all(|pos| !self.board[pos].is_visible())
    }

    fn is_aligned(&self) -> bool {
        self.a.0 == self.b.0 || self.a.1 == self.b.1
    }

    fn straight(&self) -> Option<Path> {
        (self.is_aligned() && self.is_clear(self.a, self.b))
            .then(|| Path::straight(self.a, self.b))
    }

    fn corner(&self) -> Option<Path> {
        let (a, b) = (self.a, self.b);
        [(a.0, b.1), (b.0, a.1)]
            .into_iter()
            .find(|&corner| self.is_clear(a, corner) && self.is_clear(corner, b))
            .map(|corner| Path::corner(a, corner, b))
    }

    fn bridge_column(&self) -> Option<Path> {
        let (a, b) = (self.a, self.b);
        let (_, cols) = self.board.size();
        bridge_candidates(a.1, b.1, cols)
            .map(|col| ((a.0, col), (b.0, col)))
            .find(|&(first, second)| self.is_bridge(first, second))
            .map(|(first, second)| Path::bridge(a, first, second, b))
    }

    fn bridge_row(&self) -> Option<Path> {
        let (a, b) = (self.a, self.b);
        let (rows, _) = self.board.size();
        bridge_candidates(a.0, b.0, rows)
            .map(|row| ((row, a.1), (row, b.1)))
            .find(|&(first, second)| self.is_bridge(first, second))
            .map(|(first, second)| Path::bridge(a, first, second, b))
    }

    fn is_bridge(&self, first: Coord2, second: Coord2) -> bool {
        self.is_clear(self.a, first)
            && self.is_clear(first, second)
            && self.is_clear(second, self.b)
    }
}

/// Every line index in `0..end`: first the span between `p` and `q`
/// (inclusive), then outward below it, then outward above it.
fn bridge_candidates(p: Coord, q: Coord, end: Coord) -> impl Iterator<Item = Coord> {
    let (low, high) = (p.min(q), p.max(q));
    (low..=high)
        .chain((0..low).rev())
        .chain(high.saturating_add(1)..end)
}
