/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Tile face index, `0..symbols`.
pub type Symbol = u8;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every cell of an axis-aligned segment, both ends included.
///
/// Yields nothing when `from` and `to` share neither a row nor a column.
#[derive(Debug)]
pub struct LineIter {
    next: Option<Coord2>,
    end: Coord2,
}

impl LineIter {
    pub fn new(from: Coord2, to: Coord2) -> Self {
        let aligned = from.0 == to.0 || from.1 == to.1;
        Self {
            next: aligned.then_some(from),
            end: to,
        }
    }
}

const fn step_toward(from: Coord, to: Coord) -> Coord {
    if from < to {
        from + 1
    } else if from > to {
        from - 1
    } else {
        from
    }
}

impl Iterator for LineIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current == self.end {
            None
        } else {
            Some((
                step_toward(current.0, self.end.0),
                step_toward(current.1, self.end.1),
            ))
        };
        Some(current)
    }
}
