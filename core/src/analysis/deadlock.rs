use crate::*;

/// A matchable pair together with the connector joining it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalPair {
    pub first: Coord2,
    pub second: Coord2,
    pub path: Path,
}

/// Scans every unordered pair of visible tiles with the same symbol and
/// returns the first one that [`find_path`] can connect.
///
/// The scan covers the whole board on every call; nothing is cached between
/// mutations.
pub fn find_legal_pair(board: &Board) -> Option<LegalPair> {
    let visible = board.visible_positions();
    for (i, &first) in visible.iter().enumerate() {
        let symbol = board[first].symbol();
        for &second in &visible[i + 1..] {
            if board[second].symbol() != symbol {
                continue;
            }
            if let Some(path) = find_path(board, first, second) {
                return Some(LegalPair {
                    first,
                    second,
                    path,
                });
            }
        }
    }
    None
}

pub fn has_any_legal_pair(board: &Board) -> bool {
    find_legal_pair(board).is_some()
}
