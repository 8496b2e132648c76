use alloc::vec::Vec;
use rand::Rng;

use crate::*;

/// Assigns a symbol to each of `positions`, drawing uniformly among the
/// symbols whose remaining quota is nonzero and consuming that quota.
pub(crate) fn deal<R: Rng + ?Sized>(
    board: &mut Board,
    positions: &[Coord2],
    quotas: &mut [CellCount],
    rng: &mut R,
) {
    let mut admissible: Vec<Symbol> = Vec::with_capacity(quotas.len());
    for &pos in positions {
        admissible.clear();
        admissible.extend(
            quotas
                .iter()
                .enumerate()
                .filter(|&(_, &quota)| quota > 0)
                .map(|(symbol, _)| symbol as Symbol),
        );

        if admissible.is_empty() {
            log::warn!("Ran out of symbols while dealing at {:?}", pos);
            break;
        }

        let symbol = admissible[rng.random_range(0..admissible.len())];
        quotas[usize::from(symbol)] -= 1;
        board.set(pos, Tile::Visible(symbol));
    }
}

/// Redistributes the symbols of all visible tiles over the same positions.
///
/// Positions and visibility are untouched and every symbol keeps its count,
/// so the board stays pairable.
pub fn reshuffle<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) {
    let positions = board.visible_positions();
    let mut quotas = board.symbol_counts();
    deal(board, &positions, &mut quotas, rng);
    log::debug!("Reshuffled {} tiles", positions.len());
}
