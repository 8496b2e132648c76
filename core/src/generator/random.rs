use alloc::vec::Vec;

use super::*;

/// Deals every interior cell at random, honouring the per-symbol quotas of
/// [`GameConfig::symbol_quotas`].
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::prelude::*;

        config.validate()?;

        let mut board = Board::new(config.size());
        let positions: Vec<Coord2> = board.iter_interior().collect();
        let mut quotas = config.symbol_quotas();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        deal(&mut board, &positions, &mut quotas, &mut rng);

        log::debug!(
            "Dealt {}x{} board with {} symbols, seed {}",
            config.rows,
            config.cols,
            config.symbols,
            self.seed
        );
        Ok(board)
    }
}
