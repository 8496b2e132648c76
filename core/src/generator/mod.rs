use crate::*;
pub use random::*;
pub use shuffle::*;

mod random;
mod shuffle;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}
