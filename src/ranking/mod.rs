mod ranker;
mod scorer;

pub use ranker::{RankedRepo, rank};
pub use scorer::score;
