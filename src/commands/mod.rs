mod rank;

pub use rank::{Args, run};
