pub mod greedy;

pub use greedy::{GreedySelector, flip_count};
