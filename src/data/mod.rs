// src/data/mod.rs

mod corpus;
mod windows;

pub use corpus::load_lines;
pub use windows::{pad_left, WindowBatcher, WindowSet};
