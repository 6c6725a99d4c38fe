mod expander;

pub use expander::{expand, home_dir};
