pub mod compile;
pub mod loader;
pub mod matches;
