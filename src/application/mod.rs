pub mod browser;
pub mod lending;
