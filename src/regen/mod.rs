pub mod diff;
pub mod engine;
pub mod signatures;
