pub mod debounce;
pub mod index;
pub mod snapshot;
