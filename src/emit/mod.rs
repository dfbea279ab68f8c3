pub mod emitter;
pub mod hierarchy;
