pub mod composite;
pub mod normalizer;
