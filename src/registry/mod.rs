pub mod panels;
pub mod probe;
pub mod reference_model;
pub mod registry;
