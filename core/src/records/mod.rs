pub mod catalog;
pub mod generator;
pub mod model;
pub mod sampler;
