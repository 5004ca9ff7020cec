pub mod build;
pub mod compile;
