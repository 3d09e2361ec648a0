// Domain layer - Plain data shared by the engines
pub mod canvas;
pub mod dataset;
pub mod field_aliases;
pub mod filter;
