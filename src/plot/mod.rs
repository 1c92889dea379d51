pub mod render;
pub mod types;
