pub mod cache;
pub mod paragraph;
