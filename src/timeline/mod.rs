pub mod clip;
pub mod export;
pub mod group;
pub mod marker;
pub mod model;
