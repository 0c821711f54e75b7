pub mod extract;
pub mod track;
