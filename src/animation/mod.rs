pub mod ease;
pub mod frame;
pub mod looping;
pub mod time;
