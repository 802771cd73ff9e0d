pub mod describe;
pub mod update;
