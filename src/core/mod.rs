pub mod log;
pub mod promoters;
