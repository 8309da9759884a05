pub mod promoter;

pub use promoter::Promoter;
