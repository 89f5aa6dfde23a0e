pub mod arithmetic;
pub mod config;
pub mod format;
pub mod pattern;
pub mod pool;
pub mod property;
