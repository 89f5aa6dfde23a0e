pub mod matches;
pub mod set;
pub mod show;
