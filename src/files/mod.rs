pub mod category;
pub mod copy;
pub mod file;
pub mod planner;
