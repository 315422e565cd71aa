pub mod storage;
pub mod ai;
