pub mod config;
pub mod logging;
pub mod network;
pub mod speech;
pub mod storage;
