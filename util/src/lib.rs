pub mod cleanup;
pub mod config;
pub mod paths;
pub mod state;
pub mod storage;
pub mod test_helpers;
