pub mod backup;
pub mod config_io;
pub mod export;
pub mod logging;
pub mod store;
