pub mod config;

pub use config::FilinglensConfig;
