pub mod config;
pub mod games;
pub mod logger;

pub mod version {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
