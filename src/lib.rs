pub mod bundle;
pub mod capture;
pub mod config;
pub mod error;
pub mod finder;
pub mod icon;
pub mod logger;
pub mod shell;
pub mod types;
