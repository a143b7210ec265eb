pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod form;
pub mod persist;
pub mod session;
