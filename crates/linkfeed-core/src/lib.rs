pub mod config;
pub mod form;
pub mod links;
pub mod logging;
pub mod upload;
