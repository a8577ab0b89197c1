pub mod config;
pub mod error;
pub mod line;
pub mod prefecture;
pub mod reply;
pub mod routes;
pub mod state;
pub mod stats;
