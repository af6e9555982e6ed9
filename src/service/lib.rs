pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod models;
pub mod persistence;
pub mod services;
pub mod state;
