pub mod api_client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod ranking;
pub mod repositories;
pub mod view;
