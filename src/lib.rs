pub mod access;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod queries;
pub mod session;
pub mod state;
