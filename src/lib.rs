pub mod config;
pub mod diagnostics;
pub mod dto;
pub mod error;
pub mod pages;
pub mod parser;
pub mod routes;
pub mod services;
