pub mod audit;
pub mod availability;
pub mod cache;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod locale;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
