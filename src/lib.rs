//! FleetLink
//!
//! Backend de reservas de vehículos: catálogo de flota, búsqueda de vehículos
//! disponibles y reservas sin solapamiento por vehículo.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
