//! API de gestión logística: flota, cargas, rutas de reparto,
//! personal y capacitaciones.

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
