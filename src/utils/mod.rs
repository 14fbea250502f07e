//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y validación de entradas.

pub mod errors;
pub mod extractors;
pub mod validation;
