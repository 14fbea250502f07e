//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Backend de almacenamiento de vehículos y reservas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub storage_backend: StorageBackend,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            storage_backend: StorageBackend::Postgres,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar usando una función de búsqueda de variables; las ausentes toman el valor por defecto
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS")?.unwrap_or(defaults.request_timeout_secs),
            storage_backend: parse_var(&lookup, "STORAGE_BACKEND")?.unwrap_or(defaults.storage_backend),
        })
    }

    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow!("{}", e))
                .with_context(|| format!("{} has an invalid value: '{}'", key, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.storage_backend, StorageBackend::Postgres);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_reads_values() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://localhost:3000, https://fleet.example.com,"),
            ("STORAGE_BACKEND", "memory"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000", "https://fleet.example.com"]);
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = EnvironmentConfig::from_lookup(lookup_from(&[("PORT", "cinco mil")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
