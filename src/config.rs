// src/config.rs

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Configuração da aplicação, lida de variáveis de ambiente.
///
/// Em desenvolvimento o `main` carrega antes o arquivo `.env` (ver `.env.example`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// String de conexão PostgreSQL. Obrigatória.
    pub database_url: String,
    /// Endereço de bind do servidor HTTP. Padrão: 127.0.0.1
    pub host: String,
    /// Porta do servidor HTTP. Padrão: 8080
    pub port: u16,
    /// Tamanho máximo do pool. Padrão: 5
    pub db_max_connections: u32,
    /// Tempo máximo esperando uma conexão livre. Padrão: 30s
    pub db_acquire_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuração obrigatória ausente: {0}")]
    MissingRequired(&'static str),

    #[error("Valor inválido para {0}")]
    InvalidValue(&'static str),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca qualquer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingRequired("DATABASE_URL"))?;

        Ok(AppConfig {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 30)?),
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(key)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/catalogo")])).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/catalogo");
        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_acquire_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "9000")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired("DATABASE_URL")));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/catalogo"),
            ("PORT", "oitenta"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("PORT")));
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/catalogo"),
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 3000));
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.db_acquire_timeout, Duration::from_secs(3));
    }
}
