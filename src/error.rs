// src/error.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

use crate::shared::shared_structs::ErrorResponse;

/// Falhas da camada de persistência.
///
/// Nenhuma delas é traduzida em erro de domínio: violações de restrição,
/// problemas de conexão e afins chegam ao cliente como erro 500.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Falha de conexão com o banco: {0}")]
    ConnectionFailed(String),

    /// SQLSTATE 23503. Com a FK adiada, costuma aparecer só no COMMIT.
    #[error("Violação de chave estrangeira: {0}")]
    ForeignKeyViolation(String),

    /// SQLSTATE 23505.
    #[error("Valor duplicado: {0}")]
    UniqueViolation(String),

    /// UPDATE/DELETE por ID que não encontrou a linha.
    #[error("Nenhuma linha de {table} com ID {id} foi afetada")]
    NoRowsAffected { table: &'static str, id: i32 },

    #[error("Falha na consulta: {0}")]
    QueryFailed(String),

    #[error("Falha na transação: {0}")]
    TransactionFailed(String),

    #[error("Erro interno do banco: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    Some("23503") => DbError::ForeignKeyViolation(message),
                    Some("23505") => DbError::UniqueViolation(message),
                    _ => DbError::QueryFailed(message),
                }
            }
            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionFailed("Tempo esgotado aguardando conexão do pool".to_string())
            }
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool fechado".to_string()),
            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Erros devolvidos pelos handlers HTTP.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Database(e) => {
                // O detalhe fica no log, o cliente recebe uma mensagem genérica
                error!(erro = %e, "Erro no banco de dados");
                "Erro interno ao acessar o banco de dados.".to_string()
            }
            ApiError::Internal(detalhe) => {
                error!(erro = %detalhe, "Erro interno");
                "Erro interno do servidor.".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            status: "error".to_string(),
            message,
        })
    }
}
