// src/shared/shared_structs.rs

use serde::Serialize;

/// Envelope padrão das respostas de erro da API.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}
