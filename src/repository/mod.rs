// src/repository/mod.rs

//! Repositório genérico de CRUD.
//!
//! Cada repositório é uma visão sobre a transação da unidade de trabalho que o
//! criou: nada do que ele grava é durável até `UnitOfWork::complete`.

use async_trait::async_trait;
use sqlx::postgres::{PgRow, Postgres};
use sqlx::{FromRow, QueryBuilder};

use crate::error::DbResult;

pub mod pg_repository;

pub use pg_repository::PgRepository;

/// Registro persistente com identidade inteira gerada pelo banco.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Clone + Send + Unpin + 'static {
    /// Nome da tabela.
    const TABLE: &'static str;

    /// Colunas além de `id`, na mesma ordem em que `push_values` faz os binds.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);

    /// Adiciona os valores de `COLUMNS` como parâmetros, separados por vírgula.
    fn push_values(&self, builder: &mut QueryBuilder<'_, Postgres>);
}

/// Operações de CRUD sobre um único tipo de entidade.
///
/// Os futures não são `Send`: os handlers rodam nos workers single-thread do actix.
#[async_trait(?Send)]
pub trait Repository<T: Entity> {
    /// Todas as linhas da tabela, ordenadas por ID.
    async fn get_all(&mut self) -> DbResult<Vec<T>>;

    /// `Ok(None)` quando o ID não existe.
    async fn get_by_id(&mut self, id: i32) -> DbResult<Option<T>>;

    /// Registra a inserção e grava em `entity` o ID gerado pelo banco.
    async fn add(&mut self, entity: &mut T) -> DbResult<()>;

    /// Substitui o registro inteiro pelo ID. Última escrita vence.
    async fn update(&mut self, entity: &T) -> DbResult<()>;

    async fn delete(&mut self, entity: &T) -> DbResult<()>;
}
