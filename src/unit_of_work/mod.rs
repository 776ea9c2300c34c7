// src/unit_of_work/mod.rs

//! Unidade de trabalho: uma transação por requisição, compartilhada pelos
//! repositórios de produtos e categorias, com um único ponto de commit.
//!
//! Fluxo de um handler:
//!
//! ```text
//! let mut uow = db.begin().await?;          // BEGIN
//! uow.products().add(&mut product).await?;  // INSERT dentro da transação
//! uow.complete().await?;                    // COMMIT, devolve linhas afetadas
//! ```
//!
//! Se a unidade sair de escopo sem `complete` (erro, 404, early return), a
//! transação é desfeita no `Drop`.

use async_trait::async_trait;

use crate::categories::category_repository::CategoryRepository;
use crate::error::DbResult;
use crate::products::product_repository::ProductRepository;

pub mod pg_unit_of_work;

#[cfg(test)]
pub mod memory;

pub use pg_unit_of_work::PgDatabase;

#[async_trait(?Send)]
pub trait UnitOfWork: Sized {
    type Products<'a>: ProductRepository
    where
        Self: 'a;

    type Categories<'a>: CategoryRepository
    where
        Self: 'a;

    fn products(&mut self) -> Self::Products<'_>;

    fn categories(&mut self) -> Self::Categories<'_>;

    /// Efetiva tudo o que foi registrado pelos repositórios, atomicamente.
    /// Violações de restrição aparecem aqui como `DbError`.
    async fn complete(self) -> DbResult<u64>;
}

/// Abre uma unidade de trabalho nova. Fica no estado da aplicação (`web::Data`).
#[async_trait(?Send)]
pub trait UnitOfWorkProvider: 'static {
    type Work: UnitOfWork;

    async fn begin(&self) -> DbResult<Self::Work>;
}
