// src/unit_of_work/pg_unit_of_work.rs

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use super::{UnitOfWork, UnitOfWorkProvider};
use crate::categories::category_structs::Category;
use crate::config::AppConfig;
use crate::error::{DbError, DbResult};
use crate::products::product_structs::Product;
use crate::repository::PgRepository;

/// Pool PostgreSQL compartilhado pela aplicação. Cada `begin` abre uma transação.
#[derive(Debug, Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        PgDatabase { pool }
    }

    /// Cria o pool com os limites da configuração.
    pub async fn connect(config: &AppConfig) -> DbResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await?;

        info!(max_conexoes = config.db_max_connections, "Pool PostgreSQL criado");
        Ok(PgDatabase::new(pool))
    }
}

#[async_trait(?Send)]
impl UnitOfWorkProvider for PgDatabase {
    type Work = PgUnitOfWork;

    async fn begin(&self) -> DbResult<PgUnitOfWork> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Unidade de trabalho iniciada");
        Ok(PgUnitOfWork { tx, affected: 0 })
    }
}

/// Unidade de trabalho sobre uma transação PostgreSQL.
///
/// O `Drop` da `Transaction` do sqlx faz o ROLLBACK quando `complete` não é chamado.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
    affected: u64,
}

#[async_trait(?Send)]
impl UnitOfWork for PgUnitOfWork {
    type Products<'a> = PgRepository<'a, Product>
    where
        Self: 'a;

    type Categories<'a> = PgRepository<'a, Category>
    where
        Self: 'a;

    fn products(&mut self) -> Self::Products<'_> {
        PgRepository::new(&mut self.tx, &mut self.affected)
    }

    fn categories(&mut self) -> Self::Categories<'_> {
        PgRepository::new(&mut self.tx, &mut self.affected)
    }

    async fn complete(self) -> DbResult<u64> {
        let affected = self.affected;
        // Erros de FK adiada chegam aqui; o From preserva a classificação
        self.tx.commit().await.map_err(|e| match DbError::from(e) {
            DbError::Internal(message) => DbError::TransactionFailed(message),
            other => other,
        })?;

        debug!(linhas = affected, "Unidade de trabalho concluída");
        Ok(affected)
    }
}
