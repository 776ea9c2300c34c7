// src/repository/pg_repository.rs

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Row, Transaction};
use tracing::debug;

use super::{Entity, Repository};
use crate::error::{DbError, DbResult};

/// Repositório PostgreSQL genérico, preso à transação de uma unidade de trabalho.
///
/// Os comandos rodam dentro da transação assim que chamados; o `COMMIT` só
/// acontece em `PgUnitOfWork::complete`. `affected` acumula as linhas tocadas
/// para o total devolvido no commit.
pub struct PgRepository<'a, T> {
    tx: &'a mut Transaction<'static, Postgres>,
    affected: &'a mut u64,
    _entity: PhantomData<T>,
}

impl<'a, T: Entity> PgRepository<'a, T> {
    pub(crate) fn new(tx: &'a mut Transaction<'static, Postgres>, affected: &'a mut u64) -> Self {
        PgRepository {
            tx,
            affected,
            _entity: PhantomData,
        }
    }

    /// Busca as linhas cuja `column` é igual a `value`, ordenadas por ID.
    ///
    /// `column` vem sempre de código, nunca da requisição.
    pub(crate) async fn fetch_where(&mut self, column: &'static str, value: i32) -> DbResult<Vec<T>> {
        let sql = format!("{} WHERE {} = $1 ORDER BY id", select_sql::<T>(), column);
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(value)
            .fetch_all(&mut **self.tx)
            .await?;

        debug!(tabela = T::TABLE, coluna = column, valor = value, total = rows.len(), "Consulta filtrada");
        Ok(rows)
    }
}

#[async_trait(?Send)]
impl<'a, T: Entity> Repository<T> for PgRepository<'a, T> {
    async fn get_all(&mut self) -> DbResult<Vec<T>> {
        let sql = format!("{} ORDER BY id", select_sql::<T>());
        let rows = sqlx::query_as::<_, T>(&sql)
            .fetch_all(&mut **self.tx)
            .await?;

        debug!(tabela = T::TABLE, total = rows.len(), "Listagem");
        Ok(rows)
    }

    async fn get_by_id(&mut self, id: i32) -> DbResult<Option<T>> {
        let sql = format!("{} WHERE id = $1", select_sql::<T>());
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&mut **self.tx)
            .await?;

        Ok(row)
    }

    async fn add(&mut self, entity: &mut T) -> DbResult<()> {
        let mut builder = QueryBuilder::<Postgres>::new(insert_prefix::<T>());
        entity.push_values(&mut builder);
        builder.push(") RETURNING id");

        let row = builder.build().fetch_one(&mut **self.tx).await?;
        let id: i32 = row.try_get("id")?;

        entity.set_id(id);
        *self.affected += 1;
        debug!(tabela = T::TABLE, id, "Inserção registrada");
        Ok(())
    }

    async fn update(&mut self, entity: &T) -> DbResult<()> {
        let mut builder = QueryBuilder::<Postgres>::new(update_prefix::<T>());
        entity.push_values(&mut builder);
        builder.push(") WHERE id = ");
        builder.push_bind(entity.id());

        let result = builder.build().execute(&mut **self.tx).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NoRowsAffected {
                table: T::TABLE,
                id: entity.id(),
            });
        }

        *self.affected += result.rows_affected();
        debug!(tabela = T::TABLE, id = entity.id(), "Atualização registrada");
        Ok(())
    }

    async fn delete(&mut self, entity: &T) -> DbResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql)
            .bind(entity.id())
            .execute(&mut **self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NoRowsAffected {
                table: T::TABLE,
                id: entity.id(),
            });
        }

        *self.affected += result.rows_affected();
        debug!(tabela = T::TABLE, id = entity.id(), "Exclusão registrada");
        Ok(())
    }
}

fn select_sql<T: Entity>() -> String {
    format!("SELECT id, {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
}

fn insert_prefix<T: Entity>() -> String {
    format!("INSERT INTO {} ({}) VALUES (", T::TABLE, T::COLUMNS.join(", "))
}

// ROW(...) é obrigatório quando a lista tem uma coluna só
fn update_prefix<T: Entity>() -> String {
    format!("UPDATE {} SET ({}) = ROW(", T::TABLE, T::COLUMNS.join(", "))
}
