// src/unit_of_work/memory.rs

//! Provedor em memória para os testes dos handlers.
//!
//! Cada unidade trabalha sobre uma cópia das tabelas e, no `complete`, checa a
//! FK de `products.category_id` e troca a cópia pelo estado compartilhado.
//! Commits concorrentes se sobrescrevem; os testes rodam uma requisição por vez.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{UnitOfWork, UnitOfWorkProvider};
use crate::categories::category_repository::CategoryRepository;
use crate::categories::category_structs::Category;
use crate::error::{DbError, DbResult};
use crate::products::product_repository::ProductRepository;
use crate::products::product_structs::Product;
use crate::repository::{Entity, Repository};

#[derive(Debug, Clone)]
pub struct MemoryTable<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        MemoryTable {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Entity> MemoryTable<T> {
    fn seed(&mut self, row: T) {
        self.next_id = self.next_id.max(row.id() + 1);
        self.rows.insert(row.id(), row);
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    products: MemoryTable<Product>,
    categories: MemoryTable<Category>,
}

impl MemoryTables {
    fn check_foreign_keys(&self) -> DbResult<()> {
        for product in self.products.rows.values() {
            if let Some(category_id) = product.category_id {
                if !self.categories.rows.contains_key(&category_id) {
                    return Err(DbError::ForeignKeyViolation(format!(
                        "products.category_id = {} não existe em categories",
                        category_id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: MemoryTables,
    begins: usize,
    commits: usize,
}

/// Banco em memória. Clonar compartilha o mesmo estado.
#[derive(Debug, Clone, Default)]
pub struct MemoryDb {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDb {
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    pub fn seed_category(&self, id: i32, name: &str) {
        self.lock().tables.categories.seed(Category {
            id,
            name: name.to_string(),
        });
    }

    pub fn seed_product(&self, id: i32, name: &str, category_id: Option<i32>) {
        self.lock().tables.products.seed(Product {
            id,
            name: name.to_string(),
            category_id,
        });
    }

    /// Produtos já efetivados, em ordem de ID.
    pub fn products(&self) -> Vec<Product> {
        self.lock().tables.products.rows.values().cloned().collect()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.lock().tables.categories.rows.values().cloned().collect()
    }

    /// Quantas unidades de trabalho foram abertas.
    pub fn begins(&self) -> usize {
        self.lock().begins
    }

    pub fn commits(&self) -> usize {
        self.lock().commits
    }
}

#[async_trait(?Send)]
impl UnitOfWorkProvider for MemoryDb {
    type Work = MemoryUnitOfWork;

    async fn begin(&self) -> DbResult<MemoryUnitOfWork> {
        let mut state = self.lock();
        state.begins += 1;
        Ok(MemoryUnitOfWork {
            db: self.clone(),
            working: state.tables.clone(),
            affected: 0,
        })
    }
}

pub struct MemoryUnitOfWork {
    db: MemoryDb,
    working: MemoryTables,
    affected: u64,
}

#[async_trait(?Send)]
impl UnitOfWork for MemoryUnitOfWork {
    type Products<'a> = MemoryRepository<'a, Product>
    where
        Self: 'a;

    type Categories<'a> = MemoryRepository<'a, Category>
    where
        Self: 'a;

    fn products(&mut self) -> Self::Products<'_> {
        MemoryRepository {
            table: &mut self.working.products,
            affected: &mut self.affected,
        }
    }

    fn categories(&mut self) -> Self::Categories<'_> {
        MemoryRepository {
            table: &mut self.working.categories,
            affected: &mut self.affected,
        }
    }

    async fn complete(self) -> DbResult<u64> {
        self.working.check_foreign_keys()?;

        let mut state = self.db.lock();
        state.tables = self.working;
        state.commits += 1;
        Ok(self.affected)
    }
}

pub struct MemoryRepository<'a, T> {
    table: &'a mut MemoryTable<T>,
    affected: &'a mut u64,
}

#[async_trait(?Send)]
impl<'a, T: Entity> Repository<T> for MemoryRepository<'a, T> {
    async fn get_all(&mut self) -> DbResult<Vec<T>> {
        Ok(self.table.rows.values().cloned().collect())
    }

    async fn get_by_id(&mut self, id: i32) -> DbResult<Option<T>> {
        Ok(self.table.rows.get(&id).cloned())
    }

    async fn add(&mut self, entity: &mut T) -> DbResult<()> {
        let id = self.table.next_id;
        self.table.next_id += 1;
        entity.set_id(id);
        self.table.rows.insert(id, entity.clone());
        *self.affected += 1;
        Ok(())
    }

    async fn update(&mut self, entity: &T) -> DbResult<()> {
        match self.table.rows.get_mut(&entity.id()) {
            Some(row) => {
                *row = entity.clone();
                *self.affected += 1;
                Ok(())
            }
            None => Err(DbError::NoRowsAffected {
                table: T::TABLE,
                id: entity.id(),
            }),
        }
    }

    async fn delete(&mut self, entity: &T) -> DbResult<()> {
        match self.table.rows.remove(&entity.id()) {
            Some(_) => {
                *self.affected += 1;
                Ok(())
            }
            None => Err(DbError::NoRowsAffected {
                table: T::TABLE,
                id: entity.id(),
            }),
        }
    }
}

#[async_trait(?Send)]
impl<'a> ProductRepository for MemoryRepository<'a, Product> {
    async fn get_products_by_category(&mut self, category_id: i32) -> DbResult<Vec<Product>> {
        Ok(self
            .table
            .rows
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .cloned()
            .collect())
    }
}

impl<'a> CategoryRepository for MemoryRepository<'a, Category> {}
