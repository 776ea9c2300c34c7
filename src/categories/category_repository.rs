// src/categories/category_repository.rs

use super::category_structs::Category;
use crate::repository::{PgRepository, Repository};

/// Repositório de categorias. Por enquanto só o CRUD genérico.
pub trait CategoryRepository: Repository<Category> {}

impl<'a> CategoryRepository for PgRepository<'a, Category> {}
