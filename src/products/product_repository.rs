// src/products/product_repository.rs

use async_trait::async_trait;

use super::product_structs::Product;
use crate::error::DbResult;
use crate::repository::{PgRepository, Repository};

/// Repositório de produtos: o CRUD genérico mais o filtro por categoria.
#[async_trait(?Send)]
pub trait ProductRepository: Repository<Product> {
    /// Produtos com `category_id` igual ao informado. Vazio quando não há nenhum.
    async fn get_products_by_category(&mut self, category_id: i32) -> DbResult<Vec<Product>>;
}

#[async_trait(?Send)]
impl<'a> ProductRepository for PgRepository<'a, Product> {
    async fn get_products_by_category(&mut self, category_id: i32) -> DbResult<Vec<Product>> {
        self.fetch_where("category_id", category_id).await
    }
}
