// src/products/product_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, QueryBuilder};

use crate::repository::Entity;

/// Produto como está na tabela `products`.
/// `category_id` é opcional; quando presente a FK garante que a categoria existe.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category_id: Option<i32>,
}

impl Entity for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &["name", "category_id"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn push_values(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        let mut values = builder.separated(", ");
        values.push_bind(self.name.clone());
        values.push_bind(self.category_id);
    }
}

/// Representação do produto na API (JSON em camelCase).
/// Sem `id` no corpo, vale 0, como num cadastro novo.
/// Na entrada também aceita as chaves em PascalCase (`Id`, `Name`, `CategoryId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default, alias = "Id")]
    pub id: i32,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "CategoryId")]
    pub category_id: Option<i32>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        ProductDto {
            id: product.id,
            name: product.name,
            category_id: product.category_id,
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Product {
            id: dto.id,
            name: dto.name,
            category_id: dto.category_id,
        }
    }
}
