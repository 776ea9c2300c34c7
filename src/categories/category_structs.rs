// src/categories/category_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, QueryBuilder};

use crate::repository::Entity;

/// Categoria como está na tabela `categories`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

impl Entity for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn push_values(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.separated(", ").push_bind(self.name.clone());
    }
}

/// Representação da categoria na API. Aceita `Id`/`Name` na entrada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default, alias = "Id")]
    pub id: i32,
    #[serde(alias = "Name")]
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        CategoryDto {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Category {
            id: dto.id,
            name: dto.name,
        }
    }
}
