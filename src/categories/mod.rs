// src/categories/mod.rs

// Entidade, DTO e mapeamento entre eles
pub mod category_structs;
// Repositório específico de categorias
pub mod category_repository;
// Rotas HTTP de /api/categories
pub mod category_router;
