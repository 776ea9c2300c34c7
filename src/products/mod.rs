// src/products/mod.rs

// Entidade, DTO e mapeamento entre eles
pub mod product_structs;
// Repositório específico (filtro por categoria)
pub mod product_repository;
// Rotas HTTP de /api/products
pub mod product_router;
