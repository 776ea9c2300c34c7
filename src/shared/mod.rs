// src/shared/mod.rs

// Structs compartilhadas entre os módulos de rotas
pub mod shared_structs;
