// src/categories/category_router.rs

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use tracing::{debug, info, warn};

use super::category_structs::{Category, CategoryDto};
use crate::error::ApiError;
use crate::repository::Repository;
use crate::unit_of_work::{UnitOfWork, UnitOfWorkProvider};

/// Registra as rotas de `/api/categories` para o provedor `D`.
pub fn configure<D: UnitOfWorkProvider>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/categories")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(buscar_categorias::<D>))
                    .route(web::post().to(cadastrar_categoria::<D>)),
            )
            .service(
                web::resource("/{id}")
                    .name("categoria_por_id")
                    .route(web::get().to(buscar_categoria_por_id::<D>))
                    .route(web::put().to(atualizar_categoria::<D>))
                    .route(web::delete().to(deletar_categoria::<D>)),
            ),
    );
}

fn categoria_nao_encontrada(id: i32) -> ApiError {
    ApiError::NotFound(format!("Categoria com ID {} não encontrada.", id))
}

/// GET /api/categories
pub async fn buscar_categorias<D: UnitOfWorkProvider>(db: web::Data<D>) -> Result<HttpResponse, ApiError> {
    let mut uow = db.begin().await?;
    let categorias = uow.categories().get_all().await?;

    let response: Vec<CategoryDto> = categorias.into_iter().map(CategoryDto::from).collect();
    debug!(total = response.len(), "Categorias listadas");
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/categories/{id}
pub async fn buscar_categoria_por_id<D: UnitOfWorkProvider>(
    db: web::Data<D>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let mut uow = db.begin().await?;

    let categoria = uow
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| categoria_nao_encontrada(id))?;

    Ok(HttpResponse::Ok().json(CategoryDto::from(categoria)))
}

/// POST /api/categories
pub async fn cadastrar_categoria<D: UnitOfWorkProvider>(
    req: HttpRequest,
    db: web::Data<D>,
    item: web::Json<CategoryDto>,
) -> Result<HttpResponse, ApiError> {
    let mut categoria = Category::from(item.into_inner());

    let mut uow = db.begin().await?;
    uow.categories().add(&mut categoria).await?;
    uow.complete().await?;

    info!(id = categoria.id, nome = %categoria.name, "Categoria cadastrada");

    let location = req
        .url_for("categoria_por_id", [categoria.id.to_string()])
        .map_err(|e| ApiError::Internal(format!("Falha ao gerar Location: {}", e)))?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.as_str()))
        .json(CategoryDto::from(categoria)))
}

/// PUT /api/categories/{id}
pub async fn atualizar_categoria<D: UnitOfWorkProvider>(
    db: web::Data<D>,
    path: web::Path<i32>,
    item: web::Json<CategoryDto>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let dto = item.into_inner();

    if id != dto.id {
        warn!(id_rota = id, id_corpo = dto.id, "IDs divergentes na atualização de categoria");
        return Err(ApiError::BadRequest(format!(
            "O ID da rota ({}) difere do ID do corpo ({}).",
            id, dto.id
        )));
    }

    let categoria = Category::from(dto);
    let mut uow = db.begin().await?;
    uow.categories().update(&categoria).await?;
    uow.complete().await?;

    info!(id, "Categoria atualizada");
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/categories/{id}
///
/// Categoria ainda referenciada por produtos falha no commit (FK), como erro 500.
pub async fn deletar_categoria<D: UnitOfWorkProvider>(
    db: web::Data<D>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let mut uow = db.begin().await?;

    let categoria = uow
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| categoria_nao_encontrada(id))?;

    uow.categories().delete(&categoria).await?;
    uow.complete().await?;

    info!(id, "Categoria deletada");
    Ok(HttpResponse::NoContent().finish())
}
