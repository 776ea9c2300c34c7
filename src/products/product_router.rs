// src/products/product_router.rs

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use tracing::{debug, info, warn};

use super::product_repository::ProductRepository;
use super::product_structs::{Product, ProductDto};
use crate::error::ApiError;
use crate::repository::Repository;
use crate::unit_of_work::{UnitOfWork, UnitOfWorkProvider};

/// Registra as rotas de `/api/products` para o provedor `D`.
///
/// Os handlers são genéricos no provedor para que os testes usem o banco em memória.
pub fn configure<D: UnitOfWorkProvider>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/products")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(buscar_produtos::<D>))
                    .route(web::post().to(cadastrar_produto::<D>)),
            )
            .service(
                web::resource("/GetProductsByCategory/{category_id}")
                    .route(web::get().to(buscar_produtos_por_categoria::<D>)),
            )
            .service(
                web::resource("/{id}")
                    .name("produto_por_id")
                    .route(web::get().to(buscar_produto_por_id::<D>))
                    .route(web::put().to(atualizar_produto::<D>))
                    .route(web::delete().to(deletar_produto::<D>)),
            ),
    );
}

fn produto_nao_encontrado(id: i32) -> ApiError {
    ApiError::NotFound(format!("Produto com ID {} não encontrado.", id))
}

/// GET /api/products
///
/// Lista vazia também é 200.
pub async fn buscar_produtos<D: UnitOfWorkProvider>(db: web::Data<D>) -> Result<HttpResponse, ApiError> {
    let mut uow = db.begin().await?;
    let produtos = uow.products().get_all().await?;

    let response: Vec<ProductDto> = produtos.into_iter().map(ProductDto::from).collect();
    debug!(total = response.len(), "Produtos listados");
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/products/{id}
pub async fn buscar_produto_por_id<D: UnitOfWorkProvider>(
    db: web::Data<D>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let mut uow = db.begin().await?;

    let produto = uow
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| produto_nao_encontrado(id))?;

    Ok(HttpResponse::Ok().json(ProductDto::from(produto)))
}

/// POST /api/products
///
/// Cadastra e devolve 201 com o ID gerado e o header Location.
/// O `id` do corpo é ignorado.
pub async fn cadastrar_produto<D: UnitOfWorkProvider>(
    req: HttpRequest,
    db: web::Data<D>,
    item: web::Json<ProductDto>,
) -> Result<HttpResponse, ApiError> {
    let mut produto = Product::from(item.into_inner());

    let mut uow = db.begin().await?;
    uow.products().add(&mut produto).await?;
    uow.complete().await?;

    info!(id = produto.id, nome = %produto.name, "Produto cadastrado");

    let location = req
        .url_for("produto_por_id", [produto.id.to_string()])
        .map_err(|e| ApiError::Internal(format!("Falha ao gerar Location: {}", e)))?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.as_str()))
        .json(ProductDto::from(produto)))
}

/// PUT /api/products/{id}
///
/// Substitui o produto inteiro.
/// ID da rota diferente do ID do corpo dá 400 sem abrir unidade de trabalho.
pub async fn atualizar_produto<D: UnitOfWorkProvider>(
    db: web::Data<D>,
    path: web::Path<i32>,
    item: web::Json<ProductDto>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let dto = item.into_inner();

    if id != dto.id {
        warn!(id_rota = id, id_corpo = dto.id, "IDs divergentes na atualização de produto");
        return Err(ApiError::BadRequest(format!(
            "O ID da rota ({}) difere do ID do corpo ({}).",
            id, dto.id
        )));
    }

    let produto = Product::from(dto);
    let mut uow = db.begin().await?;
    uow.products().update(&produto).await?;
    uow.complete().await?;

    info!(id, "Produto atualizado");
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/products/{id}
pub async fn deletar_produto<D: UnitOfWorkProvider>(
    db: web::Data<D>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let mut uow = db.begin().await?;

    // Sem produto, a unidade cai fora de escopo sem commit
    let produto = uow
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| produto_nao_encontrado(id))?;

    uow.products().delete(&produto).await?;
    uow.complete().await?;

    info!(id, "Produto deletado");
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/products/GetProductsByCategory/{category_id}
///
/// Diferente da listagem geral, nenhum resultado aqui é 404.
pub async fn buscar_produtos_por_categoria<D: UnitOfWorkProvider>(
    db: web::Data<D>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let category_id = path.into_inner();
    let mut uow = db.begin().await?;

    let produtos = uow.products().get_products_by_category(category_id).await?;
    if produtos.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Nenhum produto encontrado para a categoria {}.",
            category_id
        )));
    }

    let response: Vec<ProductDto> = produtos.into_iter().map(ProductDto::from).collect();
    debug!(category_id, total = response.len(), "Produtos da categoria listados");
    Ok(HttpResponse::Ok().json(response))
}
