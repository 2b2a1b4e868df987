use crate::handlers::common_handler::*;
use crate::handlers::favorite_handler::*;
use crate::handlers::profile_handler::*;
use crate::handlers::search_handler::*;

use crate::result::{FavoriteCheckResult, FavoriteListResult, FavoriteUpdateResult, ProfileResult, SearchListResult};
use actix_web::{HttpResponse, Responder, get, web};
use biz_service::entitys::favorite_entity::{FavoriteEntry, FavoriteRecord};
use common::errors::AppError;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        status,

        //收藏
        favorite_update,
        favorite_query,

        //检索
        search,
        profile_detail,
    ),
    components(schemas(
        FavoriteUpdateDto,
        FavoriteAction,
        FavoriteRecord,
        FavoriteEntry,
        FavoriteUpdateResult,
        FavoriteCheckResult,
        FavoriteListResult,
        SearchListResult,
        ProfileResult,
    )),
    tags(
        (name = "keyman-favorites-api", description = "Keyman search & favorites")
    )
)]
struct ApiDoc;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}

#[get("/openapi.json")]
async fn openapi_json() -> Result<impl Responder, AppError> {
    let body = ApiDoc::openapi().to_json()?;
    Ok(HttpResponse::Ok().content_type("application/json").body(body))
}
