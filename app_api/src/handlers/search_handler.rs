use crate::result::{AppState, SearchListResult};
use actix_web::{Responder, get, web};
use biz_service::entitys::search_entity::SortBy;
use common::errors::AppError;
use serde::Deserialize;
use utoipa::IntoParams;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search);
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// 自然语言检索词
    #[serde(default)]
    pub query: String,
    /// experience | name
    #[serde(default)]
    pub sort: SortBy,
}

#[utoipa::path(
    get,
    path = "/api/search",
    tag = "检索",
    summary = "按技能 / 经历检索 Keyman",
    params(SearchQuery),
    responses(
        (status = 200, description = "检索结果，上游不可用时为空", body = SearchListResult)
    )
)]
#[get("/api/search")]
pub async fn search(state: web::Data<AppState>, query: web::Query<SearchQuery>) -> Result<impl Responder, AppError> {
    let results = state.search_service.search(&query.query, query.sort).await;
    Ok(web::Json(SearchListResult { total: results.len(), results }))
}
