use crate::auth::Caller;
use crate::result::{AppState, ProfileResult};
use actix_web::{Responder, get, web};
use biz_service::biz_service::profile_service::numeric_id;
use common::errors::AppError;
use log::debug;
use serde::Deserialize;
use utoipa::IntoParams;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(profile_detail);
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileQuery {
    /// 进入详情页前的检索词，用于生成推荐理由
    #[serde(default)]
    pub query: String,
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    tag = "检索",
    summary = "Keyman 详情",
    params(
        ("id" = String, Path, description = "员工 ID，如 KEYMAN007"),
        ProfileQuery
    ),
    responses(
        (status = 200, description = "资料与推荐理由", body = ProfileResult),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Not found")
    )
)]
#[get("/api/profiles/{id}")]
pub async fn profile_detail(state: web::Data<AppState>, caller: Caller, path: web::Path<String>, query: web::Query<ProfileQuery>) -> Result<impl Responder, AppError> {
    caller.require()?;
    let id = path.into_inner();
    let profile = state.profile_service.view(&id)?;

    let query = query.query.trim();
    let explanation = match numeric_id(&id) {
        Some(n) if !query.is_empty() => state.search_service.explain(query, n).await,
        _ => {
            debug!("[Profile] {} 无检索词或编号，跳过推荐理由", id);
            String::new()
        }
    };
    Ok(web::Json(ProfileResult { profile, explanation }))
}
