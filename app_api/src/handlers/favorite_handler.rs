use crate::auth::Caller;
use crate::result::{AppState, FavoriteCheckResult, FavoriteListResult, FavoriteUpdateResult};
use actix_web::{Either, Responder, get, post, web};
use biz_service::entitys::favorite_entity::FavoriteRecord;
use common::errors::AppError;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(favorite_update);
    cfg.service(favorite_query);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteAction {
    Add,
    Remove,
}

/// 收藏 / 取消收藏请求体
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteUpdateDto {
    /// 被收藏的员工 ID
    #[schema(example = "KEYMAN007")]
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub image_url: Option<String>,
    pub action: FavoriteAction,
}

impl FavoriteUpdateDto {
    fn record(&self) -> FavoriteRecord {
        FavoriteRecord {
            name: self.name.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FavoriteQuery {
    /// 指定时只返回该员工是否已收藏
    pub user_id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    tag = "收藏",
    summary = "添加或取消收藏",
    request_body = FavoriteUpdateDto,
    responses(
        (status = 200, description = "最新收藏 ID 列表", body = FavoriteUpdateResult),
        (status = 400, description = "Already in favorites"),
        (status = 401, description = "Not authenticated")
    )
)]
#[post("/api/favorites")]
pub async fn favorite_update(
    state: web::Data<AppState>,
    caller: Caller,
    dto: Result<web::Json<FavoriteUpdateDto>, actix_web::Error>,
) -> Result<impl Responder, actix_web::Error> {
    // 先鉴权，再看请求体
    let identity = caller.require()?;
    let dto = dto?;
    dto.validate().map_err(AppError::from)?;

    let manager = &state.favorite_manager;
    let favorites = match dto.action {
        FavoriteAction::Add => manager.add(identity, &dto.user_id, &dto.record()).await?,
        FavoriteAction::Remove => manager.remove(identity, &dto.user_id).await?,
    };
    Ok(web::Json(FavoriteUpdateResult { success: true, favorites }))
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = "收藏",
    summary = "收藏列表，或查询单个员工是否已收藏",
    params(FavoriteQuery),
    responses(
        (status = 200, description = "带 userId 时返回 {isFavorited}，否则返回 {favorites}", body = FavoriteListResult)
    )
)]
#[get("/api/favorites")]
pub async fn favorite_query(state: web::Data<AppState>, caller: Caller, query: web::Query<FavoriteQuery>) -> Result<impl Responder, AppError> {
    let manager = &state.favorite_manager;
    let response = match query.user_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        Some(target_id) => {
            let is_favorited = manager.is_favorited(caller.identity(), target_id).await?;
            Either::Left(web::Json(FavoriteCheckResult { is_favorited }))
        }
        None => {
            let favorites = manager.list(caller.identity()).await?;
            Either::Right(web::Json(FavoriteListResult { favorites }))
        }
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use crate::handlers;
    use crate::handlers::test_support::{IDENTITY_HEADER, state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    fn add_body(user_id: &str, name: &str) -> Value {
        json!({
            "userId": user_id,
            "name": name,
            "position": "Engineer",
            "department": "Robotics",
            "imageUrl": format!("/images/{}.jpg", user_id),
            "action": "add"
        })
    }

    #[actix_web::test]
    async fn anonymous_list_is_empty() {
        let (state, _) = state();
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(handlers::configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/favorites").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"favorites": []}));
    }

    #[actix_web::test]
    async fn anonymous_add_is_rejected_without_mutation() {
        let (state, store) = state();
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(handlers::configure)).await;

        let req = test::TestRequest::post().uri("/api/favorites").set_json(add_body("KEYMAN001", "Park")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Not authenticated");
        assert!(store.keys().await.is_empty());
    }

    #[actix_web::test]
    async fn anonymous_malformed_body_is_unauthorized() {
        let (state, store) = state();
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(handlers::configure)).await;

        for body in [json!({"userId": "KEYMAN001", "action": "toggle"}), json!({"action": "add"}), json!({"userId": "", "action": "add"})] {
            let req = test::TestRequest::post().uri("/api/favorites").set_json(body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "Not authenticated");
        }
        assert!(store.keys().await.is_empty());
    }

    #[actix_web::test]
    async fn padded_user_id_matches_query() {
        let (state, _) = state();
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(handlers::configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/favorites")
            .insert_header((IDENTITY_HEADER, "kim@posco.com"))
            .set_json(add_body(" KEYMAN001", "Park"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"success": true, "favorites": ["KEYMAN001"]}));

        let req = test::TestRequest::get()
            .uri("/api/favorites?userId=%20KEYMAN001")
            .insert_header((IDENTITY_HEADER, "kim@posco.com"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"isFavorited": true}));
    }

    #[actix_web::test]
    async fn add_list_check_remove() {
        let (state, _) = state();
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(handlers::configure)).await;

        for (id, name) in [("KEYMAN001", "Park"), ("KEYMAN002", "Ahn")] {
            let req = test::TestRequest::post()
                .uri("/api/favorites")
                .insert_header((IDENTITY_HEADER, "kim@posco.com"))
                .set_json(add_body(id, name))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["success"], true);
        }

        let req = test::TestRequest::get().uri("/api/favorites").insert_header((IDENTITY_HEADER, "kim@posco.com")).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["favorites"][0]["userId"], "KEYMAN002");
        assert_eq!(body["favorites"][0]["name"], "Ahn");
        assert_eq!(body["favorites"][1]["userId"], "KEYMAN001");
        assert_eq!(body["favorites"][1]["imageUrl"], "/images/KEYMAN001.jpg");

        let req = test::TestRequest::get()
            .uri("/api/favorites?userId=KEYMAN001")
            .insert_header((IDENTITY_HEADER, "kim@posco.com"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"isFavorited": true}));

        let req = test::TestRequest::post()
            .uri("/api/favorites")
            .insert_header((IDENTITY_HEADER, "kim@posco.com"))
            .set_json(json!({"userId": "KEYMAN001", "action": "remove"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"success": true, "favorites": ["KEYMAN002"]}));

        // 其他用户看不到
        let req = test::TestRequest::get()
            .uri("/api/favorites?userId=KEYMAN002")
            .insert_header((IDENTITY_HEADER, "lee@posco.com"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"isFavorited": false}));
    }

    #[actix_web::test]
    async fn duplicate_add_is_bad_request() {
        let (state, _) = state();
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(handlers::configure)).await;

        let req = || {
            test::TestRequest::post()
                .uri("/api/favorites")
                .insert_header((IDENTITY_HEADER, "kim@posco.com"))
                .set_json(add_body("KEYMAN001", "Park"))
                .to_request()
        };
        assert_eq!(test::call_service(&app, req()).await.status(), StatusCode::OK);

        let resp = test::call_service(&app, req()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Already in favorites");
        assert_eq!(body["reason"], "already_favorited");
    }

    #[actix_web::test]
    async fn unknown_action_is_bad_request() {
        let (state, store) = state();
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(handlers::configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/favorites")
            .insert_header((IDENTITY_HEADER, "kim@posco.com"))
            .set_json(json!({"userId": "KEYMAN001", "action": "toggle"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(store.keys().await.is_empty());
    }

    #[actix_web::test]
    async fn empty_user_id_is_bad_request() {
        let (state, _) = state();
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(handlers::configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/favorites")
            .insert_header((IDENTITY_HEADER, "kim@posco.com"))
            .set_json(json!({"userId": "", "action": "add"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
