//! # Record HTTP Handlers
//!
//! user / admin 레코드 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 두 종류가 같은 핸들러를 공유하며, 어떤 컬렉션을 대상으로 할지는
//! 라우트 스코프가 주입하는 `web::Data<EntityKind>`로 결정됩니다.
//!
//! | 메서드 | 경로 (user / admin) | 설명 | 상태 코드 |
//! |--------|---------------------|------|-----------|
//! | `GET` | `/pessoas`, `/admin` | 목록 조회 | 200 OK |
//! | `GET` | `/pessoas/{cpf}`, `/admin/{cpf}` | 단건 조회 | 200 OK |
//! | `POST` | `/pessoas/create`, `/admin/create` | 생성 | 201 Created |
//! | `PATCH` | `/pessoas/{cpf}`, `/admin/{cpf}` | 부분 업데이트 | 200 OK |
//! | `DELETE` | `/pessoas/delete/{cpf}`, `/admin/delete/{cpf}` | 삭제 | 200 OK |
//!
//! 실패는 모두 `AppError`로 반환되어 `ResponseError` 구현이 상태 코드를 결정합니다.

use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::records::{
    CreateRecordRequest, CreateRecordResponse, MessageResponse, UpdateRecordRequest, UpdateRecordResponse,
};
use crate::domain::entities::records::EntityKind;
use crate::services::records::{RecordService, UpdateOutcome};

pub async fn list_records(
    kind: web::Data<EntityKind>,
    service: web::Data<RecordService>,
) -> Result<HttpResponse, AppError> {
    let records = service.list_records(*kind.get_ref()).await?;

    Ok(HttpResponse::Ok().json(records))
}

pub async fn get_record(
    kind: web::Data<EntityKind>,
    service: web::Data<RecordService>,
    cpf: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let record = service.get_record(*kind.get_ref(), &cpf).await?;

    Ok(HttpResponse::Ok().json(record))
}

pub async fn create_record(
    kind: web::Data<EntityKind>,
    service: web::Data<RecordService>,
    payload: web::Json<CreateRecordRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let kind = *kind.get_ref();
    let record = service.create_record(kind, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(CreateRecordResponse::new(kind, record)))
}

pub async fn update_record(
    kind: web::Data<EntityKind>,
    service: web::Data<RecordService>,
    cpf: web::Path<String>,
    payload: web::Json<UpdateRecordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let kind = *kind.get_ref();
    let changes = payload.into_inner().into_changes();
    let response = match service.update_record(kind, &cpf, changes).await? {
        UpdateOutcome::Updated { applied } => UpdateRecordResponse::updated(applied),
        UpdateOutcome::NoChange => UpdateRecordResponse::unchanged(kind),
    };

    Ok(HttpResponse::Ok().json(response))
}

pub async fn delete_record(
    kind: web::Data<EntityKind>,
    service: web::Data<RecordService>,
    cpf: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let kind = *kind.get_ref();
    service.delete_record(kind, &cpf).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::deleted(kind)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use crate::domain::entities::records::fields;
    use crate::repositories::records::{CollectionRegistry, InMemoryCollection};
    use crate::routes::configure_all_routes;
    use super::*;

    fn service() -> web::Data<RecordService> {
        let registry = CollectionRegistry::new()
            .register(
                EntityKind::User,
                Arc::new(InMemoryCollection::new("people").with_unique_fields(&fields::UNIQUE)),
            )
            .register(
                EntityKind::Admin,
                Arc::new(InMemoryCollection::new("admins").with_unique_fields(&fields::UNIQUE)),
            );
        web::Data::new(RecordService::new(registry))
    }

    fn joao() -> Value {
        json!({
            "cpf": "111",
            "name": "Joao",
            "first_name": "Joao",
            "last_name": "Silva",
            "email": "a@x.com",
            "age": 35
        })
    }

    #[actix_web::test]
    async fn test_user_lifecycle_over_http() {
        let app = test::init_service(App::new().app_data(service()).configure(configure_all_routes)).await;

        let req = test::TestRequest::post().uri("/pessoas/create").set_json(joao()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post().uri("/pessoas/create").set_json(joao()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "duplicate_natural_key");

        let req = test::TestRequest::patch().uri("/pessoas/111").set_json(json!({ "age": 36 })).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["updated_fields"], json!(["age"]));

        let req = test::TestRequest::get().uri("/pessoas/111").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["age"], 36);
        assert_eq!(body["role"], "user");
        assert!(body["id"].is_string());

        let req = test::TestRequest::delete().uri("/pessoas/delete/111").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/pessoas/111").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_admin_scope_uses_its_own_collection() {
        let app = test::init_service(App::new().app_data(service()).configure(configure_all_routes)).await;

        let req = test::TestRequest::post().uri("/admin/create").set_json(joao()).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post().uri("/pessoas/create").set_json(joao()).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/admin").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["role"], "admin");
    }

    #[actix_web::test]
    async fn test_update_with_immutable_fields_only_is_no_change() {
        let app = test::init_service(App::new().app_data(service()).configure(configure_all_routes)).await;

        let req = test::TestRequest::post().uri("/pessoas/create").set_json(joao()).to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::patch()
            .uri("/pessoas/111")
            .set_json(json!({ "status": "inactive", "role": "admin" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["updated_fields"], json!([]));
    }

    #[actix_web::test]
    async fn test_invalid_payload_is_bad_request() {
        let app = test::init_service(App::new().app_data(service()).configure(configure_all_routes)).await;

        let mut payload = joao();
        payload["email"] = json!("not-an-email");
        let req = test::TestRequest::post().uri("/pessoas/create").set_json(payload).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/pessoas/create")
            .set_json(json!({ "cpf": "111" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete_missing_record_is_not_found() {
        let app = test::init_service(App::new().app_data(service()).configure(configure_all_routes)).await;

        let req = test::TestRequest::delete().uri("/admin/delete/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "delete_failed");
    }
}
