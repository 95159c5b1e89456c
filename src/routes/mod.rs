//! API 라우트 설정 모듈
//!
//! user / admin 레코드 라우트와 헬스체크 엔드포인트를 등록합니다.
//! 두 종류는 같은 핸들러를 공유하며, 스코프마다 자신의 [`EntityKind`]를
//! `app_data`로 주입합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .app_data(web::Data::new(record_service))
//!     .configure(configure_all_routes);
//! ```

use actix_web::web;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::records::EntityKind;
use crate::handlers;
use crate::services::records::RecordService;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // JSON 파싱 실패도 동일한 에러 응답 형식을 사용
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    );

    // Health check endpoint
    cfg.service(health_check);

    for kind in EntityKind::ALL {
        configure_record_routes(cfg, kind);
    }
}

/// 종류별 라우트 접두사
pub fn scope_path(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::User => "/pessoas",
        EntityKind::Admin => "/admin",
    }
}

fn configure_record_routes(cfg: &mut web::ServiceConfig, kind: EntityKind) {
    cfg.service(
        web::scope(scope_path(kind))
            .app_data(web::Data::new(kind))
            .route("", web::get().to(handlers::records::list_records))
            .route("/create", web::post().to(handlers::records::create_record))
            .route("/delete/{cpf}", web::delete().to(handlers::records::delete_record))
            .route("/{cpf}", web::get().to(handlers::records::get_record))
            .route("/{cpf}", web::patch().to(handlers::records::update_record))
    );
}

/// 서비스 상태와 컬렉션이 등록된 종류를 보고합니다.
#[actix_web::get("/health")]
async fn health_check(service: web::Data<RecordService>) -> actix_web::HttpResponse {
    let registered: Vec<EntityKind> = service.kinds().collect();

    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "record_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "collections": EntityKind::ALL
            .iter()
            .filter(|kind| registered.contains(*kind))
            .map(|kind| json!({ "kind": kind, "path": scope_path(*kind) }))
            .collect::<Vec<_>>()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::test::{call_and_read_body_json, init_service, TestRequest};
    use actix_web::App;
    use crate::repositories::records::{CollectionRegistry, InMemoryCollection};

    #[test]
    fn test_scope_paths_follow_kind() {
        assert_eq!(scope_path(EntityKind::User), "/pessoas");
        assert_eq!(scope_path(EntityKind::Admin), "/admin");
    }

    #[actix_web::test]
    async fn test_health_check_lists_registered_collections() {
        let registry = CollectionRegistry::new()
            .register(EntityKind::User, Arc::new(InMemoryCollection::new("people")));
        let service = web::Data::new(RecordService::new(registry));

        let app = init_service(App::new().app_data(service).service(health_check)).await;
        let req = TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["collections"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["collections"][0]["kind"], "user");
        assert_eq!(body["collections"][0]["path"], "/pessoas");
    }
}
