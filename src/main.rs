//! 레코드 관리 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다.
//! 저장소 연결은 시작 시 한 번 만들어 [`RecordService`]에 주입하고,
//! 서비스는 `web::Data`로 모든 워커가 공유합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use record_service_backend::config::{
    CollectionConfig, DatabaseConfig, Environment, RateLimitConfig, ServerConfig, StorageBackend, StorageConfig,
};
use record_service_backend::db::Database;
use record_service_backend::domain::entities::records::{fields, EntityKind};
use record_service_backend::repositories::records::{CollectionRegistry, InMemoryCollection, MongoCollection};
use record_service_backend::routes::configure_all_routes;
use record_service_backend::services::records::RecordService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 레코드 관리 서비스 시작중... (environment: {:?})", Environment::current());

    let registry = initialize_collections().await?;
    let service = web::Data::new(RecordService::new(registry));

    info!("✅ 컬렉션 초기화 완료");

    start_http_server(service).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
async fn start_http_server(service: web::Data<RecordService>) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("잘못된 Rate Limiting 설정"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(service.clone())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 종류별 컬렉션을 만들고 레지스트리에 등록합니다
///
/// `STORAGE_BACKEND=memory`이면 DB 없이 In-Memory 컬렉션을 사용합니다.
/// MongoDB 사용 시 연결 실패나 유니크 인덱스 생성 실패는 시작을 중단시킵니다.
async fn initialize_collections() -> std::io::Result<CollectionRegistry> {
    let mut registry = CollectionRegistry::new();

    match StorageConfig::backend() {
        StorageBackend::Memory => {
            warn!("⚠️ In-Memory 저장소 사용: 프로세스 종료 시 데이터가 사라집니다");

            for kind in EntityKind::ALL {
                let name = CollectionConfig::collection_name(kind);
                let collection = InMemoryCollection::new(name).with_unique_fields(&fields::UNIQUE);
                registry = registry.register(kind, Arc::new(collection));
            }
        }
        StorageBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");

            let database = Database::connect(&DatabaseConfig::from_env())
                .await
                .map_err(|e| std::io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?;

            for kind in EntityKind::ALL {
                let name = CollectionConfig::collection_name(kind);
                let collection = MongoCollection::new(&database, &name);
                collection
                    .create_indexes()
                    .await
                    .map_err(|e| std::io::Error::other(format!("인덱스 생성 실패 ({}): {}", name, e)))?;

                info!("📦 {} 컬렉션 등록: {}.{}", kind, database.database_name(), name);
                registry = registry.register(kind, Arc::new(collection));
            }
        }
    }

    Ok(registry)
}

/// CORS 설정을 구성합니다
///
/// 로컬 프론트엔드 개발 서버와 자체 서버 간 통신을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}
