//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 컬렉션, 저장소 백엔드, Rate Limiting 설정을 관리합니다.
//! 모든 값은 환경 변수에서 읽고, 없거나 파싱에 실패하면 기본값을 사용합니다.

use std::env;
use log::error;
use crate::domain::entities::records::EntityKind;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수에서 현재 실행 환경을 읽습니다.
    ///
    /// 값이 없으면 `Production`으로 간주합니다.
    pub fn current() -> Self {
        let value = env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string());
        Self::from_str(&value)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버 포트를 반환합니다.
    ///
    /// # Returns
    ///
    /// `PORT` 환경 변수 값, 없거나 숫자가 아니면 `8080`
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 바인드 호스트 (`HOST`, 기본값: `127.0.0.1`)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// `HttpServer::bind`에 넘길 `host:port` 주소를 만듭니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // HOST, PORT가 설정되지 않은 경우
    /// assert_eq!(ServerConfig::bind_address(), "127.0.0.1:8080");
    /// ```
    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    /// 워커 스레드 수를 반환합니다.
    ///
    /// # Returns
    ///
    /// `SERVER_WORKERS` 값, 없거나 0 이하이거나 숫자가 아니면 `4`
    pub fn workers() -> usize {
        env::var("SERVER_WORKERS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|workers| *workers > 0)
            .unwrap_or(4)
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
    pub app_name: String,
}

impl DatabaseConfig {
    /// `MONGODB_URI`, `DATABASE_NAME`에서 설정을 읽습니다.
    pub fn from_env() -> Self {
        Self {
            uri: env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "test".to_string()),
            app_name: "record_service".to_string(),
        }
    }
}

pub struct CollectionConfig;

impl CollectionConfig {
    /// 종류별 컬렉션 이름 (`USER_COLLECTION`, `ADMIN_COLLECTION`)
    pub fn collection_name(kind: EntityKind) -> String {
        let variable = match kind {
            EntityKind::User => "USER_COLLECTION",
            EntityKind::Admin => "ADMIN_COLLECTION",
        };

        env::var(variable)
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| kind.default_collection().to_string())
    }
}

/// 레코드 저장소 백엔드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

pub struct StorageConfig;

impl StorageConfig {
    /// `STORAGE_BACKEND=memory`이면 In-Memory 컬렉션, 그 외에는 MongoDB
    pub fn backend() -> StorageBackend {
        Self::backend_from_str(&env::var("STORAGE_BACKEND").unwrap_or_default())
    }

    pub fn backend_from_str(value: &str) -> StorageBackend {
        match value.to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StorageBackend::Memory,
            _ => StorageBackend::Mongo,
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn load() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self {
            per_second,
            burst_size,
        }
    }
}
