//! # Application Error Handling System
//!
//! 레코드 관리 서비스 전역에서 사용하는 에러 타입입니다.
//! 모든 연산은 예외를 던지지 않고 `AppResult<T>`로 결과를 돌려주며,
//! 핸들러 계층에서는 `actix_web::ResponseError` 구현을 통해
//! 일관된 JSON 응답으로 자동 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 요청 본문 검증 실패 |
//! | `DuplicateNaturalKey` | 409 Conflict | 같은 컬렉션에 CPF 중복 |
//! | `DuplicateEmail` | 409 Conflict | 같은 컬렉션에 이메일 중복 |
//! | `NotFound` | 404 Not Found | CPF에 해당하는 레코드 없음 |
//! | `UpdateFailed` | 409 Conflict | 조회와 쓰기 사이에 레코드가 사라짐 |
//! | `DeleteFailed` | 404 Not Found | 삭제된 문서 없음 |
//! | `InternalError` | 500 Internal Server Error | 등록되지 않은 컬렉션 등 |
//! | `StorageUnavailable` | 503 Service Unavailable | 저장소 연결/명령 실패 |
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "duplicate_email", "message": "Duplicate email: 이미 사용 중인 이메일입니다: a@x.com" }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 중복/미존재 같은 결과는 프로토콜상 정상적인 분기이므로
/// 로그 레벨을 올리지 않고 호출자에게 그대로 전달합니다.
/// `StorageUnavailable`만이 단일 요청을 실패시키는 인프라 장애이며,
/// 자동 재시도는 하지 않습니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 같은 종류의 컬렉션에 동일한 CPF가 이미 존재 (409 Conflict)
    #[error("Duplicate natural key: {0}")]
    DuplicateNaturalKey(String),

    /// 같은 종류의 컬렉션에 동일한 이메일이 이미 존재 (409 Conflict)
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 업데이트가 어떤 문서에도 적용되지 않음 (409 Conflict)
    #[error("Update failed: {0}")]
    UpdateFailed(String),

    /// 삭제 대상 문서가 없음 (404 Not Found)
    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    ///
    /// 등록되지 않은 컬렉션 종류가 검증기에 도달한 경우가 대표적입니다.
    /// 호출자는 이를 절대 "중복 아님"으로 해석해서는 안 됩니다.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// 저장소 연결, 타임아웃 등 인프라 장애 (503 Service Unavailable)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어가는 기계 판독용 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::DuplicateNaturalKey(_) => "duplicate_natural_key",
            AppError::DuplicateEmail(_) => "duplicate_email",
            AppError::NotFound(_) => "not_found",
            AppError::UpdateFailed(_) => "update_failed",
            AppError::DeleteFailed(_) => "delete_failed",
            AppError::InternalError(_) => "internal_error",
            AppError::StorageUnavailable(_) => "storage_unavailable",
        }
    }

    /// 중복 제약 위반 여부
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AppError::DuplicateNaturalKey(_) | AppError::DuplicateEmail(_))
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateNaturalKey(_) | AppError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) | AppError::DeleteFailed(_) => StatusCode::NOT_FOUND,
            AppError::UpdateFailed(_) => StatusCode::CONFLICT,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.code(),
                "message": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
