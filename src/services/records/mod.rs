//! 레코드 관리 서비스 모듈
//!
//! - [`record_service`]: 종류별 생성/조회/업데이트/삭제를 조율하는 [`RecordService`]
//! - [`uniqueness`]: 컬렉션 단위 유니크 필드 검증기
//! - [`merger`]: 부분 업데이트 병합 규칙

pub mod merger;
pub mod record_service;
pub mod uniqueness;

pub use merger::{merge, MergedChanges};
pub use record_service::{RecordService, UpdateOutcome};
pub use uniqueness::UniquenessValidator;
