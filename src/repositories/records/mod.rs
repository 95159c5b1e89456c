//! 레코드 컬렉션 게이트웨이
//!
//! 종류(user / admin)별 문서 컬렉션에 대한 최소한의 저장소 연산을
//! [`CollectionGateway`] trait으로 추상화합니다.
//!
//! - [`MongoCollection`]: MongoDB 컬렉션 기반 구현 (운영)
//! - [`InMemoryCollection`]: 프로세스 메모리 기반 구현 (테스트, DB 없는 로컬 실행)
//!
//! 필터는 BSON 문서로 전달되며, 서비스 계층은 최상위 필드에 대한
//! 동등 비교와 `$ne`만 사용합니다.

pub mod memory_collection;
pub mod mongo_collection;

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::records::{fields, EntityKind, Record};

pub use memory_collection::InMemoryCollection;
pub use mongo_collection::MongoCollection;

/// `update_one` 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateCounts {
    /// 필터에 일치한 문서 수
    pub matched: u64,
    /// 실제로 값이 바뀐 문서 수
    pub modified: u64,
}

/// 종류별 문서 컬렉션 연산
///
/// 저장소 장애는 `AppError::StorageUnavailable`로,
/// 유니크 인덱스 위반은 `DuplicateNaturalKey` / `DuplicateEmail`로 보고해야 합니다.
#[async_trait]
pub trait CollectionGateway: Send + Sync {
    /// 컬렉션 이름 (로그용)
    fn name(&self) -> &str;

    async fn find_all(&self) -> AppResult<Vec<Record>>;

    async fn find_one(&self, filter: Document) -> AppResult<Option<Record>>;

    async fn find_many(&self, filter: Document) -> AppResult<Vec<Record>>;

    /// 레코드를 저장하고 할당된 식별자를 반환합니다.
    async fn insert_one(&self, record: &Record) -> AppResult<ObjectId>;

    /// 필터에 일치하는 첫 문서에 `changes`를 `$set`으로 적용합니다.
    async fn update_one(&self, filter: Document, changes: Document) -> AppResult<UpdateCounts>;

    /// 필터에 일치하는 첫 문서를 삭제하고 삭제된 문서 수를 반환합니다.
    async fn delete_one(&self, filter: Document) -> AppResult<u64>;
}

/// 종류 → 컬렉션 매핑
///
/// 프로세스 시작 시 한 번 구성되어 서비스에 주입됩니다.
#[derive(Clone, Default)]
pub struct CollectionRegistry {
    collections: HashMap<EntityKind, Arc<dyn CollectionGateway>>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, kind: EntityKind, collection: Arc<dyn CollectionGateway>) -> Self {
        self.collections.insert(kind, collection);
        self
    }

    /// 종류에 등록된 컬렉션을 반환합니다.
    ///
    /// 등록되지 않은 종류는 `InternalError`입니다. "레코드 없음"으로 취급하지 않습니다.
    pub fn get(&self, kind: EntityKind) -> AppResult<&Arc<dyn CollectionGateway>> {
        self.collections
            .get(&kind)
            .ok_or_else(|| AppError::InternalError(format!("unknown collection: {}", kind)))
    }

    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.collections.keys().copied()
    }
}

/// 유니크 필드 위반을 대응하는 중복 에러로 변환합니다.
pub(crate) fn duplicate_error(field: &str, detail: &str) -> AppError {
    if field == fields::EMAIL {
        AppError::DuplicateEmail(format!("이미 사용 중인 이메일입니다: {}", detail))
    } else {
        AppError::DuplicateNaturalKey(format!("이미 등록된 CPF입니다: {}", detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_reports_unknown_kind_as_internal_error() {
        let registry = CollectionRegistry::new()
            .register(EntityKind::User, Arc::new(InMemoryCollection::new("people")));

        assert!(registry.get(EntityKind::User).is_ok());
        assert!(matches!(
            registry.get(EntityKind::Admin),
            Err(AppError::InternalError(_))
        ));
        assert_eq!(registry.kinds().collect::<Vec<_>>(), vec![EntityKind::User]);
    }

    #[test]
    fn test_duplicate_error_by_field() {
        assert!(matches!(duplicate_error(fields::EMAIL, "a@x.com"), AppError::DuplicateEmail(_)));
        assert!(matches!(duplicate_error(fields::CPF, "111"), AppError::DuplicateNaturalKey(_)));
    }
}
