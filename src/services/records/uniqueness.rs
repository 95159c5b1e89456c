//! # 유니크 필드 검증기
//!
//! 후보 값이 같은 종류의 컬렉션에 이미 존재하는지 확인합니다.
//!
//! ## 결과 해석
//!
//! | 결과 | 의미 |
//! |------|------|
//! | `Ok(true)` | 하나 이상의 문서가 같은 값을 가짐 |
//! | `Ok(false)` | 일치하는 문서 없음 |
//! | `Err(InternalError)` | 등록되지 않은 컬렉션 종류 |
//! | `Err(StorageUnavailable)` | 저장소 장애 |
//!
//! 검사는 호출 시점의 스냅샷일 뿐이며, 이후 쓰기와 원자적으로 묶이지 않습니다.
//! 동시 쓰기에 대한 최종 보장은 저장소의 유니크 인덱스가 담당합니다.

use log::debug;
use mongodb::bson::doc;
use crate::core::errors::AppResult;
use crate::domain::entities::records::{fields, EntityKind};
use crate::repositories::records::CollectionRegistry;

#[derive(Clone)]
pub struct UniquenessValidator {
    registry: CollectionRegistry,
}

impl UniquenessValidator {
    pub fn new(registry: CollectionRegistry) -> Self {
        Self { registry }
    }

    /// `field == value`인 문서가 `kind` 컬렉션에 있는지 확인합니다.
    ///
    /// `exclude_cpf`가 주어지면 해당 CPF를 가진 문서(자기 자신)는 제외합니다.
    /// 비교는 대소문자를 구분하는 정확한 일치입니다.
    pub async fn exists(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
        exclude_cpf: Option<&str>,
    ) -> AppResult<bool> {
        let collection = self.registry.get(kind)?;

        let mut filter = doc! { field: value };
        if let Some(cpf) = exclude_cpf {
            filter.insert(fields::CPF, doc! { "$ne": cpf });
        }

        let taken = collection.find_one(filter).await?.is_some();
        debug!("유니크 검사 {}.{}={} → {}", collection.name(), field, value, taken);

        Ok(taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::core::errors::AppError;
    use crate::domain::entities::records::Record;
    use crate::repositories::records::{CollectionGateway, InMemoryCollection};

    fn record(kind: EntityKind, cpf: &str, email: &str) -> Record {
        Record::new_active(
            kind,
            cpf.to_string(),
            "Maria".to_string(),
            "Maria".to_string(),
            "Souza".to_string(),
            email.to_string(),
            28,
        )
    }

    async fn seeded() -> (UniquenessValidator, Arc<InMemoryCollection>) {
        let people = Arc::new(InMemoryCollection::new("people"));
        people.insert_one(&record(EntityKind::User, "111", "a@x.com")).await.unwrap();

        let registry = CollectionRegistry::new()
            .register(EntityKind::User, people.clone())
            .register(EntityKind::Admin, Arc::new(InMemoryCollection::new("admins")));

        (UniquenessValidator::new(registry), people)
    }

    #[actix_web::test]
    async fn test_exists_detects_taken_values() {
        let (validator, _) = seeded().await;

        assert!(validator.exists(EntityKind::User, fields::CPF, "111", None).await.unwrap());
        assert!(validator.exists(EntityKind::User, fields::EMAIL, "a@x.com", None).await.unwrap());
        assert!(!validator.exists(EntityKind::User, fields::EMAIL, "b@x.com", None).await.unwrap());
    }

    #[actix_web::test]
    async fn test_exists_is_case_sensitive() {
        let (validator, _) = seeded().await;
        assert!(!validator.exists(EntityKind::User, fields::EMAIL, "A@X.COM", None).await.unwrap());
    }

    #[actix_web::test]
    async fn test_exists_is_scoped_per_kind() {
        let (validator, _) = seeded().await;
        assert!(!validator.exists(EntityKind::Admin, fields::EMAIL, "a@x.com", None).await.unwrap());
    }

    #[actix_web::test]
    async fn test_exists_excludes_own_record() {
        let (validator, people) = seeded().await;
        people.insert_one(&record(EntityKind::User, "222", "b@x.com")).await.unwrap();

        assert!(!validator.exists(EntityKind::User, fields::EMAIL, "a@x.com", Some("111")).await.unwrap());
        assert!(validator.exists(EntityKind::User, fields::EMAIL, "a@x.com", Some("222")).await.unwrap());
    }

    #[actix_web::test]
    async fn test_unknown_collection_is_an_error_not_false() {
        let registry = CollectionRegistry::new()
            .register(EntityKind::User, Arc::new(InMemoryCollection::new("people")));
        let validator = UniquenessValidator::new(registry);

        let result = validator.exists(EntityKind::Admin, fields::EMAIL, "a@x.com", None).await;
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}
