//! # MongoDB 레코드 컬렉션
//!
//! [`CollectionGateway`]의 MongoDB 구현입니다.
//!
//! ## 유니크 인덱스
//!
//! 서비스 계층의 중복 검사는 조회와 쓰기 사이에 격리가 없으므로
//! 동시 생성 요청이 모두 검사를 통과할 수 있습니다.
//! 실제 무결성은 [`MongoCollection::create_indexes`]가 만드는 유니크 인덱스가 보장하며,
//! 인덱스 위반(코드 11000)은 인덱스 이름으로 필드를 식별해 중복 에러로 변환됩니다.
//!
//! | 인덱스 | 필드 | 속성 |
//! |--------|------|------|
//! | `cpf_unique` | `cpf` | UNIQUE |
//! | `email_unique` | `email` | UNIQUE |

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{error, info};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::records::{fields, indexes, Record};
use super::{duplicate_error, CollectionGateway, UpdateCounts};

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoCollection {
    collection: Collection<Record>,
}

impl MongoCollection {
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.get_database().collection::<Record>(collection_name),
        }
    }

    /// `cpf`, `email` 유니크 인덱스를 생성합니다.
    ///
    /// 애플리케이션 초기화 시점에 한 번 호출합니다.
    /// 이미 중복 데이터가 있는 컬렉션에서는 실패합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let cpf_index = IndexModel::builder()
            .keys(doc! { fields::CPF: 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(indexes::CPF_UNIQUE.to_string())
                .build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { fields::EMAIL: 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(indexes::EMAIL_UNIQUE.to_string())
                .build())
            .build();

        self.collection
            .create_indexes([cpf_index, email_index])
            .await
            .map_err(storage_error)?;

        info!("✅ 유니크 인덱스 준비 완료: {}", self.collection.name());
        Ok(())
    }
}

#[async_trait]
impl CollectionGateway for MongoCollection {
    fn name(&self) -> &str {
        self.collection.name()
    }

    async fn find_all(&self) -> AppResult<Vec<Record>> {
        self.find_many(doc! {}).await
    }

    async fn find_one(&self, filter: Document) -> AppResult<Option<Record>> {
        self.collection
            .find_one(filter)
            .await
            .map_err(storage_error)
    }

    async fn find_many(&self, filter: Document) -> AppResult<Vec<Record>> {
        let cursor = self.collection
            .find(filter)
            .await
            .map_err(storage_error)?;

        cursor.try_collect().await.map_err(storage_error)
    }

    async fn insert_one(&self, record: &Record) -> AppResult<ObjectId> {
        let result = self.collection
            .insert_one(record)
            .await
            .map_err(write_error)?;

        result.inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string()))
    }

    async fn update_one(&self, filter: Document, changes: Document) -> AppResult<UpdateCounts> {
        let result = self.collection
            .update_one(filter, doc! { "$set": changes })
            .await
            .map_err(write_error)?;

        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, filter: Document) -> AppResult<u64> {
        let result = self.collection
            .delete_one(filter)
            .await
            .map_err(storage_error)?;

        Ok(result.deleted_count)
    }
}

fn storage_error(e: MongoError) -> AppError {
    error!("MongoDB 연산 실패: {}", e);
    AppError::StorageUnavailable(e.to_string())
}

/// 쓰기 에러 중 유니크 인덱스 위반은 중복 에러로, 나머지는 저장소 장애로 분류합니다.
fn write_error(e: MongoError) -> AppError {
    if let ErrorKind::Write(WriteFailure::WriteError(failure)) = e.kind.as_ref() {
        if failure.code == DUPLICATE_KEY_CODE {
            return classify_duplicate_key(&failure.message);
        }
    }
    storage_error(e)
}

/// 중복 키 메시지의 인덱스 이름으로 위반 필드를 판별합니다.
///
/// 예: `E11000 duplicate key error collection: test.people index: email_unique dup key: { email: "a@x.com" }`
fn classify_duplicate_key(message: &str) -> AppError {
    let field = if message.contains(indexes::EMAIL_UNIQUE) {
        fields::EMAIL
    } else {
        fields::CPF
    };
    let detail = message
        .split("dup key:")
        .nth(1)
        .map(str::trim)
        .unwrap_or(message);

    duplicate_error(field, detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_duplicate_email_index() {
        let message = r#"E11000 duplicate key error collection: test.people index: email_unique dup key: { email: "a@x.com" }"#;
        match classify_duplicate_key(message) {
            AppError::DuplicateEmail(detail) => assert!(detail.contains("a@x.com")),
            other => panic!("Expected DuplicateEmail, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_duplicate_cpf_index() {
        let message = r#"E11000 duplicate key error collection: test.admins index: cpf_unique dup key: { cpf: "111" }"#;
        assert!(matches!(classify_duplicate_key(message), AppError::DuplicateNaturalKey(_)));
    }
}
