//! # In-Memory 레코드 컬렉션
//!
//! 프로세스 메모리에 BSON 문서를 보관하는 [`CollectionGateway`] 구현입니다.
//! 테스트와 DB 없이 띄우는 로컬 실행(`STORAGE_BACKEND=memory`)에 사용합니다.
//!
//! 필터는 최상위 필드의 동등 비교와 `{ field: { "$ne": value } }`만 지원합니다.
//! [`InMemoryCollection::with_unique_fields`]로 MongoDB 유니크 인덱스와
//! 같은 쓰기 시점 검사를 켤 수 있습니다.

use std::sync::RwLock;
use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::entities::records::{fields, Record};
use super::{duplicate_error, CollectionGateway, UpdateCounts};

pub struct InMemoryCollection {
    name: String,
    unique_fields: Vec<String>,
    documents: RwLock<Vec<Document>>,
}

impl InMemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique_fields: Vec::new(),
            documents: RwLock::new(Vec::new()),
        }
    }

    /// 쓰기 시점에 유니크 제약을 검사할 필드를 지정합니다.
    pub fn with_unique_fields(mut self, unique_fields: &[&str]) -> Self {
        self.unique_fields = unique_fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// 현재 저장된 문서 수
    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, Vec<Document>>> {
        self.documents
            .read()
            .map_err(|_| AppError::StorageUnavailable(format!("{} 컬렉션 잠금이 손상되었습니다", self.name)))
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, Vec<Document>>> {
        self.documents
            .write()
            .map_err(|_| AppError::StorageUnavailable(format!("{} 컬렉션 잠금이 손상되었습니다", self.name)))
    }

    /// `candidate`가 `skip` 위치를 제외한 다른 문서와 유니크 필드를 공유하는지 검사합니다.
    fn check_unique(&self, documents: &[Document], candidate: &Document, skip: Option<usize>) -> AppResult<()> {
        for field in &self.unique_fields {
            let Some(value) = candidate.get(field) else {
                continue;
            };
            let clash = documents
                .iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != skip)
                .any(|(_, existing)| existing.get(field) == Some(value));

            if clash {
                let detail = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                return Err(duplicate_error(field, &detail));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CollectionGateway for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find_all(&self) -> AppResult<Vec<Record>> {
        self.find_many(Document::new()).await
    }

    async fn find_one(&self, filter: Document) -> AppResult<Option<Record>> {
        let documents = self.read()?;
        documents
            .iter()
            .find(|document| matches_filter(document, &filter))
            .map(to_record)
            .transpose()
    }

    async fn find_many(&self, filter: Document) -> AppResult<Vec<Record>> {
        let documents = self.read()?;
        documents
            .iter()
            .filter(|document| matches_filter(document, &filter))
            .map(to_record)
            .collect()
    }

    async fn insert_one(&self, record: &Record) -> AppResult<ObjectId> {
        let id = ObjectId::new();
        let mut document = bson::to_document(record).context("레코드 직렬화 실패")?;
        document.insert(fields::ID, id);

        let mut documents = self.write()?;
        self.check_unique(&documents, &document, None)?;
        documents.push(document);

        Ok(id)
    }

    async fn update_one(&self, filter: Document, changes: Document) -> AppResult<UpdateCounts> {
        let mut documents = self.write()?;
        let Some(position) = documents.iter().position(|document| matches_filter(document, &filter)) else {
            return Ok(UpdateCounts::default());
        };

        let mut updated = documents[position].clone();
        for (key, value) in changes {
            updated.insert(key, value);
        }

        if updated == documents[position] {
            return Ok(UpdateCounts { matched: 1, modified: 0 });
        }

        self.check_unique(&documents, &updated, Some(position))?;
        documents[position] = updated;

        Ok(UpdateCounts { matched: 1, modified: 1 })
    }

    async fn delete_one(&self, filter: Document) -> AppResult<u64> {
        let mut documents = self.write()?;
        match documents.iter().position(|document| matches_filter(document, &filter)) {
            Some(position) => {
                documents.remove(position);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

fn to_record(document: &Document) -> AppResult<Record> {
    bson::from_document(document.clone()).context("레코드 역직렬화 실패")
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(field, condition)| {
        let actual = document.get(field);
        match condition {
            Bson::Document(operator) if operator.contains_key("$ne") => {
                actual != operator.get("$ne")
            }
            expected => actual == Some(expected),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use crate::domain::entities::records::EntityKind;

    fn record(cpf: &str, email: &str) -> Record {
        Record::new_active(
            EntityKind::User,
            cpf.to_string(),
            "Joao".to_string(),
            "Joao".to_string(),
            "Silva".to_string(),
            email.to_string(),
            35,
        )
    }

    #[actix_web::test]
    async fn test_insert_assigns_id_and_find_by_filter() {
        let collection = InMemoryCollection::new("people");
        let id = collection.insert_one(&record("111", "a@x.com")).await.unwrap();

        let found = collection.find_one(doc! { "cpf": "111" }).await.unwrap().unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.email, "a@x.com");

        assert!(collection.find_one(doc! { "cpf": "999" }).await.unwrap().is_none());
        assert_eq!(collection.find_all().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_ne_filter_excludes_matching_document() {
        let collection = InMemoryCollection::new("people");
        collection.insert_one(&record("111", "a@x.com")).await.unwrap();
        collection.insert_one(&record("222", "b@x.com")).await.unwrap();

        let others = collection
            .find_many(doc! { "email": "a@x.com", "cpf": { "$ne": "111" } })
            .await
            .unwrap();
        assert!(others.is_empty());

        let others = collection
            .find_many(doc! { "email": "a@x.com", "cpf": { "$ne": "222" } })
            .await
            .unwrap();
        assert_eq!(others.len(), 1);
    }

    #[actix_web::test]
    async fn test_update_counts_distinguish_missing_and_unchanged() {
        let collection = InMemoryCollection::new("people");
        collection.insert_one(&record("111", "a@x.com")).await.unwrap();

        let missing = collection
            .update_one(doc! { "cpf": "999" }, doc! { "age": 40 })
            .await
            .unwrap();
        assert_eq!(missing, UpdateCounts { matched: 0, modified: 0 });

        let unchanged = collection
            .update_one(doc! { "cpf": "111" }, doc! { "age": 35 })
            .await
            .unwrap();
        assert_eq!(unchanged, UpdateCounts { matched: 1, modified: 0 });

        let changed = collection
            .update_one(doc! { "cpf": "111" }, doc! { "age": 36 })
            .await
            .unwrap();
        assert_eq!(changed, UpdateCounts { matched: 1, modified: 1 });

        let stored = collection.find_one(doc! { "cpf": "111" }).await.unwrap().unwrap();
        assert_eq!(stored.age, 36);
    }

    #[actix_web::test]
    async fn test_unique_fields_guard_insert_and_update() {
        let collection = InMemoryCollection::new("people")
            .with_unique_fields(&fields::UNIQUE);
        collection.insert_one(&record("111", "a@x.com")).await.unwrap();
        collection.insert_one(&record("222", "b@x.com")).await.unwrap();

        let err = collection.insert_one(&record("111", "c@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateNaturalKey(_)));

        let err = collection.insert_one(&record("333", "a@x.com")).await.unwrap_err();
        assert_eq!(err, AppError::DuplicateEmail("이미 사용 중인 이메일입니다: a@x.com".to_string()));

        let err = collection
            .update_one(doc! { "cpf": "222" }, doc! { "email": "a@x.com" })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail(_)));
        assert_eq!(collection.len(), 2);
    }

    #[actix_web::test]
    async fn test_delete_one_reports_count() {
        let collection = InMemoryCollection::new("people");
        collection.insert_one(&record("111", "a@x.com")).await.unwrap();

        assert_eq!(collection.delete_one(doc! { "cpf": "999" }).await.unwrap(), 0);
        assert_eq!(collection.delete_one(doc! { "cpf": "111" }).await.unwrap(), 1);
        assert!(collection.is_empty());
    }
}
