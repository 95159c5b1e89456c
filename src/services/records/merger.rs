//! # 부분 업데이트 병합기
//!
//! 호출자가 보낸 희소 변경 집합에서 실제로 적용할 필드만 골라냅니다.
//!
//! 1. 변경 가능한 필드(`name`, `first_name`, `last_name`, `email`, `age`)만 남깁니다.
//!    `status`, `role`, `cpf`, `_id`와 알 수 없는 키는 조용히 버립니다.
//! 2. 필드 타입이 맞지 않는 값은 버립니다 (문자열 필드에 숫자 등).
//! 3. 기존 값과 같은 값은 버립니다. 문서를 바꾸지 않기 때문입니다.
//!
//! 결과가 비어 있으면 서비스는 실패가 아닌 "변경 없음"으로 응답합니다.

use log::debug;
use mongodb::bson::{self, Bson, Document};
use crate::domain::entities::records::{fields, Record};

/// 병합 결과: 저장소에 `$set`으로 보낼 필드 집합
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedChanges {
    fields: Document,
}

impl MergedChanges {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 변경될 이메일 (있다면)
    pub fn email(&self) -> Option<&str> {
        self.fields.get_str(fields::EMAIL).ok()
    }

    /// 적용될 필드 이름 (변경 가능 필드 선언 순서)
    pub fn applied_fields(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn into_document(self) -> Document {
        self.fields
    }
}

/// 기존 레코드와 요청된 변경 집합을 병합합니다.
pub fn merge(existing: &Record, requested: &Document) -> MergedChanges {
    let current = match bson::to_document(existing) {
        Ok(document) => document,
        Err(e) => {
            debug!("기존 레코드 직렬화 실패, 값 비교 없이 병합: {}", e);
            Document::new()
        }
    };

    for key in requested.keys() {
        if !fields::MUTABLE.contains(&key.as_str()) {
            debug!("변경 불가 필드 무시: {}", key);
        }
    }

    let mut merged = Document::new();
    for field in fields::MUTABLE {
        let Some(value) = requested.get(field).and_then(|value| normalize(field, value)) else {
            continue;
        };
        if current.get(field) == Some(&value) {
            continue;
        }
        merged.insert(field, value);
    }

    MergedChanges { fields: merged }
}

/// 필드 타입에 맞는 값만 통과시킵니다. 정수 나이는 Int32로 맞춥니다.
fn normalize(field: &str, value: &Bson) -> Option<Bson> {
    match (field, value) {
        (fields::AGE, Bson::Int32(age)) => Some(Bson::Int32(*age)),
        (fields::AGE, Bson::Int64(age)) => i32::try_from(*age).ok().map(Bson::Int32),
        (fields::AGE, _) => None,
        (_, Bson::String(text)) => Some(Bson::String(text.clone())),
        _ => None,
    }
}
