use serde::{Deserialize, Serialize};
use crate::domain::entities::records::{EntityKind, Record};

/// 레코드 응답 DTO
///
/// 저장소 식별자(ObjectId)는 16진수 문자열로만 노출됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub id: String,
    pub cpf: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
    pub status: String,
    pub role: String,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        let id = record.id_string().unwrap_or_default();
        let Record {
            cpf,
            name,
            first_name,
            last_name,
            email,
            age,
            status,
            role,
            ..
        } = record;

        Self {
            id,
            cpf,
            name,
            first_name,
            last_name,
            email,
            age,
            status,
            role,
        }
    }
}

/// 레코드 생성 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordResponse {
    pub record: RecordResponse,
    pub message: String,
}

impl CreateRecordResponse {
    pub fn new(kind: EntityKind, record: RecordResponse) -> Self {
        Self {
            record,
            message: format!("{}가 성공적으로 생성되었습니다", kind.label()),
        }
    }
}

/// 부분 업데이트 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecordResponse {
    pub message: String,
    /// 실제로 변경된 필드 이름 (변경 없음이면 빈 목록)
    pub updated_fields: Vec<String>,
}

impl UpdateRecordResponse {
    pub fn updated(applied: Vec<String>) -> Self {
        let message = match applied.as_slice() {
            [single] => format!("{} 필드가 성공적으로 변경되었습니다", single),
            many => format!("| {} | 필드가 성공적으로 변경되었습니다", many.join(" | ")),
        };

        Self {
            message,
            updated_fields: applied,
        }
    }

    pub fn unchanged(kind: EntityKind) -> Self {
        Self {
            message: format!("{} 정보에 변경할 내용이 없습니다", kind.label()),
            updated_fields: Vec::new(),
        }
    }
}

/// 단순 메시지 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(kind: EntityKind) -> Self {
        Self {
            message: format!("{}가 성공적으로 삭제되었습니다", kind.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_record_response_exposes_hex_id() {
        let id = ObjectId::new();
        let mut record = Record::new_active(
            EntityKind::User,
            "111".to_string(),
            "Joao".to_string(),
            "Joao".to_string(),
            "Silva".to_string(),
            "a@x.com".to_string(),
            35,
        );
        record.id = Some(id);

        let response = RecordResponse::from(record);
        assert_eq!(response.id, id.to_hex());
        assert_eq!(response.role, "user");
    }

    #[test]
    fn test_update_message_for_one_and_many_fields() {
        let one = UpdateRecordResponse::updated(vec!["age".to_string()]);
        assert_eq!(one.message, "age 필드가 성공적으로 변경되었습니다");

        let many = UpdateRecordResponse::updated(vec!["name".to_string(), "age".to_string()]);
        assert_eq!(many.message, "| name | age | 필드가 성공적으로 변경되었습니다");
        assert_eq!(many.updated_fields.len(), 2);
    }
}
