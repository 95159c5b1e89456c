//! 레코드 요청 DTO
//!
//! 생성/부분 업데이트 요청의 HTTP 본문 구조를 정의합니다.
//! 필드 존재/타입/형식 검증은 여기서 끝내고, 중복 여부 같은
//! 저장소 상태에 의존하는 판단은 서비스 계층에서 처리합니다.

use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::records::{fields, EntityKind, Record};

/// 새 레코드 생성을 위한 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRecordRequest {
    /// 자연 키 (CPF)
    #[validate(length(min = 1, max = 32, message = "CPF는 1-32자 사이여야 합니다"))]
    pub cpf: String,

    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "이름(first_name)은 1-100자 사이여야 합니다"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "성(last_name)은 1-100자 사이여야 합니다"))]
    pub last_name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(range(min = 0, max = 150, message = "나이는 0-150 사이여야 합니다"))]
    pub age: i32,
}

impl CreateRecordRequest {
    /// 주어진 종류의 활성 레코드로 변환합니다.
    pub fn into_record(self, kind: EntityKind) -> Record {
        Record::new_active(
            kind,
            self.cpf,
            self.name,
            self.first_name,
            self.last_name,
            self.email,
            self.age,
        )
    }
}

/// 부분 업데이트 요청 DTO
///
/// 클라이언트가 명시적으로 보낸 필드만 `Some`이 됩니다.
/// `status`, `role`, `cpf`는 필드로 존재하지 않으므로 역직렬화 단계에서 무시됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRecordRequest {
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "이름(first_name)은 1-100자 사이여야 합니다"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "성(last_name)은 1-100자 사이여야 합니다"))]
    pub last_name: Option<String>,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(range(min = 0, max = 150, message = "나이는 0-150 사이여야 합니다"))]
    pub age: Option<i32>,
}

impl UpdateRecordRequest {
    /// 전달된 필드만 담은 희소 변경 문서를 만듭니다.
    pub fn into_changes(self) -> Document {
        let mut changes = Document::new();

        let text_fields = [
            (fields::NAME, self.name),
            (fields::FIRST_NAME, self.first_name),
            (fields::LAST_NAME, self.last_name),
            (fields::EMAIL, self.email),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                changes.insert(field, Bson::String(value));
            }
        }

        if let Some(age) = self.age {
            changes.insert(fields::AGE, Bson::Int32(age));
        }

        changes
    }
}
