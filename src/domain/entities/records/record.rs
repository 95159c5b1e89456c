//! Record Entity Implementation
//!
//! user / admin 두 종류가 공유하는 레코드 엔티티입니다.
//! MongoDB 문서와 1:1로 매핑되며, 문서 필드 이름은 [`fields`] 상수로 관리합니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use super::kind::EntityKind;

/// 문서 필드 이름
pub mod fields {
    pub const ID: &str = "_id";
    pub const CPF: &str = "cpf";
    pub const NAME: &str = "name";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const EMAIL: &str = "email";
    pub const AGE: &str = "age";
    pub const STATUS: &str = "status";
    pub const ROLE: &str = "role";

    /// 부분 업데이트로 변경 가능한 필드 (이 순서대로 적용/보고됨)
    pub const MUTABLE: [&str; 5] = [NAME, FIRST_NAME, LAST_NAME, EMAIL, AGE];

    /// 컬렉션 단위로 유니크해야 하는 필드
    pub const UNIQUE: [&str; 2] = [CPF, EMAIL];
}

/// 유니크 인덱스 이름 (중복 키 에러에서 필드를 식별할 때 사용)
pub mod indexes {
    pub const CPF_UNIQUE: &str = "cpf_unique";
    pub const EMAIL_UNIQUE: &str = "email_unique";
}

/// 생성 시 부여되는 상태 값
pub const STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 자연 키 (CPF). 생성 후 변경 불가
    pub cpf: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
    /// 생성 시 "active"로 고정
    pub status: String,
    /// 종류에 따라 "user" 또는 "admin"으로 고정
    pub role: String,
}

impl Record {
    /// 활성 상태의 새 레코드를 만듭니다. `_id`는 저장 시 할당됩니다.
    pub fn new_active(
        kind: EntityKind,
        cpf: String,
        name: String,
        first_name: String,
        last_name: String,
        email: String,
        age: i32,
    ) -> Self {
        Self {
            id: None,
            cpf,
            name,
            first_name,
            last_name,
            email,
            age,
            status: STATUS_ACTIVE.to_string(),
            role: kind.role().to_string(),
        }
    }

    /// 저장소 식별자의 16진수 표현 (저장 전이면 `None`)
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
