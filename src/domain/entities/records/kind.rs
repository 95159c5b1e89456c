//! Entity Kind
//!
//! 레코드가 속하는 엔티티 종류(user / admin)를 정의합니다.
//! 각 종류는 독립된 컬렉션을 가지며, 유니크 제약도 종류별로 따로 적용됩니다.

use std::fmt;
use serde::{Deserialize, Serialize};

/// 레코드 종류
///
/// 레코드는 생성 시점에 하나의 종류에 속하며 이후 다른 종류로 이동하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Admin,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::User, EntityKind::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Admin => "admin",
        }
    }

    /// 생성 시 레코드에 고정되는 역할 값
    pub fn role(&self) -> &'static str {
        self.as_str()
    }

    /// 환경 변수가 없을 때 사용하는 컬렉션 이름
    pub fn default_collection(&self) -> &'static str {
        match self {
            EntityKind::User => "people",
            EntityKind::Admin => "admins",
        }
    }

    /// 응답 메시지에 쓰이는 표시 이름
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::User => "사용자",
            EntityKind::Admin => "관리자",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
