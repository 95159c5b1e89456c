//! # Domain Entities
//!
//! MongoDB 컬렉션에 저장되는 도메인 엔티티를 정의합니다.
//! user와 admin은 같은 형태의 [`records::Record`]를 공유하고,
//! [`records::EntityKind`]로 구분되어 서로 다른 컬렉션에 저장됩니다.

pub mod records;
