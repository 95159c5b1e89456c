//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 구조를 정의합니다.
//! 요청 DTO는 `validator`로 형식을 검증하고,
//! 응답 DTO는 엔티티에서 변환되며 저장소 식별자를 문자열로만 노출합니다.

pub mod records;

pub use records::*;
