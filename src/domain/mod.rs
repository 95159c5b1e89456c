//! # Domain Layer
//!
//! 엔티티([`entities`])와 전송 객체([`dto`])로 구성된 도메인 계층입니다.

pub mod entities;
pub mod dto;
