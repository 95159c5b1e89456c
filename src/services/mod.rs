//! # Services Module
//!
//! 비즈니스 로직 계층입니다. 저장소 상태에 의존하는 판단(중복 여부,
//! 부분 업데이트 적용 범위)은 모두 이 계층에서 이루어집니다.

pub mod records;
