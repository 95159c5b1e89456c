//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 요청 본문 검증과 응답 변환만 담당하고, 판단은 서비스 계층에 위임합니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리     ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 중복 검증, 부분 업데이트 병합      ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 컬렉션 게이트웨이              ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```

pub mod records;
