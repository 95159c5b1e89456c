//! # Core Module
//!
//! 애플리케이션 전역에서 공유하는 핵심 타입을 제공합니다.
//! 현재는 에러 시스템([`errors`])만 포함하며, 모든 계층이
//! `AppError` / `AppResult`를 통해 결과를 주고받습니다.

pub mod errors;

pub use errors::*;
