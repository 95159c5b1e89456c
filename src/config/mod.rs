//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙집중식으로 관리합니다.
//! `.env` 파일은 `main`에서 `PROFILE`에 따라 로드되며,
//! 이 모듈의 접근자는 이미 로드된 환경 변수만 읽습니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # 서버
//! export HOST="127.0.0.1"
//! export PORT="8080"
//! export SERVER_WORKERS="4"
//!
//! # 저장소
//! export STORAGE_BACKEND="mongo"          # mongo | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="test"
//! export USER_COLLECTION="people"
//! export ADMIN_COLLECTION="admins"
//!
//! # Rate Limiting
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! ```

pub mod data_config;

pub use data_config::*;
