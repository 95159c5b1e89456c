//! 레코드 관리 서비스 백엔드
//!
//! user / admin 두 종류의 레코드를 MongoDB 컬렉션에 저장하고
//! HTTP로 생성, 조회, 부분 업데이트, 삭제를 제공하는 서비스입니다.
//! CPF와 이메일은 종류별 컬렉션 안에서 유니크해야 합니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /pessoas, /admin 스코프
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증 / 응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 중복 검증, 부분 업데이트 병합, 결과 분류
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← CollectionGateway (MongoDB / In-Memory)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use record_service_backend::domain::entities::records::EntityKind;
//! use record_service_backend::repositories::records::{CollectionRegistry, InMemoryCollection};
//! use record_service_backend::services::records::RecordService;
//!
//! let registry = CollectionRegistry::new()
//!     .register(EntityKind::User, Arc::new(InMemoryCollection::new("people")))
//!     .register(EntityKind::Admin, Arc::new(InMemoryCollection::new("admins")));
//! let service = RecordService::new(registry);
//! let records = service.list_records(EntityKind::User).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
