//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 종류별 레코드 컬렉션을 [`records::CollectionGateway`] trait 뒤에 두고,
//! MongoDB 구현과 In-Memory 구현을 제공합니다.

pub mod records;
