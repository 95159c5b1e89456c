//! Database Connection Management Module
//!
//! MongoDB 데이터베이스 연결 관리를 담당하는 모듈입니다.
//! 연결은 프로세스 시작 시 한 번 만들어지고, 전역 상태가 아닌
//! 생성자 인자로 컬렉션 게이트웨이에 전달됩니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::config::DatabaseConfig;
//! use crate::db::Database;
//!
//! let database = Database::connect(&DatabaseConfig::from_env()).await?;
//! let people = MongoCollection::new(&database, "people");
//! ```

use mongodb::{bson::doc, options::ClientOptions, Client};
use log::info;
use crate::config::DatabaseConfig;

/// MongoDB 데이터베이스 연결 래퍼
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스 (내부적으로 연결 풀 공유)
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 새 MongoDB 데이터베이스 연결을 생성합니다.
    ///
    /// 클라이언트를 초기화하고 `ping`으로 연결 상태를 검증한 후 반환합니다.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;

        // 애플리케이션 이름 설정 (모니터링 및 로깅에 유용)
        client_options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(client_options)?;

        // 연결 테스트
        client
            .database(&config.database_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    /// 컬렉션 접근에 사용하는 `mongodb::Database` 인스턴스를 반환합니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 데이터베이스 이름을 반환합니다.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
