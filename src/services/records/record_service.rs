//! # 레코드 관리 서비스 구현
//!
//! user / admin 두 종류의 레코드에 대한 생성, 조회, 부분 업데이트, 삭제를
//! 하나의 서비스가 [`EntityKind`]로 구분하여 처리합니다.
//!
//! ## 연산별 흐름
//!
//! ```text
//! create ──► exists(cpf) ┐ (동시 실행, 단락 없음)
//!            exists(email)┘──► insert_one ──► 생성된 레코드
//!
//! update ──► find_one(cpf) ──► merge ──► [email 변경 시] exists(email, cpf 제외)
//!                                    └──► update_one ──► Updated / NoChange
//!
//! delete ──► delete_one(cpf) ──► 삭제 / DeleteFailed
//! ```
//!
//! 각 연산은 저장소 변경을 최대 한 번만 수행하므로 롤백이 필요 없습니다.
//! 서비스는 요청 간에 공유되는 가변 상태를 갖지 않습니다.

use futures_util::future::join;
use log::{error, info, warn};
use mongodb::bson::{doc, Document};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::records::{CreateRecordRequest, RecordResponse};
use crate::domain::entities::records::{fields, EntityKind};
use crate::repositories::records::CollectionRegistry;
use super::merger::merge;
use super::uniqueness::UniquenessValidator;

/// 부분 업데이트 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// 적용된 필드 이름
    Updated { applied: Vec<String> },
    /// 요청된 변경이 없거나 모두 현재 값과 같음
    NoChange,
}

#[derive(Clone)]
pub struct RecordService {
    registry: CollectionRegistry,
    validator: UniquenessValidator,
}

impl RecordService {
    /// 컬렉션 레지스트리로 서비스를 구성합니다.
    ///
    /// 중복 검증기는 같은 레지스트리를 공유합니다.
    ///
    /// # Arguments
    ///
    /// * `registry` - 종류별 컬렉션 매핑
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let registry = CollectionRegistry::new()
    ///     .register(EntityKind::User, Arc::new(InMemoryCollection::new("people")));
    /// let service = RecordService::new(registry);
    /// ```
    pub fn new(registry: CollectionRegistry) -> Self {
        let validator = UniquenessValidator::new(registry.clone());
        Self { registry, validator }
    }

    /// 컬렉션이 등록된 종류 (순서 없음)
    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.registry.kinds()
    }

    /// 종류의 모든 레코드를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `StorageUnavailable` - 저장소 연결 또는 명령 실패
    /// * `InternalError` - 등록되지 않은 종류
    pub async fn list_records(&self, kind: EntityKind) -> AppResult<Vec<RecordResponse>> {
        let collection = self.registry.get(kind)?;
        let records = collection.find_all().await.inspect_err(|e| log_failure(kind, "list", e))?;

        Ok(records.into_iter().map(RecordResponse::from).collect())
    }

    /// CPF로 레코드 하나를 조회합니다.
    ///
    /// # Arguments
    ///
    /// * `kind` - 조회할 컬렉션의 종류
    /// * `cpf` - 레코드의 자연 키
    ///
    /// # Returns
    ///
    /// * `Ok(RecordResponse)` - 16진수 식별자를 포함한 레코드
    /// * `Err(AppError::NotFound)` - 해당 CPF의 레코드가 없음
    pub async fn get_record(&self, kind: EntityKind, cpf: &str) -> AppResult<RecordResponse> {
        let collection = self.registry.get(kind)?;
        let record = collection
            .find_one(cpf_filter(cpf))
            .await
            .inspect_err(|e| log_failure(kind, "get", e))?
            .ok_or_else(|| not_found(kind, cpf))?;

        Ok(RecordResponse::from(record))
    }

    /// 새 레코드를 생성합니다.
    ///
    /// CPF와 이메일 중복 검사를 모두 수행한 뒤 판정합니다.
    ///
    /// | CPF 중복 | 이메일 중복 | 결과 |
    /// |----------|-------------|------|
    /// | 내부 오류 (둘 중 하나) | - | `InternalError` |
    /// | 저장소 오류 (둘 중 하나) | - | `StorageUnavailable` |
    /// | true | 무관 | `DuplicateNaturalKey` |
    /// | false | true | `DuplicateEmail` |
    /// | false | false | 삽입 (`status=active`, `role=kind`) |
    pub async fn create_record(&self, kind: EntityKind, request: CreateRecordRequest) -> AppResult<RecordResponse> {
        let (cpf_check, email_check) = join(
            self.validator.exists(kind, fields::CPF, &request.cpf, None),
            self.validator.exists(kind, fields::EMAIL, &request.email, None),
        )
        .await;

        let (cpf_taken, email_taken) = settle_checks(cpf_check, email_check)
            .inspect_err(|e| log_failure(kind, "create", e))?;

        if cpf_taken {
            warn!("[{}] CPF 중복으로 생성 거부: {}", kind, request.cpf);
            return Err(AppError::DuplicateNaturalKey(format!("이미 등록된 CPF입니다: {}", request.cpf)));
        }

        if email_taken {
            warn!("[{}] 이메일 중복으로 생성 거부: {}", kind, request.email);
            return Err(AppError::DuplicateEmail(format!("이미 사용 중인 이메일입니다: {}", request.email)));
        }

        let collection = self.registry.get(kind)?;
        let mut record = request.into_record(kind);
        let id = collection
            .insert_one(&record)
            .await
            .inspect_err(|e| log_failure(kind, "create", e))?;
        record.id = Some(id);

        info!("[{}] 레코드 생성: cpf={} id={}", kind, record.cpf, id.to_hex());
        Ok(RecordResponse::from(record))
    }

    /// 레코드를 부분 업데이트합니다.
    ///
    /// - 레코드가 없으면 `NotFound`
    /// - 적용할 변경이 없으면 쓰기 없이 `NoChange`
    /// - 이메일이 바뀌면 자기 자신을 제외하고 중복 검사, 중복이면 `DuplicateEmail`
    /// - 조회 후 쓰기 전에 레코드가 사라졌다면 `UpdateFailed`
    pub async fn update_record(&self, kind: EntityKind, cpf: &str, changes: Document) -> AppResult<UpdateOutcome> {
        let collection = self.registry.get(kind)?;

        let existing = collection
            .find_one(cpf_filter(cpf))
            .await
            .inspect_err(|e| log_failure(kind, "update", e))?
            .ok_or_else(|| not_found(kind, cpf))?;

        let merged = merge(&existing, &changes);
        if merged.is_empty() {
            info!("[{}] 변경 사항 없음: cpf={}", kind, cpf);
            return Ok(UpdateOutcome::NoChange);
        }

        if let Some(email) = merged.email() {
            let taken = self.validator
                .exists(kind, fields::EMAIL, email, Some(cpf))
                .await
                .inspect_err(|e| log_failure(kind, "update", e))?;

            if taken {
                warn!("[{}] 이메일 중복으로 업데이트 거부: cpf={} email={}", kind, cpf, email);
                return Err(AppError::DuplicateEmail(format!("이미 사용 중인 이메일입니다: {}", email)));
            }
        }

        let applied = merged.applied_fields();
        let counts = collection
            .update_one(cpf_filter(cpf), merged.into_document())
            .await
            .inspect_err(|e| log_failure(kind, "update", e))?;

        if counts.matched == 0 {
            warn!("[{}] 업데이트 중 레코드가 사라짐: cpf={}", kind, cpf);
            return Err(AppError::UpdateFailed(format!("{} 업데이트에 실패했습니다: {}", kind.label(), cpf)));
        }

        if counts.modified == 0 {
            info!("[{}] 변경 사항 없음: cpf={}", kind, cpf);
            return Ok(UpdateOutcome::NoChange);
        }

        info!("[{}] 레코드 업데이트: cpf={} fields={:?}", kind, cpf, applied);
        Ok(UpdateOutcome::Updated { applied })
    }

    /// CPF로 레코드를 삭제합니다.
    ///
    /// 삭제된 문서가 없으면 `DeleteFailed`를 반환합니다.
    pub async fn delete_record(&self, kind: EntityKind, cpf: &str) -> AppResult<()> {
        let collection = self.registry.get(kind)?;
        let deleted = collection
            .delete_one(cpf_filter(cpf))
            .await
            .inspect_err(|e| log_failure(kind, "delete", e))?;

        if deleted == 0 {
            warn!("[{}] 삭제 대상 없음: cpf={}", kind, cpf);
            return Err(AppError::DeleteFailed(format!("{}를 삭제하지 못했습니다: {}", kind.label(), cpf)));
        }

        info!("[{}] 레코드 삭제: cpf={}", kind, cpf);
        Ok(())
    }
}

fn cpf_filter(cpf: &str) -> Document {
    doc! { fields::CPF: cpf }
}

fn not_found(kind: EntityKind, cpf: &str) -> AppError {
    AppError::NotFound(format!("{}를 찾을 수 없습니다: {}", kind.label(), cpf))
}

/// 두 중복 검사 결과를 합칩니다. 내부 오류가 저장소 오류보다 우선합니다.
fn settle_checks(cpf: AppResult<bool>, email: AppResult<bool>) -> AppResult<(bool, bool)> {
    match (cpf, email) {
        (Ok(cpf_taken), Ok(email_taken)) => Ok((cpf_taken, email_taken)),
        (Err(e @ AppError::InternalError(_)), _) | (_, Err(e @ AppError::InternalError(_))) => Err(e),
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

fn log_failure(kind: EntityKind, operation: &str, e: &AppError) {
    match e {
        AppError::StorageUnavailable(_) | AppError::InternalError(_) => {
            error!("[{}] {} 실패: {}", kind, operation, e)
        }
        _ if e.is_duplicate() => warn!("[{}] {} 중복 거부: {}", kind, operation, e),
        _ => warn!("[{}] {} 거부: {}", kind, operation, e),
    }
}
