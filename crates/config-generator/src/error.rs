//! 설정 생성기 에러 타입
//!
//! [`GeneratorError`]는 사용자가 명시한 지시문을 만족할 수 없을 때의 치명적 에러와
//! 트리 로딩/출력 직렬화 실패를 표현합니다. 노드 단위 결함은 에러가 아니라
//! [`crate::diagnostics::Diagnostic`]으로 기록됩니다.
//!
//! `From<GeneratorError> for MibgenError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use mibgen_core::error::{GenerateError, MibgenError, TreeError};

/// 설정 생성기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// walk 대상 이름/OID를 트리에서 찾을 수 없음
    #[error("module '{module}': cannot find oid '{target}' to walk")]
    UnknownWalkTarget {
        /// 모듈 이름
        module: String,
        /// 지시문에 적힌 walk 대상
        target: String,
    },

    /// 룩업의 new_index를 트리에서 찾을 수 없음
    #[error("module '{module}': unknown index '{index}' in lookup")]
    UnknownLookupIndex {
        /// 모듈 이름
        module: String,
        /// 지시문에 적힌 new_index
        index: String,
    },

    /// 룩업 대상 노드의 타입을 분류할 수 없음
    #[error("module '{module}': unknown index type '{node_type}' for lookup '{index}'")]
    UnsupportedLookupType {
        /// 모듈 이름
        module: String,
        /// 지시문에 적힌 new_index
        index: String,
        /// 분류에 실패한 syntax 타입 토큰
        node_type: String,
    },

    /// 트리 소스 로딩 실패
    #[error("tree load error: {source_name}: {reason}")]
    TreeLoad {
        /// 소스 설명 (파일 경로 등)
        source_name: String,
        /// 실패 사유
        reason: String,
    },

    /// 출력 직렬화 실패
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<GeneratorError> for MibgenError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::TreeLoad {
                source_name,
                reason,
            } => MibgenError::Tree(TreeError::LoadFailed {
                source_name,
                reason,
            }),
            GeneratorError::Serialize(reason) => {
                MibgenError::Generate(GenerateError::Serialize(reason))
            }
            other => MibgenError::Generate(GenerateError::Directive(other.to_string())),
        }
    }
}
