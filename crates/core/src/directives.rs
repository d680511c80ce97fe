//! 모듈 지시문 -- generator.yml 파싱 및 검증
//!
//! 지시문 문서는 모듈 이름을 키로 하는 [`ModuleConfig`] 맵입니다.
//! 각 모듈은 walk 대상, 인덱스 룩업 규칙, 메트릭별 override를 정의하며,
//! 그 밖의 키는 walk 파라미터로 해석 없이 출력에 그대로 전달됩니다.
//!
//! # YAML 스키마
//! ```yaml
//! modules:
//!   if_mib:
//!     walk: [sysUpTime, interfaces]
//!     lookups:
//!       - old_index: ifIndex
//!         new_index: ifDescr
//!     overrides:
//!       ifType:
//!         regex_extracts:
//!           "":
//!             - regex: "(.*)"
//!               value: "$1"
//!     version: 2
//!     max_repetitions: 25
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DirectivesError;
use crate::types::{RegexpExtracts, WalkParams};

/// 지시문 문서 전체
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directives {
    /// 모듈 이름 → 모듈 지시문
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleConfig>,
}

impl Directives {
    /// 파일에서 지시문을 로드하고 검증합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectivesError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DirectivesError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// YAML 문자열을 파싱하여 지시문을 생성합니다.
    pub fn parse(yaml_str: &str, source: &str) -> Result<Self, DirectivesError> {
        let directives: Directives =
            serde_yaml::from_str(yaml_str).map_err(|e| DirectivesError::ParseFailed {
                source_name: source.to_owned(),
                reason: format!("YAML parse error: {e}"),
            })?;

        directives.validate()?;

        Ok(directives)
    }

    /// 모든 모듈 지시문의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), DirectivesError> {
        for (name, module) in &self.modules {
            if name.trim().is_empty() {
                return Err(DirectivesError::Invalid {
                    module: "(empty)".to_owned(),
                    reason: "module name must not be empty".to_owned(),
                });
            }
            module.validate(name)?;
        }
        Ok(())
    }

    /// 설정된 모듈 수를 반환합니다.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}

/// 모듈 하나의 지시문
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// walk 할 OID 또는 라벨 목록
    #[serde(default)]
    pub walk: Vec<String>,
    /// 인덱스 룩업 규칙 (순서대로 적용)
    #[serde(default)]
    pub lookups: Vec<LookupRule>,
    /// 메트릭 이름 또는 OID → override
    #[serde(default)]
    pub overrides: BTreeMap<String, MetricOverrides>,
    /// 해석하지 않고 출력에 전달되는 walk 파라미터
    #[serde(flatten)]
    pub walk_params: WalkParams,
}

impl ModuleConfig {
    /// 모듈 지시문을 검증합니다.
    pub fn validate(&self, module: &str) -> Result<(), DirectivesError> {
        if self.walk.is_empty() {
            return Err(DirectivesError::Invalid {
                module: module.to_owned(),
                reason: "walk must contain at least one oid or label".to_owned(),
            });
        }

        if let Some(pos) = self.walk.iter().position(|w| w.trim().is_empty()) {
            return Err(DirectivesError::Invalid {
                module: module.to_owned(),
                reason: format!("walk[{pos}] must not be empty"),
            });
        }

        for (idx, lookup) in self.lookups.iter().enumerate() {
            if lookup.old_index.is_empty() || lookup.new_index.is_empty() {
                return Err(DirectivesError::Invalid {
                    module: module.to_owned(),
                    reason: format!("lookups[{idx}] requires both old_index and new_index"),
                });
            }
        }

        for (metric, params) in &self.overrides {
            for (suffix, extracts) in &params.regex_extracts {
                for (idx, extract) in extracts.iter().enumerate() {
                    Regex::new(&extract.regex).map_err(|e| DirectivesError::Invalid {
                        module: module.to_owned(),
                        reason: format!(
                            "invalid regex in overrides.{metric}.regex_extracts['{suffix}'][{idx}]: {e}"
                        ),
                    })?;
                }
            }
        }

        Ok(())
    }
}

/// 인덱스 룩업 규칙
///
/// `old_index` 라벨을 가진 인덱스를 `new_index`를 walk 해서 얻은 값으로 치환합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRule {
    /// 치환할 인덱스 라벨
    pub old_index: String,
    /// 대신 사용할 객체 (라벨 또는 OID)
    pub new_index: String,
}

/// 메트릭별 override
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricOverrides {
    /// 정규식 추출 규칙
    #[serde(default)]
    pub regex_extracts: RegexpExtracts,
}
