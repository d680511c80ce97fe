//! 설정 관리 -- mibgen.toml 파싱 및 런타임 설정
//!
//! [`MibgenConfig`]는 도구 동작(로깅, 입출력 경로)을 담는 최상위 구조체입니다.
//! 모듈별 walk/lookup/override 지시문은 [`crate::directives`]가 담당합니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`MIBGEN_GENERATOR_TREE_PATH=mibs.json` 형식)
//! 3. 설정 파일 (`mibgen.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), mibgen_core::error::MibgenError> {
//! use mibgen_core::config::MibgenConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = MibgenConfig::load("mibgen.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = MibgenConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, MibgenError};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// mibgen 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MibgenConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 생성기 입출력 설정
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// 빈 값이라 무시된 환경변수 (로깅 초기화 후 다시 보고하기 위함)
    #[serde(skip)]
    ignored_env: Vec<&'static str>,
}

impl MibgenConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MibgenError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MibgenError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MibgenError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                MibgenError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, MibgenError> {
        toml::from_str(toml_str).map_err(|e| {
            MibgenError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `MIBGEN_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        let ignored = &mut self.ignored_env;
        override_string(&mut self.general.log_level, "MIBGEN_GENERAL_LOG_LEVEL", ignored);
        override_string(&mut self.general.log_format, "MIBGEN_GENERAL_LOG_FORMAT", ignored);

        override_string(
            &mut self.generator.tree_path,
            "MIBGEN_GENERATOR_TREE_PATH",
            ignored,
        );
        override_string(
            &mut self.generator.directives_path,
            "MIBGEN_GENERATOR_DIRECTIVES_PATH",
            ignored,
        );
        override_string(
            &mut self.generator.output_path,
            "MIBGEN_GENERATOR_OUTPUT_PATH",
            ignored,
        );
    }

    /// 값이 비어 있어 무시된 환경변수 이름
    ///
    /// 설정은 로깅 초기화 전에 로드되므로, 호출자는 구독자를 설치한 뒤
    /// 이 목록으로 경고를 다시 남길 수 있습니다.
    pub fn ignored_env_overrides(&self) -> &[&'static str] {
        &self.ignored_env
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), MibgenError> {
        if !VALID_LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_LEVELS.join(", ")),
            }
            .into());
        }

        if !VALID_LOG_FORMATS.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_FORMATS.join(", ")),
            }
            .into());
        }

        let paths = [
            ("generator.tree_path", &self.generator.tree_path),
            ("generator.directives_path", &self.generator.directives_path),
            ("generator.output_path", &self.generator.output_path),
        ];
        for (field, value) in paths {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_owned(),
                    reason: "path must not be empty".to_owned(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 생성기 입출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// 외부 로더가 만든 MIB 트리(JSON) 경로
    pub tree_path: String,
    /// 모듈 지시문 파일 경로
    pub directives_path: String,
    /// 생성된 설정 파일 경로
    pub output_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tree_path: "mibs.json".to_owned(),
            directives_path: "generator.yml".to_owned(),
            output_path: "snmp.yml".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &'static str, ignored: &mut Vec<&'static str>) {
    if let Ok(val) = std::env::var(env_key) {
        if val.is_empty() {
            warn!(env_key, "empty value in env var, ignoring");
            ignored.push(env_key);
            return;
        }
        *target = val;
    }
}
