//! 에러 타입 -- 도메인별 에러 정의

/// mibgen 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum MibgenError {
    /// 도구 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 지시문(generator.yml) 에러
    #[error("directives error: {0}")]
    Directives(#[from] DirectivesError),

    /// MIB 트리 로딩 에러
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// 설정 생성 에러
    #[error("generate error: {0}")]
    Generate(#[from] GenerateError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 도구 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 지시문 문서 에러
#[derive(Debug, thiserror::Error)]
pub enum DirectivesError {
    /// 파일 읽기 실패
    #[error("failed to read directives {path}: {reason}")]
    Read { path: String, reason: String },

    /// YAML 파싱 실패
    #[error("failed to parse directives {source_name}: {reason}")]
    ParseFailed { source_name: String, reason: String },

    /// 모듈 지시문 검증 실패
    #[error("invalid directive in module '{module}': {reason}")]
    Invalid { module: String, reason: String },
}

/// MIB 트리 로딩 에러
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// 트리 소스를 읽을 수 없음
    #[error("failed to load tree from {source_name}: {reason}")]
    LoadFailed { source_name: String, reason: String },
}

/// 설정 생성 에러
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// 사용자가 명시한 지시문을 만족할 수 없음
    #[error("unsatisfiable directive: {0}")]
    Directive(String),

    /// 출력 직렬화 실패
    #[error("output serialization failed: {0}")]
    Serialize(String),
}
