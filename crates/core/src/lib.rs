#![doc = include_str!("../README.md")]

pub mod config;
pub mod directives;
pub mod error;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, DirectivesError, GenerateError, MibgenError, TreeError};

// 설정
pub use config::MibgenConfig;

// 지시문
pub use directives::{Directives, LookupRule, MetricOverrides, ModuleConfig};

// 도메인 타입
pub use types::{
    Access, Index, Lookup, Metric, MetricType, Module, Node, OutputConfig, RegexpExtract,
    RegexpExtracts, WalkParams,
};
