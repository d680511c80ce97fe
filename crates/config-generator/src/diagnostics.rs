//! 권고성 진단 -- 실행을 멈추지 않는 결함 기록
//!
//! 노드/메트릭 단위 결함(해석할 수 없는 AUGMENTS 대상, 인덱스 라벨, 인덱스 타입)은
//! 해당 항목만 건너뛰고 [`Diagnostics`]에 기록됩니다. 기록과 동시에
//! `tracing` 경고 로그도 남깁니다.

use std::fmt;

use serde::Serialize;

/// 진단 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// AUGMENTS 대상 노드를 찾을 수 없음 (인덱스 전파 생략)
    UnresolvedAugments { node: String, augments: String },
    /// 인덱스 라벨을 찾을 수 없음 (메트릭 제외)
    UnresolvedIndex { node: String, index: String },
    /// 인덱스 노드 타입을 분류할 수 없음 (메트릭 제외)
    UnsupportedIndexType {
        node: String,
        index: String,
        index_type: String,
    },
}

impl Diagnostic {
    fn log(&self) {
        match self {
            Self::UnresolvedAugments { node, augments } => {
                tracing::warn!(node = %node, augments = %augments, "can't find augmenting oid");
            }
            Self::UnresolvedIndex { node, index } => {
                tracing::warn!(node = %node, index = %index, "can't find index, skipping metric");
            }
            Self::UnsupportedIndexType {
                node,
                index,
                index_type,
            } => {
                tracing::warn!(
                    node = %node,
                    index = %index,
                    index_type = %index_type,
                    "can't handle index type, skipping metric"
                );
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedAugments { node, augments } => {
                write!(f, "can't find augmenting oid {augments} for {node}")
            }
            Self::UnresolvedIndex { node, index } => {
                write!(f, "can't find index {index} for node {node}")
            }
            Self::UnsupportedIndexType {
                node,
                index,
                index_type,
            } => write!(
                f,
                "can't handle index type {index_type} of {index} for node {node}"
            ),
        }
    }
}

/// 한 번의 실행 동안 모인 진단 목록
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// 빈 목록을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 진단을 기록하고 경고 로그를 남깁니다.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.0.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_records_in_order() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::UnresolvedAugments {
            node: "fooEntry".to_owned(),
            augments: "barEntry".to_owned(),
        });
        diags.push(Diagnostic::UnresolvedIndex {
            node: "fooValue".to_owned(),
            index: "fooIndex".to_owned(),
        });
        assert_eq!(diags.len(), 2);
        assert!(matches!(
            diags.iter().next(),
            Some(Diagnostic::UnresolvedAugments { .. })
        ));
    }

    #[test]
    fn display_names_the_node() {
        let d = Diagnostic::UnsupportedIndexType {
            node: "hrSWRunName".to_owned(),
            index: "hrSWRunIndex".to_owned(),
            index_type: "OBJID".to_owned(),
        };
        let msg = d.to_string();
        assert!(msg.contains("hrSWRunName"));
        assert!(msg.contains("OBJID"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let d = Diagnostic::UnresolvedIndex {
            node: "a".to_owned(),
            index: "b".to_owned(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "unresolved_index");
        assert_eq!(json["index"], "b");
    }
}
