//! 도메인 타입 -- MIB 객체 트리와 생성 결과 모델
//!
//! 외부 MIB 로더가 만들어 주는 [`Node`] 트리와, 생성기가 외부 직렬화기에
//! 넘겨주는 [`Module`] / [`Metric`] 출력 모델을 정의합니다.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// MIB 객체 하나
///
/// 외부 로더가 생성한 트리의 노드입니다. 부모가 자식을 배타적으로 소유하며,
/// `augments`, `indexes` 같은 교차 참조는 모두 라벨 문자열로만 표현됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// 점 표기 OID (예: `1.3.6.1.2.1.2.2.1.10`)
    pub oid: String,
    /// 사람이 읽는 이름 (예: `ifInOctets`)
    pub label: String,
    /// 선언된 syntax 타입 토큰 (예: `INTEGER`, `OCTETSTR`, `COUNTER64`)
    #[serde(rename = "type", default)]
    pub node_type: String,
    /// 접근 권한
    #[serde(default)]
    pub access: Access,
    /// 설명
    #[serde(default)]
    pub description: String,
    /// DISPLAY-HINT 문자열
    #[serde(default)]
    pub hint: String,
    /// TEXTUAL-CONVENTION 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textual_convention: Option<String>,
    /// 인덱스 라벨 목록 (순서가 복합 키의 사전식 순서를 결정)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<String>,
    /// AUGMENTS 대상 라벨
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augments: Option<String>,
    /// 고정 바이트 길이
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_size: Option<usize>,
    /// 자식 노드
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// OID와 라벨만 가진 노드를 생성합니다.
    pub fn new(oid: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// 이 노드를 루트로 하는 서브트리의 노드 수를 반환합니다.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.oid)
    }
}

/// MIB 접근 권한 토큰
///
/// net-snmp 스타일 토큰(`ACCESS_READONLY` 등)도 별칭으로 받아들입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    #[serde(rename = "read-only", alias = "ACCESS_READONLY")]
    ReadOnly,
    #[serde(rename = "read-write", alias = "ACCESS_READWRITE")]
    ReadWrite,
    #[serde(rename = "create", alias = "read-create", alias = "ACCESS_CREATE")]
    Create,
    #[serde(rename = "no-access", alias = "ACCESS_NOACCESS")]
    NoAccess,
    #[serde(rename = "not-accessible", alias = "ACCESS_NOTACCESSIBLE")]
    NotAccessible,
    #[serde(rename = "accessible-for-notify", alias = "ACCESS_NOTIFY")]
    AccessibleForNotify,
    #[serde(rename = "write-only", alias = "ACCESS_WRITEONLY")]
    WriteOnly,
    /// 알 수 없거나 선언되지 않은 토큰
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
            Self::Create => "create",
            Self::NoAccess => "no-access",
            Self::NotAccessible => "not-accessible",
            Self::AccessibleForNotify => "accessible-for-notify",
            Self::WriteOnly => "write-only",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// 출력 메트릭 종류
///
/// 모든 [`Metric`]의 `type`은 이 유한 집합 중 하나입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    #[serde(rename = "gauge")]
    Gauge,
    #[serde(rename = "counter")]
    Counter,
    OctetString,
    IpAddr,
    InetAddress,
    PhysAddress48,
    DisplayString,
}

impl MetricType {
    /// 출력 설정에 기록되는 문자열 표현
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gauge => "gauge",
            Self::Counter => "counter",
            Self::OctetString => "OctetString",
            Self::IpAddr => "IpAddr",
            Self::InetAddress => "InetAddress",
            Self::PhysAddress48 => "PhysAddress48",
            Self::DisplayString => "DisplayString",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 메트릭 인덱스 (테이블 복합 키의 한 구성 요소)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// 출력 라벨 이름 (정규화된 라벨)
    pub labelname: String,
    /// 인덱스 값의 타입
    #[serde(rename = "type")]
    pub index_type: MetricType,
    /// 고정 바이트 길이
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_size: Option<usize>,
}

/// 인덱스 룩업 -- 불투명한 숫자 인덱스를 다른 OID 값으로 치환
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    /// 룩업 키로 사용되는 인덱스 라벨
    pub labels: Vec<String>,
    /// 결과 라벨 이름
    pub labelname: String,
    /// 함께 walk 해야 하는 OID
    pub oid: String,
    /// 룩업 값의 타입
    #[serde(rename = "type")]
    pub lookup_type: MetricType,
}

/// 정규식 추출 규칙 (override에서 그대로 복사됨)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexpExtract {
    /// 매칭 시 사용할 값 템플릿
    #[serde(default)]
    pub value: String,
    /// 정규식 패턴
    pub regex: String,
}

/// 메트릭 이름 접미사 → 추출 규칙 목록
pub type RegexpExtracts = BTreeMap<String, Vec<RegexpExtract>>;

/// 생성된 메트릭 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// 정규화된 메트릭 이름
    pub name: String,
    /// 메트릭 OID
    pub oid: String,
    /// 출력 메트릭 종류
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    /// 도움말 (`설명 - OID`)
    pub help: String,
    /// 인덱스 목록 (테이블 행의 인덱스 순서 유지)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,
    /// 룩업 목록
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lookups: Vec<Lookup>,
    /// override에서 복사된 정규식 추출 규칙
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regex_extracts: RegexpExtracts,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.oid, self.metric_type)
    }
}

/// walk 파라미터 -- 코어는 해석하지 않고 그대로 전달합니다.
pub type WalkParams = BTreeMap<String, serde_yaml::Value>;

/// 생성된 모듈 하나
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// 최소화된 walk OID 목록
    #[serde(default)]
    pub walk: Vec<String>,
    /// 메트릭 목록 (발견 순서)
    #[serde(default)]
    pub metrics: Vec<Metric>,
    /// 전달용 walk 파라미터
    #[serde(flatten)]
    pub walk_params: WalkParams,
}

impl Module {
    /// 이름 또는 OID로 메트릭을 찾습니다.
    pub fn find_metric(&self, key: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == key || m.oid == key)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Module({} metrics, {} walk roots)",
            self.metrics.len(),
            self.walk.len(),
        )
    }
}

/// 모듈 이름 → 생성된 모듈 (정렬된 맵이라 출력이 결정적)
pub type OutputConfig = BTreeMap<String, Module>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_deserializes_from_loader_json() {
        let json = r#"{
            "oid": "1.3.6.1.2.1.2.2.1",
            "label": "ifEntry",
            "access": "no-access",
            "indexes": ["ifIndex"],
            "textualConvention": "DisplayString",
            "fixedSize": 6,
            "children": [
                {"oid": "1.3.6.1.2.1.2.2.1.1", "label": "ifIndex", "type": "INTEGER", "access": "read-only"}
            ]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.label, "ifEntry");
        assert_eq!(node.access, Access::NoAccess);
        assert_eq!(node.indexes, vec!["ifIndex"]);
        assert_eq!(node.textual_convention.as_deref(), Some("DisplayString"));
        assert_eq!(node.fixed_size, Some(6));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].node_type, "INTEGER");
        assert!(node.children[0].augments.is_none());
    }

    #[test]
    fn access_accepts_net_snmp_aliases() {
        let a: Access = serde_json::from_str("\"ACCESS_READONLY\"").unwrap();
        assert_eq!(a, Access::ReadOnly);
        let a: Access = serde_json::from_str("\"read-create\"").unwrap();
        assert_eq!(a, Access::Create);
    }

    #[test]
    fn access_unknown_token_falls_back() {
        let a: Access = serde_json::from_str("\"something-else\"").unwrap();
        assert_eq!(a, Access::Unknown);
    }

    #[test]
    fn node_subtree_len() {
        let mut root = Node::new("1", "iso");
        let mut org = Node::new("1.3", "org");
        org.children.push(Node::new("1.3.6", "dod"));
        root.children.push(org);
        assert_eq!(root.subtree_len(), 3);
    }

    #[test]
    fn metric_type_serializes_to_exporter_names() {
        assert_eq!(serde_yaml::to_string(&MetricType::Gauge).unwrap().trim(), "gauge");
        assert_eq!(
            serde_yaml::to_string(&MetricType::OctetString).unwrap().trim(),
            "OctetString"
        );
        assert_eq!(MetricType::PhysAddress48.to_string(), "PhysAddress48");
    }

    #[test]
    fn module_serializes_walk_params_inline() {
        let mut module = Module {
            walk: vec!["1.3.6.1.2.1.2".to_owned()],
            ..Module::default()
        };
        module
            .walk_params
            .insert("max_repetitions".to_owned(), serde_yaml::Value::from(25));

        let yaml = serde_yaml::to_string(&module).unwrap();
        assert!(yaml.contains("max_repetitions: 25"));
        assert!(yaml.contains("walk:"));

        let back: Module = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, module);
    }

    #[test]
    fn metric_omits_empty_collections() {
        let metric = Metric {
            name: "sysUpTime".to_owned(),
            oid: "1.3.6.1.2.1.1.3".to_owned(),
            metric_type: MetricType::Gauge,
            help: "uptime - 1.3.6.1.2.1.1.3".to_owned(),
            indexes: vec![],
            lookups: vec![],
            regex_extracts: RegexpExtracts::new(),
        };
        let yaml = serde_yaml::to_string(&metric).unwrap();
        assert!(!yaml.contains("indexes"));
        assert!(!yaml.contains("lookups"));
        assert!(!yaml.contains("regex_extracts"));
        assert_eq!(metric.to_string(), "sysUpTime (1.3.6.1.2.1.1.3, gauge)");
    }
}
