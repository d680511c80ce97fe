//! 타입/접근 권한 분류기
//!
//! MIB syntax 타입 토큰을 출력 메트릭 종류로, 접근 권한 토큰을 노출 여부로
//! 매핑하는 순수 함수입니다. 분류 실패는 "지원하지 않음"이며 호출자는
//! 해당 노드를 건너뛰어야 합니다.

use mibgen_core::types::{Access, MetricType};

/// syntax 타입 토큰을 출력 메트릭 종류로 매핑합니다.
///
/// 지원하지 않는 타입이면 `None`을 반환합니다.
pub fn metric_type(node_type: &str) -> Option<MetricType> {
    match node_type {
        "INTEGER" | "GAUGE" | "TIMETICKS" | "UINTEGER" | "UNSIGNED32" | "INTEGER32" => {
            Some(MetricType::Gauge)
        }
        "COUNTER" | "COUNTER64" => Some(MetricType::Counter),
        "OCTETSTR" | "BITSTRING" => Some(MetricType::OctetString),
        "IPADDR" => Some(MetricType::IpAddr),
        // NOTE: NETADDR의 올바른 매핑은 확실하지 않음. InetAddress로 가정.
        "NETADDR" => Some(MetricType::InetAddress),
        "PhysAddress48" => Some(MetricType::PhysAddress48),
        "DisplayString" => Some(MetricType::DisplayString),
        _ => None,
    }
}

/// 접근 권한이 메트릭으로 노출 가능한지 판단합니다.
///
/// `no-access`도 노출 대상에 포함됩니다 (일부 개념적 컬럼이 사용).
/// 그 외 토큰(`not-accessible`, `accessible-for-notify` 등)은 제외됩니다.
pub fn metric_access(access: Access) -> bool {
    matches!(
        access,
        Access::ReadOnly | Access::ReadWrite | Access::Create | Access::NoAccess
    )
}
