//! OID 범위 최소화
//!
//! 겹치는 OID 서브트리 집합을 최소 덮개로 줄입니다. 결과에서는 어떤 OID도
//! 다른 OID의 점 경계 접두사가 아닙니다.
//!
//! 문자열 사전식 정렬만으로 충분합니다. 조상 OID는 항상 자손의 텍스트 접두사이고
//! `.`이 숫자보다 앞서 정렬되므로, 조상 바로 뒤에 자손들이 연속으로 옵니다.

/// OID 집합을 최소화합니다.
///
/// 정렬 후 순회하며, 직전에 남긴 OID의 점 경계 자손이 아닌 경우에만 남깁니다.
/// 중복 OID도 함께 제거됩니다.
pub fn minimize_oids<I, S>(oids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut sorted: Vec<String> = oids.into_iter().map(Into::into).collect();
    sorted.sort();

    let mut minimized: Vec<String> = Vec::with_capacity(sorted.len());
    for oid in sorted {
        if minimized
            .last()
            .is_some_and(|prev| is_dotted_prefix(prev, &oid))
        {
            continue;
        }
        minimized.push(oid);
    }
    minimized
}

/// `ancestor`가 `oid` 자신이거나 점 경계 조상인지 확인합니다.
pub fn is_dotted_prefix(ancestor: &str, oid: &str) -> bool {
    format!("{oid}.").starts_with(&format!("{ancestor}."))
}
