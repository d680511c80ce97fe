//! 라벨 정규화
//!
//! 출력 메트릭 이름과 인덱스/룩업 라벨 이름은 `[A-Za-z0-9_]`만 허용됩니다.

use std::sync::LazyLock;

use regex::Regex;

static INVALID_LABEL_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("label char class is a valid regex"));

/// `[A-Za-z0-9_]` 밖의 모든 문자를 `_`로 바꿉니다.
pub fn sanitize_label_name(name: &str) -> String {
    INVALID_LABEL_CHAR.replace_all(name, "_").into_owned()
}
