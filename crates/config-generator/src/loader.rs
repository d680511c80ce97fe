//! MIB 트리 로딩
//!
//! 실제 MIB 파일 파싱은 외부 로더의 몫입니다. 생성기는 [`TreeSource`] 트레이트를
//! 통해 완전히 구성된 [`Node`] 트리를 받으며, 기본 구현으로 외부 로더가 내보낸
//! JSON 파일을 읽는 [`JsonTreeFile`]을 제공합니다.
//!
//! # JSON 형식
//! ```json
//! {
//!   "oid": "1.3.6.1.2.1.2", "label": "interfaces",
//!   "children": [
//!     { "oid": "1.3.6.1.2.1.2.1", "label": "ifNumber", "type": "INTEGER",
//!       "access": "read-only", "description": "The number of network interfaces" }
//!   ]
//! }
//! ```

use std::path::PathBuf;

use mibgen_core::types::Node;

use crate::error::GeneratorError;

/// 트리 파일 최대 크기 (256 MB)
const MAX_TREE_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// 완전히 구성된 MIB 트리를 제공하는 소스
pub trait TreeSource {
    /// 로그/에러 메시지용 소스 설명
    fn describe(&self) -> String;

    /// 트리를 로드합니다.
    fn load(&self) -> Result<Node, GeneratorError>;
}

/// JSON 파일 트리 소스
#[derive(Debug, Clone)]
pub struct JsonTreeFile {
    path: PathBuf,
    max_size: u64,
}

impl JsonTreeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size: MAX_TREE_FILE_SIZE,
        }
    }

    /// 최대 파일 크기를 변경합니다.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    fn load_error(&self, reason: String) -> GeneratorError {
        GeneratorError::TreeLoad {
            source_name: self.describe(),
            reason,
        }
    }
}

impl TreeSource for JsonTreeFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Node, GeneratorError> {
        // 읽기 전에 크기 확인
        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| self.load_error(format!("failed to read metadata: {e}")))?;
        if metadata.len() > self.max_size {
            return Err(self.load_error(format!(
                "file too large: {} bytes (max: {})",
                metadata.len(),
                self.max_size
            )));
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| self.load_error(format!("failed to read file: {e}")))?;

        let root = parse_tree_json(&content, &self.describe())?;
        tracing::info!(
            source = %self.describe(),
            nodes = root.subtree_len(),
            "loaded mib tree"
        );
        Ok(root)
    }
}

/// JSON 문자열에서 트리를 파싱하고 구조를 검증합니다.
///
/// 모든 노드는 비어 있지 않은 OID를 가져야 합니다.
pub fn parse_tree_json(content: &str, source: &str) -> Result<Node, GeneratorError> {
    let root: Node = serde_json::from_str(content).map_err(|e| GeneratorError::TreeLoad {
        source_name: source.to_owned(),
        reason: format!("JSON parse error: {e}"),
    })?;

    let mut stack = vec![&root];
    while let Some(node) = stack.pop() {
        if node.oid.trim().is_empty() {
            return Err(GeneratorError::TreeLoad {
                source_name: source.to_owned(),
                reason: format!("node '{}' has an empty oid", node.label),
            });
        }
        stack.extend(node.children.iter());
    }

    Ok(root)
}
