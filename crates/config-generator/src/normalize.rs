//! 트리 정규화 -- 생성 전에 한 번 실행되는 전체 트리 패스
//!
//! [`prepare_tree`]는 로더가 넘겨준 트리를 아레나로 평탄화하고, 이름 인덱스를
//! 만든 뒤 [`Pass::ALL`]의 패스를 순서대로 실행합니다. 각 패스는 트리 전체를
//! 전위 순서로 끝까지 훑은 뒤에야 다음 패스가 시작됩니다.
//!
//! 정규화가 끝난 [`PreparedTree`]는 생성 단계에서 읽기 전용으로만 공유됩니다.

use std::sync::LazyLock;

use mibgen_core::types::Node;
use regex::Regex;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::tree::{MibTree, NameIndex, NodeId, TreeNode};

/// `255a`, `1t` 처럼 "숫자 + a|t"를 포함하는 display hint.
/// ASCII와 UTF-8 문자열을 모두 DisplayString으로 취급합니다.
static DISPLAY_STRING_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+[at]").expect("display hint pattern is a valid regex"));

/// MAC 주소 display hint (RFC 2579)
const PHYS_ADDRESS_HINT: &str = "1x:";

/// 인덱스 자리에 객체 이름 대신 들어가는 타입 이름
const INTEGER_INDEX: &str = "INTEGER";

const DISPLAY_STRING: &str = "DisplayString";
const PHYS_ADDRESS_48: &str = "PhysAddress48";

/// 정규화 패스
///
/// 패스 순서는 결과에 영향을 줍니다 (예: 자기 인덱스 보정이 AUGMENTS 전파보다
/// 먼저 실행되어야 보정된 인덱스가 전파됨).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// 공백 정리 후 첫 문장만 남김
    TrimDescriptions,
    /// `INTEGER` 인덱스를 노드 자신의 라벨로 교체
    FixSelfIndexes,
    /// AUGMENTS 대상의 인덱스를 노드와 직계 자식에 복사
    PropagateAugments,
    /// 인덱스를 가진 노드에서 직계 자식으로 인덱스 복사
    PropagateTableIndexes,
    /// display hint / TEXTUAL-CONVENTION 기반 타입 재분류
    ApplyTypeHints,
}

impl Pass {
    /// 실행 순서대로 나열한 전체 패스
    pub const ALL: [Pass; 5] = [
        Pass::TrimDescriptions,
        Pass::FixSelfIndexes,
        Pass::PropagateAugments,
        Pass::PropagateTableIndexes,
        Pass::ApplyTypeHints,
    ];

    /// 패스 이름 (로그용)
    pub fn name(self) -> &'static str {
        match self {
            Pass::TrimDescriptions => "trim_descriptions",
            Pass::FixSelfIndexes => "fix_self_indexes",
            Pass::PropagateAugments => "propagate_augments",
            Pass::PropagateTableIndexes => "propagate_table_indexes",
            Pass::ApplyTypeHints => "apply_type_hints",
        }
    }

    /// 트리 전체에 패스를 적용합니다.
    pub fn apply(self, tree: &mut MibTree, index: &NameIndex, diagnostics: &mut Diagnostics) {
        match self {
            Pass::TrimDescriptions => for_each_node(tree, |node| {
                node.description = trim_description(&node.description);
            }),
            Pass::FixSelfIndexes => for_each_node(tree, |node| {
                for idx in node.indexes.iter_mut() {
                    if idx == INTEGER_INDEX {
                        idx.clone_from(&node.label);
                    }
                }
            }),
            Pass::PropagateAugments => propagate_augments(tree, index, diagnostics),
            Pass::PropagateTableIndexes => propagate_table_indexes(tree),
            Pass::ApplyTypeHints => for_each_node(tree, apply_type_hint),
        }
    }
}

fn for_each_node(tree: &mut MibTree, mut f: impl FnMut(&mut TreeNode)) {
    for id in tree.ids() {
        f(tree.get_mut(id));
    }
}

/// 공백 연속을 하나로 줄이고 첫 `". "` 앞까지만 남깁니다.
pub fn trim_description(description: &str) -> String {
    let collapsed = description.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.split_once(". ") {
        Some((first, _)) => first.to_owned(),
        None => collapsed,
    }
}

fn propagate_augments(tree: &mut MibTree, index: &NameIndex, diagnostics: &mut Diagnostics) {
    for id in tree.ids() {
        let node = tree.get(id);
        let Some(target) = node.augments.as_deref().filter(|a| !a.is_empty()) else {
            continue;
        };

        let Some(augmented) = index.resolve(target) else {
            diagnostics.push(Diagnostic::UnresolvedAugments {
                node: node.label.clone(),
                augments: target.to_owned(),
            });
            continue;
        };

        let indexes = tree.get(augmented).indexes.clone();
        copy_indexes_to_children(tree, id, &indexes);
        tree.get_mut(id).indexes = indexes;
    }
}

fn propagate_table_indexes(tree: &mut MibTree) {
    // 전위 순서라 부모에서 복사된 인덱스가 손자까지 연쇄적으로 내려감
    for id in tree.ids() {
        let indexes = &tree.get(id).indexes;
        if indexes.is_empty() {
            continue;
        }
        let indexes = indexes.clone();
        copy_indexes_to_children(tree, id, &indexes);
    }
}

fn copy_indexes_to_children(tree: &mut MibTree, parent: NodeId, indexes: &[String]) {
    let children = tree.get(parent).children().to_vec();
    for child in children {
        tree.get_mut(child).indexes = indexes.to_vec();
    }
}

fn apply_type_hint(node: &mut TreeNode) {
    if node.hint == PHYS_ADDRESS_HINT {
        node.node_type = PHYS_ADDRESS_48.to_owned();
    }
    if DISPLAY_STRING_HINT.is_match(&node.hint) {
        node.node_type = DISPLAY_STRING.to_owned();
    }
    // 오래된 MIB는 hint 없이 RFC1213 DisplayString만 참조함
    if node.textual_convention.as_deref() == Some(DISPLAY_STRING) {
        node.node_type = DISPLAY_STRING.to_owned();
    }
}

/// 정규화가 끝난 트리와 이름 인덱스
#[derive(Debug, Clone)]
pub struct PreparedTree {
    tree: MibTree,
    index: NameIndex,
    diagnostics: Diagnostics,
}

impl PreparedTree {
    /// 아레나 트리
    pub fn tree(&self) -> &MibTree {
        &self.tree
    }

    /// 이름 인덱스
    pub fn index(&self) -> &NameIndex {
        &self.index
    }

    /// 정규화 중 기록된 권고성 진단
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// OID 또는 라벨로 노드 ID를 찾습니다.
    pub fn resolve_id(&self, name: &str) -> Option<NodeId> {
        self.index.resolve(name)
    }

    /// OID 또는 라벨로 노드를 찾습니다.
    pub fn resolve(&self, name: &str) -> Option<&TreeNode> {
        self.index.resolve(name).map(|id| self.tree.get(id))
    }
}

/// 트리를 정규화합니다.
///
/// 이름 인덱스는 패스 실행 전에 만들어집니다. 같은 OID/라벨이 여러 번 나오면
/// 전위 순서상 나중 노드가 인덱스에 남습니다.
pub fn prepare_tree(root: Node) -> PreparedTree {
    let mut tree = MibTree::from_root(root);
    let index = NameIndex::build(&tree);
    let mut diagnostics = Diagnostics::new();

    for pass in Pass::ALL {
        tracing::debug!(pass = pass.name(), nodes = tree.len(), "running normalization pass");
        pass.apply(&mut tree, &index, &mut diagnostics);
    }

    tracing::debug!(
        nodes = tree.len(),
        names = index.len(),
        diagnostics = diagnostics.len(),
        "tree prepared"
    );

    PreparedTree {
        tree,
        index,
        diagnostics,
    }
}
