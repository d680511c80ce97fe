//! MIB 객체 트리 아레나 및 이름 인덱스
//!
//! 외부 로더가 넘겨준 중첩 [`Node`] 트리를 전위 순회 순서의 아레나([`MibTree`])로
//! 평탄화합니다. 노드 간 참조는 [`NodeId`]로만 이루어지므로, 정규화 패스가
//! 노드를 수정하는 동안에도 [`NameIndex`]를 통한 조회가 가능합니다.
//!
//! 아레나가 전위 순서로 채워지기 때문에 `ids()` 순서대로 순회하면
//! 재귀적인 전위 순회와 정확히 같은 방문 순서가 됩니다.

use std::collections::HashMap;

use mibgen_core::types::{Access, Node};

/// 아레나 내 노드 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// 아레나에 저장된 노드
///
/// 자식은 소유하지 않고 [`NodeId`] 목록으로만 가리킵니다.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub oid: String,
    pub label: String,
    pub node_type: String,
    pub access: Access,
    pub description: String,
    pub hint: String,
    pub textual_convention: Option<String>,
    pub indexes: Vec<String>,
    pub augments: Option<String>,
    pub fixed_size: Option<usize>,
    children: Vec<NodeId>,
}

impl TreeNode {
    /// 직계 자식 목록
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// 전위 순서 아레나로 저장된 MIB 객체 트리
#[derive(Debug, Clone)]
pub struct MibTree {
    nodes: Vec<TreeNode>,
}

impl MibTree {
    /// 로더가 만든 루트 노드로부터 아레나를 구성합니다.
    pub fn from_root(root: Node) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(root.subtree_len()),
        };
        tree.push(root);
        tree
    }

    fn push(&mut self, node: Node) -> NodeId {
        let Node {
            oid,
            label,
            node_type,
            access,
            description,
            hint,
            textual_convention,
            indexes,
            augments,
            fixed_size,
            children,
        } = node;

        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            oid,
            label,
            node_type,
            access,
            description,
            hint,
            textual_convention,
            indexes,
            augments,
            fixed_size,
            children: Vec::with_capacity(children.len()),
        });

        for child in children {
            let child_id = self.push(child);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// 루트 노드 ID
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// 노드 수
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 노드가 없는지 여부 (`from_root`로 만든 트리는 항상 루트를 가짐)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// ID로 노드를 조회합니다.
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }

    /// 모든 노드 ID를 전위 순서로 반환합니다.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// `from`을 루트로 하는 서브트리를 전위 순서로 순회합니다.
    pub fn walk(&self, from: NodeId) -> Subtree<'_> {
        Subtree {
            tree: self,
            stack: vec![from],
        }
    }
}

/// 서브트리 전위 순회 반복자
pub struct Subtree<'a> {
    tree: &'a MibTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Subtree<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.get(id);
        self.stack.extend(node.children.iter().rev().copied());
        Some((id, node))
    }
}

/// OID 문자열과 라벨 → 노드 ID 조회 테이블
///
/// 트리가 만들어진 직후 한 번 구성합니다. 정규화 패스는 OID와 라벨을
/// 수정하지 않으므로 인덱스가 가리키는 노드는 항상 살아 있습니다.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_name: HashMap<String, NodeId>,
}

impl NameIndex {
    /// 트리 전체를 전위 순서로 훑어 인덱스를 구성합니다.
    ///
    /// 같은 키가 여러 번 나오면 나중에 방문한 노드가 이깁니다.
    pub fn build(tree: &MibTree) -> Self {
        let mut by_name = HashMap::with_capacity(tree.len() * 2);
        for id in tree.ids() {
            let node = tree.get(id);
            by_name.insert(node.oid.clone(), id);
            by_name.insert(node.label.clone(), id);
        }
        Self { by_name }
    }

    /// OID 또는 라벨로 노드를 찾습니다.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// 등록된 키 수
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
