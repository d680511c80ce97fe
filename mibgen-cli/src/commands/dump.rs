//! `mibgen dump` command handler

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use mibgen_config_generator::{JsonTreeFile, PreparedTree, TreeNode, TreeSource, prepare_tree};
use mibgen_core::config::GeneratorConfig;

use crate::cli::DumpArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `dump` command.
///
/// Prints every node of the prepared tree in pre-order.
pub fn execute(
    args: DumpArgs,
    config: &GeneratorConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let tree_path = args
        .tree
        .unwrap_or_else(|| PathBuf::from(&config.tree_path));

    let prepared = prepare_tree(JsonTreeFile::new(tree_path).load()?);
    writer.render(&DumpReport::from_prepared(&prepared))?;
    Ok(())
}

/// One prepared node.
#[derive(Debug, Serialize)]
pub struct DumpLine {
    pub oid: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_size: Option<usize>,
    pub textual_convention: String,
    pub hint: String,
    pub indexes: Vec<String>,
    pub description: String,
}

impl From<&TreeNode> for DumpLine {
    fn from(node: &TreeNode) -> Self {
        Self {
            oid: node.oid.clone(),
            label: node.label.clone(),
            node_type: node.node_type.clone(),
            fixed_size: node.fixed_size.filter(|&size| size != 0),
            textual_convention: node.textual_convention.clone().unwrap_or_default(),
            hint: node.hint.clone(),
            indexes: node.indexes.clone(),
            description: node.description.clone(),
        }
    }
}

impl DumpLine {
    /// `oid label type[(size)] "tc" "hint" [indexes] description`
    pub fn to_line(&self) -> String {
        let node_type = match self.fixed_size {
            Some(size) => format!("{}({size})", self.node_type),
            None => self.node_type.clone(),
        };
        format!(
            "{} {} {} {:?} {:?} [{}] {}",
            self.oid,
            self.label,
            node_type,
            self.textual_convention,
            self.hint,
            self.indexes.join(" "),
            self.description
        )
    }
}

/// Whole prepared tree in pre-order.
#[derive(Debug, Serialize)]
pub struct DumpReport {
    pub nodes: Vec<DumpLine>,
}

impl DumpReport {
    pub fn from_prepared(prepared: &PreparedTree) -> Self {
        let tree = prepared.tree();
        Self {
            nodes: tree
                .walk(tree.root())
                .map(|(_, node)| DumpLine::from(node))
                .collect(),
        }
    }
}

impl Render for DumpReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        for node in &self.nodes {
            writeln!(w, "{}", node.to_line())?;
        }
        Ok(())
    }
}
