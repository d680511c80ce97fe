#![doc = include_str!("../README.md")]

pub mod classify;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod loader;
pub mod normalize;
pub mod oid;
pub mod sanitize;
pub mod tree;

// --- 주요 타입 re-export ---

pub use classify::{metric_access, metric_type};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::GeneratorError;
pub use generator::{
    GeneratedModule, Generation, GenerationReport, ModuleGenerator, ModuleReport,
    generate_config, render_yaml,
};
pub use loader::{JsonTreeFile, TreeSource, parse_tree_json};
pub use normalize::{Pass, PreparedTree, prepare_tree};
pub use oid::{is_dotted_prefix, minimize_oids};
pub use sanitize::sanitize_label_name;
pub use tree::{MibTree, NameIndex, NodeId, TreeNode};
