//! `mibgen generate` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use mibgen_config_generator::{
    Generation, GenerationReport, JsonTreeFile, TreeSource, generate_config, prepare_tree,
    render_yaml,
};
use mibgen_core::config::GeneratorConfig;
use mibgen_core::directives::Directives;

use crate::cli::GenerateArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `generate` command.
///
/// Loads and prepares the tree, generates every module in the directives,
/// and writes the YAML file only after the whole run succeeded.
///
/// # Errors
///
/// - `CliError::Config` if the directives are missing or invalid
/// - `CliError::Core` if the tree cannot be loaded, a walk or lookup target
///   cannot be resolved, or the output fails to serialise
/// - `CliError::Io` if the output file cannot be written
pub fn execute(
    args: GenerateArgs,
    config: &GeneratorConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let tree_path = args
        .tree
        .unwrap_or_else(|| PathBuf::from(&config.tree_path));
    let directives_path = args
        .directives
        .unwrap_or_else(|| PathBuf::from(&config.directives_path));
    let output_path = args
        .output_path
        .unwrap_or_else(|| PathBuf::from(&config.output_path));

    let tree = JsonTreeFile::new(&tree_path).load()?;
    let prepared = prepare_tree(tree);

    info!(path = %directives_path.display(), "loading module directives");
    let directives = Directives::load(&directives_path)?;

    let generation = generate_config(&prepared, &directives)?;
    let yaml = render_yaml(&generation.config)?;

    write_output(&output_path, &yaml)?;
    info!(path = %output_path.display(), "config written");

    let report = GenerateReport::new(&output_path, generation);
    writer.render(&report)?;
    Ok(())
}

/// Write `content` to a temp file next to `path`, then rename it into place.
///
/// A failed write never leaves a truncated config behind.
fn write_output(path: &Path, content: &str) -> Result<(), CliError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Generation summary.
#[derive(Serialize)]
pub struct GenerateReport {
    /// Written config file
    pub output_path: String,
    /// Metrics across all modules
    pub total_metrics: usize,
    #[serde(flatten)]
    pub report: GenerationReport,
}

impl GenerateReport {
    fn new(output_path: &Path, generation: Generation) -> Self {
        Self {
            output_path: output_path.display().to_string(),
            total_metrics: generation.report.total_metrics(),
            report: generation.report,
        }
    }
}

impl Render for GenerateReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Config written: {} ({} modules, {} metrics)",
            self.output_path.bold(),
            self.report.modules.len(),
            self.total_metrics
        )?;

        let name_width = self
            .report
            .modules
            .iter()
            .map(|m| m.name.len())
            .max()
            .unwrap_or(0);
        for module in &self.report.modules {
            writeln!(
                w,
                "  {:<name_width$}  {:>5} metrics  {:>3} walk roots",
                module.name, module.metric_count, module.walk_count
            )?;
        }

        let warnings = self.report.diagnostic_count();
        if warnings > 0 {
            writeln!(w)?;
            writeln!(w, "{}", format!("Warnings ({warnings}):").yellow().bold())?;
            for diagnostic in &self.report.tree_diagnostics {
                writeln!(w, "  - {diagnostic}")?;
            }
            for module in &self.report.modules {
                for diagnostic in &module.diagnostics {
                    writeln!(w, "  - [{}] {diagnostic}", module.name)?;
                }
            }
        }

        Ok(())
    }
}
