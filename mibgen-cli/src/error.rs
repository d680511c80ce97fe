//! CLI-specific error types and exit code mapping

use mibgen_config_generator::GeneratorError;
use mibgen_core::error::{DirectivesError, MibgenError};

/// Error returned by a `mibgen` subcommand; [`CliError::exit_code`] picks the process status.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Tool configuration or directives loading/validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file write, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Domain error: tree loading, generation or output serialisation.
    #[error("{0}")]
    Core(#[from] MibgenError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                 |
    /// |------|-------------------------|
    /// | 0    | Success                 |
    /// | 1    | General error           |
    /// | 2    | Configuration error     |
    /// | 3    | Generation error        |
    /// | 10   | IO error                |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::Core(inner) => match inner {
                MibgenError::Config(_) | MibgenError::Directives(_) => 2,
                MibgenError::Generate(_) => 3,
                MibgenError::Io(_) => 10,
                MibgenError::Tree(_) => 1,
            },
            Self::JsonSerialize(_) => 1,
        }
    }
}

impl From<DirectivesError> for CliError {
    fn from(e: DirectivesError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<GeneratorError> for CliError {
    fn from(e: GeneratorError) -> Self {
        Self::Core(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mibgen_core::error::{ConfigError, GenerateError, TreeError};

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("bad".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_generate_error() {
        let err: CliError =
            MibgenError::Generate(GenerateError::Directive("cannot find oid".to_owned())).into();
        assert_eq!(err.exit_code(), 3, "generation error should return exit code 3");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_tree_error() {
        let err: CliError = MibgenError::Tree(TreeError::LoadFailed {
            source_name: "mibs.json".to_owned(),
            reason: "eof".to_owned(),
        })
        .into();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err: CliError = MibgenError::Config(ConfigError::FileNotFound {
            path: "mibgen.toml".to_owned(),
        })
        .into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_from_directives_error_is_config() {
        let err: CliError = DirectivesError::Invalid {
            module: "if_mib".to_owned(),
            reason: "walk must contain at least one oid or label".to_owned(),
        }
        .into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("if_mib"));
    }

    #[test]
    fn test_from_generator_error() {
        let err: CliError = GeneratorError::UnknownWalkTarget {
            module: "m".to_owned(),
            target: "doesNotExist".to_owned(),
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("doesNotExist"));

        let err: CliError = GeneratorError::TreeLoad {
            source_name: "mibs.json".to_owned(),
            reason: "eof".to_owned(),
        }
        .into();
        assert!(matches!(err, CliError::Core(MibgenError::Tree(_))));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_serialize_failure_is_generation_error() {
        let err: CliError = GeneratorError::Serialize("generated config does not parse".to_owned())
            .into();
        assert!(matches!(
            err,
            CliError::Core(MibgenError::Generate(GenerateError::Serialize(_)))
        ));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1);
    }
}
