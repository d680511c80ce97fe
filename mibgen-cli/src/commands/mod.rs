//! Command handlers -- one module per subcommand

pub mod dump;
pub mod generate;
