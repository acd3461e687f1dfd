use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "portcheck",
    about = "Checks whether a vscode-API plugin package can be ported to the theia plugin API",
    version
)]
pub struct Cli {
    /// package path
    #[arg(short = 'e', long, default_value = ".")]
    pub package: PathBuf,

    /// a package relative entry module path
    #[arg(short = 'm', long, default_value = "src/lib.rs")]
    pub main: PathBuf,

    /// a package relative manifest path
    #[arg(short = 'c', long, default_value = "Cargo.toml")]
    pub config: PathBuf,
}
