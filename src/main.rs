mod cli;

use anyhow::{bail, Result};
use clap::Parser;

use cli::Cli;
use portcheck::loader::PackageManifest;
use portcheck::{analyze_package, ApiProfile};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if !cli.package.exists() {
        bail!(
            "\"{}\" package path should exist, use \"package\" option to specify a package path",
            cli.package.display()
        );
    }
    let entry_path = cli.package.join(&cli.main);
    if !entry_path.exists() {
        bail!(
            "\"{}\" package entry module path should exist, use \"main\" option to specify a package relative path",
            entry_path.display()
        );
    }
    let manifest_path = cli.package.join(&cli.config);
    if !manifest_path.exists() {
        bail!(
            "\"{}\" manifest path should exist, use \"config\" option to specify a package relative path",
            manifest_path.display()
        );
    }
    let manifest = PackageManifest::from_file(&manifest_path)?;
    if let Some(name) = manifest.package_name() {
        eprintln!("analyzing {name} ({})", cli.package.display());
    }

    let profile = ApiProfile::default();
    let report = analyze_package(&cli.package, &cli.main, &profile)?;
    report.emit(&profile.source_namespace, &mut std::io::stdout().lock())?;
    Ok(())
}
