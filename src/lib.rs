//! Static portability analysis for plugin packages: discovers every
//! source-API symbol and command a package uses and classifies each as
//! supported or missing under the reference API's surface.

pub mod command;
pub mod index;
pub mod loader;
pub mod mapper;
pub mod oracle;
pub mod profile;
pub mod report;
pub mod tree;
pub mod walker;

pub use index::{build_reference_index, load_reference_index, SymbolIndex};
pub use mapper::{rewrite_name, Classification, RenameRule, SymbolMapper};
pub use profile::ApiProfile;
pub use report::CompatibilityReport;
pub use walker::AnalysisContext;

use std::path::Path;

use anyhow::Result;

use loader::ProgramLoader;

/// End-to-end analysis: build the reference index, load the package, walk
/// it once, and materialize the report.
pub fn analyze_package(
    package_root: &Path,
    entry: &Path,
    profile: &ApiProfile,
) -> Result<CompatibilityReport> {
    let index = load_reference_index(profile)?;
    let program = ProgramLoader::new(profile).load_package(package_root, entry)?;
    let mut context = AnalysisContext::new(profile, &index);
    context.analyze_program(&program);
    Ok(CompatibilityReport::from_context(&context))
}
