//! Program loading: file discovery, parsing, lowering, and the manifest.
//!
//! The loader is the only part of the crate that touches the filesystem or
//! the parser. Everything downstream consumes [`LoadedProgram`] and the
//! per-file oracles.

pub mod decl;
mod lower;
mod scope;

pub use lower::{lower_program_source, Lowered};
pub use scope::{Binding, ScopeStack, UseMap};

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::oracle::TableOracle;
use crate::profile::ApiProfile;
use crate::tree::SourceTree;

/// One lowered source file with its oracle.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Declaration surfaces are indexed, never analyzed for usages.
    pub is_declaration: bool,
    pub tree: SourceTree,
    pub oracle: TableOracle,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedProgram {
    pub files: Vec<LoadedFile>,
}

/// Front end over a package on disk.
pub struct ProgramLoader<'a> {
    profile: &'a ApiProfile,
}

impl<'a> ProgramLoader<'a> {
    pub fn new(profile: &'a ApiProfile) -> Self {
        Self { profile }
    }

    /// Load every source file in the directory of the entry module.
    ///
    /// Files that cannot be read or parsed are skipped; the analysis runs
    /// over whatever loaded cleanly. Paths are sorted so a given package
    /// always produces the same program.
    pub fn load_package(&self, package_root: &Path, entry: &Path) -> Result<LoadedProgram> {
        let entry_path = package_root.join(entry);
        let source_dir = entry_path.parent().map(Path::to_path_buf).unwrap_or_else(|| {
            package_root.to_path_buf()
        });
        let mut files = Vec::new();
        for path in collect_source_files(&source_dir) {
            let Ok(source) = std::fs::read_to_string(&path) else {
                continue;
            };
            let Ok(lowered) = lower_program_source(&path, &source, self.profile) else {
                continue;
            };
            files.push(LoadedFile {
                path,
                is_declaration: false,
                tree: lowered.tree,
                oracle: lowered.oracle,
            });
        }
        Ok(LoadedProgram { files })
    }
}

/// Lower an API declaration surface into a declaration-tagged file.
pub fn load_declaration(
    path: impl Into<PathBuf>,
    source: &str,
    namespace: &str,
) -> Result<LoadedFile> {
    let lowered = decl::lower_declaration_source(path, source, namespace)?;
    Ok(LoadedFile {
        path: lowered.tree.file().to_path_buf(),
        is_declaration: true,
        tree: lowered.tree,
        oracle: lowered.oracle,
    })
}

/// All `.rs` files under a directory, sorted, skipping build output.
fn collect_source_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry.path()));
    for entry in walker {
        let Ok(entry) = entry else {
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) == Some("rs") {
            out.push(entry.path().to_path_buf());
        }
    }
    out.sort();
    out
}

fn is_ignored_dir(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
        matches!(name, "target" | ".git")
    } else {
        false
    }
}

/// The slice of the package manifest the tool cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    package: Option<PackageSection>,
    #[serde(default)]
    lib: Option<LibSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct PackageSection {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct LibSection {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl PackageManifest {
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ManifestError::Io { path: path.to_path_buf(), source })?;
        toml::from_str(&content)
            .map_err(|source| ManifestError::Parse { path: path.to_path_buf(), source })
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().and_then(|package| package.name.as_deref())
    }

    pub fn lib_path(&self) -> Option<&Path> {
        self.lib.as_ref().and_then(|lib| lib.path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_every_source_file_under_the_entry_directory() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/lib.rs", "pub mod util;\n");
        write(dir.path(), "src/util.rs", "pub fn helper() {}\n");
        let profile = ApiProfile::default();
        let program = ProgramLoader::new(&profile)
            .load_package(dir.path(), Path::new("src/lib.rs"))
            .unwrap();
        assert_eq!(program.files.len(), 2);
        assert!(program.files.iter().all(|file| !file.is_declaration));
    }

    #[test]
    fn file_order_is_deterministic() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/lib.rs", "");
        write(dir.path(), "src/b.rs", "");
        write(dir.path(), "src/a.rs", "");
        let profile = ApiProfile::default();
        let loader = ProgramLoader::new(&profile);
        let first: Vec<PathBuf> = loader
            .load_package(dir.path(), Path::new("src/lib.rs"))
            .unwrap()
            .files
            .into_iter()
            .map(|file| file.path)
            .collect();
        let second: Vec<PathBuf> = loader
            .load_package(dir.path(), Path::new("src/lib.rs"))
            .unwrap()
            .files
            .into_iter()
            .map(|file| file.path)
            .collect();
        assert_eq!(first, second);
        assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn unparseable_files_are_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/lib.rs", "fn ok() {}\n");
        write(dir.path(), "src/broken.rs", "fn {{{\n");
        let profile = ApiProfile::default();
        let program = ProgramLoader::new(&profile)
            .load_package(dir.path(), Path::new("src/lib.rs"))
            .unwrap();
        assert_eq!(program.files.len(), 1);
    }

    #[test]
    fn manifest_exposes_name_and_lib_path() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "Cargo.toml",
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n\n[lib]\npath = \"src/plugin.rs\"\n",
        );
        let manifest = PackageManifest::from_file(&dir.path().join("Cargo.toml")).unwrap();
        assert_eq!(manifest.package_name(), Some("demo"));
        assert_eq!(manifest.lib_path(), Some(Path::new("src/plugin.rs")));
    }

    #[test]
    fn broken_manifest_is_a_parse_error() {
        let dir = tempdir().unwrap();
        write(dir.path(), "Cargo.toml", "[package\nname =");
        let error = PackageManifest::from_file(&dir.path().join("Cargo.toml")).unwrap_err();
        assert!(matches!(error, ManifestError::Parse { .. }));
    }
}
