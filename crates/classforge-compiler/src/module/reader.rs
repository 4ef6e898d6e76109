//! Module loading.

use super::writer::{compute_sha256, verify_sha256};
use super::{MANIFEST_FILE, METADATA_FILE, ModuleError, ModuleManifest, ModuleResult, SOURCE_DIR};
use crate::metadata::TypeTable;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Reader for compiled modules.
///
/// Opening a module validates the manifest and verifies the checksum of
/// every file it lists.
///
/// # Example
///
/// ```no_run
/// use classforge_compiler::module::ModuleReader;
///
/// let mut reader = ModuleReader::open("out/RpaJsonModels.dll")?;
/// for ty in reader.type_table()?.types {
///     println!("{}", ty.full_name());
/// }
/// # Ok::<(), classforge_compiler::module::ModuleError>(())
/// ```
#[derive(Debug)]
pub struct ModuleReader {
    archive: ZipArchive<File>,
    manifest: ModuleManifest,
}

impl ModuleReader {
    pub fn open<P: AsRef<Path>>(path: P) -> ModuleResult<Self> {
        let file = File::open(path.as_ref())?;
        let mut archive = ZipArchive::new(file)?;

        let manifest = {
            let mut manifest_file = archive.by_name(MANIFEST_FILE).map_err(|_| {
                ModuleError::MissingFile(format!("{MANIFEST_FILE} not found in module"))
            })?;

            let mut manifest_json = String::new();
            manifest_file.read_to_string(&mut manifest_json)?;
            ModuleManifest::from_json(&manifest_json)?
        };
        manifest.validate()?;

        let mut reader = Self { archive, manifest };
        reader.verify_checksums()?;
        Ok(reader)
    }

    fn verify_checksums(&mut self) -> ModuleResult<()> {
        let expected: Vec<(String, String)> = self
            .manifest
            .files
            .iter()
            .map(|(path, info)| (path.clone(), info.checksum.clone()))
            .collect();

        for (path, checksum) in expected {
            let contents = self.read_file(&path)?;
            if !verify_sha256(&contents, &checksum) {
                return Err(ModuleError::ChecksumMismatch {
                    path,
                    expected: checksum,
                    actual: format!("sha256:{}", compute_sha256(&contents)),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    pub fn type_table(&mut self) -> ModuleResult<TypeTable> {
        let json = self.read_file_string(METADATA_FILE)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// The first embedded source file, if the module carries one.
    pub fn embedded_source(&mut self) -> ModuleResult<Option<String>> {
        let prefix = format!("{SOURCE_DIR}/");
        let Some(path) = self.list_files().into_iter().find(|f| f.starts_with(&prefix)) else {
            return Ok(None);
        };
        self.read_file_string(&path).map(Some)
    }

    pub fn read_file(&mut self, path: &str) -> ModuleResult<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| ModuleError::MissingFile(format!("File not found in module: {path}")))?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    pub fn read_file_string(&mut self, path: &str) -> ModuleResult<String> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| ModuleError::MissingFile(format!("File not found in module: {path}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(contents)
    }

    #[must_use]
    pub fn list_files(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(String::from))
            .collect()
    }

    #[must_use]
    pub fn has_file(&self, path: &str) -> bool {
        self.archive.index_for_name(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::metadata::{MemberEntry, MemberKind, TypeEntry};
    use crate::module::ModuleWriter;
    use crate::options::CompilationOptions;
    use crate::syntax::TypeKind;
    use classforge_core::{JsonLibrary, TargetRuntime};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn table() -> TypeTable {
        TypeTable {
            types: vec![TypeEntry {
                namespace: "Models".to_string(),
                name: "Root".to_string(),
                kind: TypeKind::Class,
                type_parameters: Vec::new(),
                base_types: Vec::new(),
                members: vec![MemberEntry {
                    name: "Age".to_string(),
                    kind: MemberKind::Property,
                    type_name: Some("int".to_string()),
                    serialized_name: Some("age".to_string()),
                }],
            }],
        }
    }

    fn manifest(optimize: bool) -> ModuleManifest {
        ModuleManifest::new(
            "Models",
            "1.0.0.0",
            TargetRuntime::NetStandard21,
            JsonLibrary::SystemTextJson,
            CompilationOptions::for_optimize(optimize, false),
        )
    }

    fn create_module(temp_dir: &TempDir, with_source: bool) -> PathBuf {
        let path = temp_dir.path().join("Models.dll");
        let mut writer = ModuleWriter::new(manifest(!with_source))
            .add_metadata(&table())
            .unwrap();
        if with_source {
            writer = writer.add_source("Root.cs", "public class Root { }");
        }
        writer.write(&path).unwrap();
        path
    }

    #[test]
    fn ModuleReader___open___reads_manifest_and_types() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_module(&temp_dir, false);

        let mut reader = ModuleReader::open(&path).unwrap();

        assert_eq!(reader.manifest().assembly.name, "Models");
        assert_eq!(reader.type_table().unwrap(), table());
        assert!(reader.embedded_source().unwrap().is_none());
    }

    #[test]
    fn ModuleReader___debug_module___embedded_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_module(&temp_dir, true);

        let mut reader = ModuleReader::open(&path).unwrap();

        assert!(reader.has_file("source/Root.cs"));
        assert_eq!(
            reader.embedded_source().unwrap().as_deref(),
            Some("public class Root { }")
        );
    }

    #[test]
    fn ModuleReader___list_files___manifest_first() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_module(&temp_dir, false);

        let reader = ModuleReader::open(&path).unwrap();

        assert_eq!(reader.list_files(), vec!["manifest.json", "metadata.json"]);
    }

    #[test]
    fn ModuleReader___open___nonexistent_file___returns_error() {
        let result = ModuleReader::open("/nonexistent/Models.dll");

        assert!(matches!(result, Err(ModuleError::Io(_))));
    }

    #[test]
    fn ModuleReader___tampered_file___checksum_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tampered.dll");

        let mut manifest = manifest(true);
        manifest.add_file(METADATA_FILE, &compute_sha256(b"{\"types\":[]}"));

        let file = File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        zip.start_file(MANIFEST_FILE, options).unwrap();
        zip.write_all(manifest.to_json().unwrap().as_bytes()).unwrap();
        zip.start_file(METADATA_FILE, options).unwrap();
        zip.write_all(b"{\"types\":[{}]}").unwrap();
        zip.finish().unwrap();

        let result = ModuleReader::open(&path);

        assert!(matches!(
            result,
            Err(ModuleError::ChecksumMismatch { ref path, .. }) if path == METADATA_FILE
        ));
    }

    #[test]
    fn ModuleReader___archive_without_manifest___missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.dll");
        let file = File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file("other.txt", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"x").unwrap();
        zip.finish().unwrap();

        let result = ModuleReader::open(&path);

        assert!(matches!(result, Err(ModuleError::MissingFile(_))));
    }
}
