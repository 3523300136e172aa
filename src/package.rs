//! Zip packaging of a generated project directory.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

/// What was written to a project archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    /// Path of the archive
    pub archive: PathBuf,
    /// Number of file entries
    pub files: usize,
    /// Number of directory entries
    pub directories: usize,
    /// Total uncompressed size of the files in bytes
    pub bytes: u64,
}

/// Archive every file and directory under `root` into `archive`.
///
/// Entry names are relative to `root` with `/` separators and are added in
/// sorted order. Directories get their own entries so empty ones survive
/// extraction. An archive located inside `root` is not added to itself.
pub fn package_directory(root: &Path, archive: &Path) -> Result<PackageSummary> {
    if !root.is_dir() {
        return Err(Error::Package(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    if let Some(parent) = archive.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(archive)?;
    let archive_path = fs::canonicalize(archive)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut summary = PackageSummary {
        archive: archive.to_path_buf(),
        files: 0,
        directories: 0,
        bytes: 0,
    };

    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        let name = entry_name(root, entry.path())?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            zip.add_directory(format!("{}/", name), options)?;
            summary.directories += 1;
        } else if file_type.is_file() {
            if fs::canonicalize(entry.path())? == archive_path {
                log::debug!("Not adding archive {} to itself", name);
                continue;
            }
            zip.start_file(name, options)?;
            let mut source = File::open(entry.path())?;
            summary.bytes += io::copy(&mut source, &mut zip)?;
            summary.files += 1;
        } else {
            log::warn!("Skipping {} (not a regular file or directory)", name);
        }
    }

    zip.finish()?;
    log::info!(
        "Packaged {} files and {} directories into {}",
        summary.files,
        summary.directories,
        archive.display()
    );
    Ok(summary)
}

fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| Error::Package(format!("{}: {}", path.display(), e)))?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn entry_names(archive: &Path) -> Vec<String> {
        let zip = ZipArchive::new(File::open(archive).unwrap()).unwrap();
        zip.file_names().map(str::to_string).collect()
    }

    #[test]
    fn test_package_keeps_empty_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("latex");
        fs::create_dir_all(root.join("images")).unwrap();
        fs::write(root.join("document.tex"), "\\documentclass{article}").unwrap();

        let archive = dir.path().join("latex_project.zip");
        let summary = package_directory(&root, &archive).unwrap();
        assert_eq!(summary.files, 1);
        assert_eq!(summary.directories, 1);

        let mut names = entry_names(&archive);
        names.sort();
        assert_eq!(names, vec!["document.tex", "images/"]);
    }

    #[test]
    fn test_package_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("latex");
        fs::create_dir_all(root.join("images")).unwrap();
        fs::write(root.join("document.tex"), "body").unwrap();
        fs::write(root.join("images").join("image0.png"), [0x89, b'P', b'N', b'G']).unwrap();

        let archive = dir.path().join("out.zip");
        package_directory(&root, &archive).unwrap();

        let mut zip = ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut content = Vec::new();
        zip.by_name("images/image0.png")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_archive_inside_root_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let archive = dir.path().join("self.zip");

        let summary = package_directory(dir.path(), &archive).unwrap();
        assert_eq!(summary.files, 1);
        assert_eq!(entry_names(&archive), vec!["a.txt"]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = package_directory(&dir.path().join("nope"), &dir.path().join("x.zip"));
        assert!(matches!(result, Err(Error::Package(_))));
    }
}
