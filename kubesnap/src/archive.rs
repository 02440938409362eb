//! Packaging of the snapshot tree into a single ZIP archive.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{ErrorKind, SnapResult, SnapshotError};
use crate::snapshot_error;

/// Builds the dated archive file name: `backup-cluster-{YYYY-MM-DD}.zip`.
pub fn archive_file_name(date: NaiveDate) -> String {
    format!("backup-cluster-{}.zip", date.format("%Y-%m-%d"))
}

/// The archive file name for the current date.
pub fn todays_archive_file_name() -> String {
    archive_file_name(chrono::Utc::now().date_naive())
}

/// Recursively packs every regular file under `source_dir` into a ZIP at
/// `output_file`, using deflate compression.
///
/// Entry names are the file paths relative to `source_dir` with forward-slash
/// separators and no leading separator. Directories are not written as entries.
/// Any error aborts archive creation; a partially written output file is left
/// in place for the caller to inspect or discard.
pub fn zip_directory(source_dir: &Path, output_file: &Path) -> SnapResult<()> {
    let file = File::create(output_file)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(source_dir) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(source_dir).map_err(|err| {
            snapshot_error!(
                ErrorKind::ArchiveFailed,
                "Archive entry is outside the source directory",
                err
            )
        })?;
        let entry_name = relative.to_string_lossy().replace('\\', "/");

        writer.start_file(entry_name, options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut writer)?;
    }

    writer.finish()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_archive_file_name_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(archive_file_name(date), "backup-cluster-2025-01-01.zip");
    }

    #[test]
    fn test_archive_file_name_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        assert_eq!(archive_file_name(date), "backup-cluster-2024-09-03.zip");
    }

    #[test]
    fn test_zip_directory_entry_names_and_content() {
        let source = tempdir().unwrap();
        std::fs::create_dir_all(source.path().join("a")).unwrap();
        std::fs::write(source.path().join("a/b.yaml"), "kind: Deployment\n").unwrap();
        std::fs::write(source.path().join("c.yaml"), "kind: Service\n").unwrap();

        let out = tempdir().unwrap();
        let archive_path = out.path().join("backup.zip");
        zip_directory(source.path(), &archive_path).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();

        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(names, vec!["a/b.yaml", "c.yaml"]);

        let mut content = String::new();
        archive
            .by_name("a/b.yaml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "kind: Deployment\n");

        content.clear();
        archive
            .by_name("c.yaml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "kind: Service\n");
    }

    #[test]
    fn test_zip_directory_skips_directory_entries() {
        let source = tempdir().unwrap();
        std::fs::create_dir_all(source.path().join("empty/nested")).unwrap();
        std::fs::write(source.path().join("empty/nested/file.yaml"), "x").unwrap();

        let out = tempdir().unwrap();
        let archive_path = out.path().join("backup.zip");
        zip_directory(source.path(), &archive_path).unwrap();

        let archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names, vec!["empty/nested/file.yaml"]);
    }

    #[test]
    fn test_missing_source_directory_fails() {
        let out = tempdir().unwrap();
        let archive_path = out.path().join("backup.zip");
        let err = zip_directory(Path::new("/nonexistent-source-dir"), &archive_path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoError);
    }
}
