//! Publishing the finished document.

use std::{
    ffi::OsString,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Writes `contents` to `path` through a temporary sibling file and a rename,
/// creating missing parent directories first.
///
/// Readers of `path` observe either the previous file or the complete new
/// one, never a partial write.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let staging = staging_path(path);
    fs::write(&staging, contents)
        .with_context(|| format!("failed to write {}", staging.display()))?;
    if let Err(error) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(error)
            .with_context(|| format!("failed to move document into {}", path.display()));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Appends `key=value` to a GitHub Actions output file.
pub(crate) fn append_step_output(output_file: &Path, key: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_file)
        .with_context(|| format!("failed to open step output file {}", output_file.display()))?;
    writeln!(file, "{key}={value}").with_context(|| {
        format!(
            "failed to append to step output file {}",
            output_file.display()
        )
    })
}
