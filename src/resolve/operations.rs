//! Path resolution
//!
//! Computes the final write path and base directory for a descriptor.
//! Nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use crate::error::ResolveError;
use crate::file::FileDescriptor;
use crate::resolve::ext::rewrite_ext;
use crate::resolve::path::{has_nul, resolve_path};
use crate::resolve::{BaseSpec, DestOptions, DestSpec, ResolvedTarget, WriteFlag};

/// Resolves where `file` should be written.
///
/// `process_cwd` stands in for the process working directory and is the
/// anchor for every relative option.
pub fn resolve(
    dest: &DestSpec,
    file: &FileDescriptor,
    options: &DestOptions,
    process_cwd: &Path,
) -> Result<ResolvedTarget, ResolveError> {
    let opts = match &file.options {
        Some(per_file) => options.merge(per_file),
        None => options.clone(),
    };

    let flag = WriteFlag::from_overwrite(opts.overwrite != Some(false));
    let cwd = resolve_cwd(&opts, process_cwd);

    let (base, path) = if opts.expand.unwrap_or(false) {
        expand_destination(dest, &cwd)?
    } else {
        let dest_dir = destination_dir(dest, file)?;
        let base = base_dir(opts.base.as_ref(), file, &cwd, &dest_dir, process_cwd)?;
        let relative = if opts.flatten.unwrap_or(false) {
            file.relative()
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_default()
        } else {
            file.relative().to_path_buf()
        };
        let path = resolve_path(&base, &relative);
        (base, path)
    };

    // directories keep their names; only file names carry extensions
    let path = match &opts.ext {
        Some(ext) if !file.contents.is_directory() => {
            rewrite_ext(&path, ext, opts.ext_dot.unwrap_or_default())
        }
        _ => path,
    };

    Ok(ResolvedTarget {
        cwd,
        base,
        path,
        mode: opts.mode.or_else(|| file.mode()),
        dir_mode: opts.dir_mode,
        flag,
    })
}

/// `destbase` is prepended to the configured cwd before resolution.
fn resolve_cwd(opts: &DestOptions, process_cwd: &Path) -> PathBuf {
    let cwd = opts.cwd.as_deref().unwrap_or(Path::new("."));
    match &opts.destbase {
        Some(destbase) => resolve_path(&resolve_path(process_cwd, destbase), cwd),
        None => resolve_path(process_cwd, cwd),
    }
}

fn expand_destination(dest: &DestSpec, cwd: &Path) -> Result<(PathBuf, PathBuf), ResolveError> {
    let DestSpec::Literal(literal) = dest else {
        return Err(ResolveError::ExpandWithComputedDestination);
    };
    if has_nul(literal) {
        return Err(ResolveError::InvalidDestination(
            literal.to_string_lossy().into_owned(),
        ));
    }

    let path = resolve_path(cwd, literal);
    let base = path.parent().map_or_else(|| path.clone(), Path::to_path_buf);
    Ok((base, path))
}

fn destination_dir(dest: &DestSpec, file: &FileDescriptor) -> Result<PathBuf, ResolveError> {
    let dir = match dest {
        DestSpec::Literal(dir) => dir.clone(),
        DestSpec::Computed(f) => PathBuf::from(f(file)),
    };
    if has_nul(&dir) {
        return Err(ResolveError::InvalidDestination(
            dir.to_string_lossy().into_owned(),
        ));
    }
    Ok(dir)
}

/// An explicit base is anchored at the process directory, not at `cwd`.
fn base_dir(
    base: Option<&BaseSpec>,
    file: &FileDescriptor,
    cwd: &Path,
    dest_dir: &Path,
    process_cwd: &Path,
) -> Result<PathBuf, ResolveError> {
    let base = match base {
        None => return Ok(resolve_path(cwd, dest_dir)),
        Some(BaseSpec::Literal(base)) => base.clone(),
        Some(BaseSpec::Computed(f)) => PathBuf::from(f(file)),
    };
    if has_nul(&base) {
        return Err(ResolveError::InvalidBase(
            base.to_string_lossy().into_owned(),
        ));
    }
    Ok(resolve_path(process_cwd, &base))
}
