//! Source post-processor
//!
//! Generated buffers are parsed with `syn` and pretty-printed with
//! `prettyplease`. Plain `//` comments are not part of the syntax tree, so the
//! leading banner is split off first and put back afterwards. Doc comments
//! (`///`, `//!`) are attributes and survive formatting on their own.

use crate::error::CodegenError;
use std::fs;
use std::path::Path;
use vimgen_core::Namespace;

/// Split `source` into its leading `//` banner and the rest
///
/// Blank lines between banner comments belong to the banner. Doc comments end
/// it.
pub fn split_banner(source: &str) -> (&str, &str) {
    let mut end = 0;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim();
        let is_banner = trimmed.is_empty()
            || (trimmed.starts_with("//")
                && !trimmed.starts_with("///")
                && !trimmed.starts_with("//!"));
        if !is_banner {
            break;
        }
        end += line.len();
    }

    source.split_at(end)
}

/// Parse and pretty-print generated source, keeping its banner
pub fn format_source(raw: &str) -> Result<String, syn::Error> {
    let (banner, body) = split_banner(raw);
    let file = syn::parse_file(body)?;
    let formatted = prettyplease::unparse(&file);

    let banner = banner.trim();
    if banner.is_empty() {
        Ok(formatted)
    } else {
        Ok(format!("{banner}\n\n{formatted}"))
    }
}

/// Write `content` through a temporary sibling file and a rename, so the
/// destination never holds a partial file
pub fn write_atomic(path: &Path, content: &str) -> Result<(), CodegenError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| CodegenError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("rs.tmp");
    fs::write(&temp_path, content).map_err(|source| CodegenError::Io {
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| CodegenError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Format `raw` and write it to `path`
///
/// When the source does not parse, the raw buffer is written instead so it
/// can be inspected, and the parse error is returned naming the namespace.
pub fn finalize(namespace: Namespace, path: &Path, raw: &str) -> Result<(), CodegenError> {
    match format_source(raw) {
        Ok(formatted) => {
            write_atomic(path, &formatted)?;
            tracing::debug!(namespace = %namespace, path = %path.display(), "Wrote formatted source");
            Ok(())
        }
        Err(source) => {
            write_atomic(path, raw)?;
            tracing::error!(
                namespace = %namespace,
                path = %path.display(),
                error = %source,
                "Generated source does not parse, wrote unformatted buffer"
            );
            Err(CodegenError::Format {
                namespace,
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
