//! Canonical module ids and import-path resolution (§4.8 step 2, §6.3).
//!
//! A module id is `src/…` or `stdlib/…` with `/` separators, computed by
//! stripping the owning root and the `.ideo` extension from a file's path.
//! Files outside both roots use their absolute path as their id. The same
//! scheme, run in reverse, turns an `i src⋅foo⋅bar` import into a file path.

use std::path::{Path, PathBuf};

use ideo_ir::{Name, StringInterner};

pub const SOURCE_EXTENSION: &str = "ideo";

/// Compute the canonical id of a file given the roots it might live under.
pub fn module_id_for_path(
    interner: &mut StringInterner,
    path: &Path,
    project_root: &Path,
    src_dir: &str,
    stdlib_root: &Path,
) -> Name {
    let src_root = project_root.join(src_dir);
    if let Some(rel) = relative_without_extension(path, &src_root) {
        return interner.intern(&format!("src/{rel}"));
    }
    if let Some(rel) = relative_without_extension(path, stdlib_root) {
        return interner.intern(&format!("stdlib/{rel}"));
    }
    interner.intern(&path.display().to_string())
}

fn relative_without_extension(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = rel.with_extension("");
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    Some(joined)
}

/// Turn an `i src⋅foo⋅bar` / `i stdlib⋅foo⋅bar` import's segments into the
/// file it names, or `None` if the first segment is neither `src` nor
/// `stdlib`.
pub fn resolve_import_path(
    interner: &StringInterner,
    segments: &[Name],
    project_root: &Path,
    src_dir: &str,
    stdlib_root: &Path,
) -> Option<PathBuf> {
    let (root, rest) = segments.split_first()?;
    let base = match interner.resolve(*root) {
        "src" => project_root.join(src_dir),
        "stdlib" => stdlib_root.to_path_buf(),
        _ => return None,
    };
    if rest.is_empty() {
        return None;
    }
    let mut path = base;
    for segment in rest {
        path.push(interner.resolve(*segment));
    }
    path.set_extension(SOURCE_EXTENSION);
    Some(path)
}

/// Join an import's segments with `/`, the same separator
/// [`module_id_for_path`] uses, so the two agree on the id of the same file.
pub fn module_id_for_segments(interner: &mut StringInterner, segments: &[Name]) -> Name {
    let joined = segments.iter().map(|s| interner.resolve(*s).to_string()).collect::<Vec<_>>().join("/");
    interner.intern(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_under_src_yields_src_prefixed_id() {
        let mut interner = StringInterner::new();
        let project_root = Path::new("/proj");
        let stdlib_root = Path::new("/opt/ideo-stdlib");
        let path = Path::new("/proj/src/foo/bar.ideo");
        let id = module_id_for_path(&mut interner, path, project_root, "src", stdlib_root);
        assert_eq!(interner.resolve(id), "src/foo/bar");
    }

    #[test]
    fn path_under_stdlib_yields_stdlib_prefixed_id() {
        let mut interner = StringInterner::new();
        let project_root = Path::new("/proj");
        let stdlib_root = Path::new("/opt/ideo-stdlib");
        let path = Path::new("/opt/ideo-stdlib/list.ideo");
        let id = module_id_for_path(&mut interner, path, project_root, "src", stdlib_root);
        assert_eq!(interner.resolve(id), "stdlib/list");
    }

    #[test]
    fn path_outside_both_roots_uses_its_absolute_path() {
        let mut interner = StringInterner::new();
        let project_root = Path::new("/proj");
        let stdlib_root = Path::new("/opt/ideo-stdlib");
        let path = Path::new("/elsewhere/scratch.ideo");
        let id = module_id_for_path(&mut interner, path, project_root, "src", stdlib_root);
        assert_eq!(interner.resolve(id), "/elsewhere/scratch.ideo");
    }

    #[test]
    fn import_segments_resolve_to_the_matching_path() {
        let mut interner = StringInterner::new();
        let src = interner.intern("src");
        let foo = interner.intern("foo");
        let bar = interner.intern("bar");
        let project_root = Path::new("/proj");
        let stdlib_root = Path::new("/opt/ideo-stdlib");
        let resolved = resolve_import_path(&interner, &[src, foo, bar], project_root, "src", stdlib_root)
            .expect("src import should resolve");
        assert_eq!(resolved, Path::new("/proj/src/foo/bar.ideo"));
    }

    #[test]
    fn import_and_path_ids_agree_for_the_same_file() {
        let mut interner = StringInterner::new();
        let src = interner.intern("src");
        let foo = interner.intern("foo");
        let bar = interner.intern("bar");
        let project_root = Path::new("/proj");
        let stdlib_root = Path::new("/opt/ideo-stdlib");
        let resolved = resolve_import_path(&interner, &[src, foo, bar], project_root, "src", stdlib_root).unwrap();
        let from_path = module_id_for_path(&mut interner, &resolved, project_root, "src", stdlib_root);
        let from_segments = module_id_for_segments(&mut interner, &[src, foo, bar]);
        assert_eq!(from_path, from_segments);
    }
}
