//! Import lowering (§4.9 Import lowering, §6.6 Generated output layout).
//!
//! A module id already *is* its generated path relative to `outDir`
//! (`src/foo/bar`, `stdlib/foo/bar`), so the specifier one generated module
//! uses to import another is a pure function of the two ids — no
//! filesystem access, which keeps it as deterministic as every other part
//! of this crate.

/// The relative ES module specifier `from_id`'s generated file would use to
/// import `to_id`'s generated file, both understood as `.mjs` files rooted
/// at the same `outDir`.
#[must_use]
pub(crate) fn relative_specifier(from_id: &str, to_id: &str) -> String {
    let from_segments: Vec<&str> = from_id.split('/').collect();
    let to_segments: Vec<&str> = to_id.split('/').collect();
    let from_dir = &from_segments[..from_segments.len().saturating_sub(1)];
    let to_dir = &to_segments[..to_segments.len().saturating_sub(1)];

    let common = from_dir.iter().zip(to_dir.iter()).take_while(|(a, b)| a == b).count();
    let ups = from_dir.len() - common;

    let mut parts: Vec<String> = vec!["..".to_owned(); ups];
    parts.extend(to_segments[common..].iter().map(|s| (*s).to_owned()));

    let joined = parts.join("/");
    if ups == 0 {
        format!("./{joined}.mjs")
    } else {
        format!("{joined}.mjs")
    }
}

/// An extern's declared path is an escape hatch to a host module outside
/// the generated graph entirely (§6.3: "the compiler does not validate the
/// existence of the foreign module's members"); it is emitted as a bare
/// specifier, left to the host runtime's own module resolution, never
/// rewritten to a relative path or given the `.mjs` suffix the generator
/// controls for its own modules.
#[must_use]
pub(crate) fn extern_specifier(path: &str) -> String {
    path.to_owned()
}
