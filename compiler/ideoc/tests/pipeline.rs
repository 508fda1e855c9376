//! End-to-end tests driving the command surface against small on-disk
//! projects, the same scratch-directory style `ideo_module`'s own tests use.

use std::fs;
use std::path::PathBuf;

fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ideoc_pipeline_{label}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(dir.join("src")).expect("create src dir");
    dir
}

#[test]
fn compile_emits_both_modules_with_the_export_crossing_the_boundary() {
    let dir = scratch_dir("cross_module");
    fs::write(dir.join("ideo.toml"), "name = \"cross_module\"\n").expect("write project marker");
    fs::write(dir.join("src").join("helper.ideo"), "export c answer=(42 : ℤ);\n").expect("write helper.ideo");
    let main_path = dir.join("src").join("main.ideo");
    fs::write(&main_path, "i src⋅helper;\nλmain()→𝕌≡();\n").expect("write main.ideo");

    let envelope = ideoc::commands::compile::run(&main_path);
    assert!(envelope.ok, "expected a clean compile: {:?}", envelope.error);
    let data = envelope.data.expect("ok envelope carries data");

    assert_eq!(data.outputs.all_modules.len(), 2);
    let helper_output = data.outputs.all_modules.iter().find(|m| m.module_id == "src/helper").expect("helper module emitted");
    let helper_source = fs::read_to_string(&helper_output.output_file).expect("helper output written");
    assert!(helper_source.contains("export const answer = 42;"), "helper's exported const should cross the module boundary: {helper_source}");

    fs::remove_dir_all(&dir).expect("cleanup temp dir");
}

#[test]
fn run_emits_a_stub_that_imports_and_awaits_main() {
    let dir = scratch_dir("runnable");
    fs::write(dir.join("ideo.toml"), "name = \"runnable\"\n").expect("write project marker");
    let main_path = dir.join("src").join("main.ideo");
    fs::write(&main_path, "λmain()→𝕌≡();\n").expect("write main.ideo");

    let envelope = ideoc::commands::run::run(&main_path);
    assert!(envelope.ok, "expected a clean compile: {:?}", envelope.error);
    let data = envelope.data.expect("ok envelope carries data");

    let stub = fs::read_to_string(&data.runner_file).expect("runner stub written");
    assert!(stub.contains("import { main } from \"./src/main.mjs\";"));
    assert!(stub.contains("await main();"));

    let main_output = fs::read_to_string(&data.outputs.root_ts).expect("entry module written");
    assert!(main_output.contains("export async function main()"), "main should always be exported: {main_output}");

    fs::remove_dir_all(&dir).expect("cleanup temp dir");
}

#[test]
fn test_command_discovers_every_file_under_tests_dir() {
    let dir = scratch_dir("test_discovery");
    fs::write(dir.join("ideo.toml"), "name = \"discovery\"\n").expect("write project marker");
    fs::create_dir_all(dir.join("tests").join("nested")).expect("create nested tests dir");
    fs::write(dir.join("tests").join("a.ideo"), "λmain()→𝕌≡();\n").expect("write a.ideo");
    fs::write(dir.join("tests").join("nested").join("b.ideo"), "λmain()→𝕌≡();\n").expect("write b.ideo");

    let envelope = ideoc::commands::test_all::run(&dir.join("tests").join("a.ideo"));
    assert!(envelope.ok, "expected both test files to compile: {:?}", envelope.error);
    let data = envelope.data.expect("ok envelope carries data");
    assert_eq!(data.runnable_modules.len(), 2);

    fs::remove_dir_all(&dir).expect("cleanup temp dir");
}
