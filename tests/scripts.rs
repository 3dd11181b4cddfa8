use std::fs;

use kode::run_source;
use walkdir::WalkDir;

#[test]
fn sample_scripts_run_clean() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| {
                                         e.path().extension().is_some_and(|ext| ext == "kd")
                                     })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run_source(&source) {
            panic!("Script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No sample scripts found in tests/scripts");
}
