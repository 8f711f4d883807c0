//! Layering guardrails for the workspace crates.
//!
//! `cppdom_core` holds vocabulary only and must not depend on the frontend; `cppdom_syntax` must not depend on the
//! CLI crate or its argument parser. These tests scan the member manifests' `[dependencies]` tables.

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_workspace_dependencies() {
    let deps = dependency_names(include_str!("../crates/cppdom_core/Cargo.toml"));
    for forbidden in ["cppdom_syntax", "cppdom"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{forbidden}` must not appear in cppdom_core's [dependencies]"
        );
    }
}

#[test]
fn syntax_does_not_depend_on_the_cli() {
    let deps = dependency_names(include_str!("../crates/cppdom_syntax/Cargo.toml"));
    assert!(deps.iter().any(|d| d == "cppdom_core"));
    for forbidden in ["cppdom", "clap", "tracing-subscriber"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{forbidden}` must not appear in cppdom_syntax's [dependencies]"
        );
    }
}
