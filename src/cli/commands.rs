//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use cppdom_syntax::ast::{BindingKind, NameSite, Scope, TranslationUnit};
use cppdom_syntax::binding::{DeclarationBinder, bind_names};
use cppdom_syntax::diagnostics::{self, FrontendError};
use cppdom_syntax::events::EventLog;
use cppdom_syntax::lexer::{self, Token};
use cppdom_syntax::{outline, parser};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// while lexing.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() == 0 {
        tracing::warn!("Source file '{}' is empty", file_path);
    }

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn frontend_failure(file_path: &str, source: &str, error: &FrontendError) -> CliError {
    CliError::failure(error.render(file_path, source).trim_end())
}

fn lex_source(file_path: &str, source: &str) -> CliResult<Vec<Token>> {
    lexer::lex(source).map_err(|errs| frontend_failure(file_path, source, &FrontendError::Lex(errs)))
}

fn build_source(file_path: &str, source: &str) -> CliResult<TranslationUnit> {
    parser::build_translation_unit(source).map_err(|e| frontend_failure(file_path, source, &e))
}

/// Lex and display tokens with their line and column.
#[tracing::instrument(skip_all, fields(file = file_path))]
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lex_source(file_path, &source)?;

    for tok in &tokens {
        let (line, col, _) = diagnostics::line_info(&source, tok.span.start);
        println!("{}:{} {:?}", line, col, tok.kind);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the event stream, without building a tree.
#[tracing::instrument(skip_all, fields(file = file_path))]
pub fn events_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lex_source(file_path, &source)?;

    let mut log = EventLog::new();
    let result = parser::parse(&tokens, &mut log);
    // Events seen before a failure are still useful for debugging the parse.
    print!("{}", log.render());
    result.map_err(|e| frontend_failure(file_path, &source, &FrontendError::from(e)))?;
    Ok(ExitCode::SUCCESS)
}

/// Build the tree and display it as an outline.
#[tracing::instrument(skip_all, fields(file = file_path))]
pub fn dump_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let unit = build_source(file_path, &source)?;
    print!("{}", outline::render(&unit));
    Ok(ExitCode::SUCCESS)
}

/// Build the tree and report its size.
#[tracing::instrument(skip_all, fields(file = file_path))]
pub fn check_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let unit = build_source(file_path, &source)?;
    println!(
        "✓ Built {}: {} top-level declaration(s), {} node(s)",
        file_path,
        unit.declarations().len(),
        unit.node_count()
    );
    Ok(ExitCode::SUCCESS)
}

/// Build the tree, run the declaration binder, and list every name with its binding.
#[tracing::instrument(skip_all, fields(file = file_path))]
pub fn bind_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let unit = build_source(file_path, &source)?;

    let report = bind_names(&unit, &mut DeclarationBinder::new()).map_err(|e| {
        let report = miette::Report::new(e).with_source_code(miette::NamedSource::new(file_path, source.clone()));
        CliError::failure(format!("{report:?}").trim_end())
    })?;

    for (site, name) in unit.names() {
        let (line, col, _) = diagnostics::line_info(&source, name.span().start);
        let binding = match name.resolve_binding() {
            Some(b) => format!("{} {}", kind_label(b.kind), b.symbol),
            None => "unresolved".to_string(),
        };
        println!("{}:{} {} {} -> {}", line, col, site_label(site), name, binding);
    }
    println!(
        "{} bound, {} unresolved, {} already bound",
        report.bound, report.unresolved, report.already_bound
    );
    Ok(ExitCode::SUCCESS)
}

fn site_label(site: NameSite) -> &'static str {
    match site {
        NameSite::ClassSpecifier(_) => "class",
        NameSite::Declarator(_) => "declarator",
        NameSite::TypeSpecifier(_) => "type",
    }
}

fn kind_label(kind: BindingKind) -> &'static str {
    match kind {
        BindingKind::Type => "type",
        BindingKind::Typedef => "typedef",
        BindingKind::Function => "function",
        BindingKind::Variable => "variable",
        BindingKind::Parameter => "parameter",
        BindingKind::Member => "member",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cppdom_cli_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn read_source_reports_missing_file() {
        let err = read_source("no/such/file.cpp").unwrap_err();
        assert!(err.message.starts_with("Cannot access file 'no/such/file.cpp'"), "{}", err.message);
    }

    #[test]
    fn commands_succeed_on_valid_source() {
        let path = scratch_file("ok.cpp", "#include <vector>\nclass Foo : public Base { int x; };\n");
        let path = path.to_string_lossy();
        assert_eq!(check_file(&path).unwrap(), ExitCode::SUCCESS);
        assert_eq!(lex_file(&path).unwrap(), ExitCode::SUCCESS);
        assert_eq!(events_file(&path).unwrap(), ExitCode::SUCCESS);
        assert_eq!(dump_file(&path).unwrap(), ExitCode::SUCCESS);
        assert_eq!(bind_file(&path).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn empty_source_is_read_and_builds() {
        let path = scratch_file("empty.h", "");
        let path = path.to_string_lossy();
        assert_eq!(read_source(&path).unwrap(), "");
        assert_eq!(check_file(&path).unwrap(), ExitCode::SUCCESS);
        assert_eq!(bind_file(&path).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn syntax_errors_are_rendered_with_the_file_name() {
        let path = scratch_file("broken.cpp", "int x\nint y;\n");
        let path = path.to_string_lossy();
        let err = dump_file(&path).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("broken.cpp"), "{}", err.message);
        assert!(err.message.contains("Expected ';' after declaration"), "{}", err.message);
    }

    #[test]
    fn lexer_errors_fail_the_event_dump() {
        let path = scratch_file("bad_char.cpp", "int @x;\n");
        let err = events_file(&path.to_string_lossy()).unwrap_err();
        assert!(err.message.contains("cppdom::lex"), "{}", err.message);
    }
}
