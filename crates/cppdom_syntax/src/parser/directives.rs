/// Preprocessor directive handling.
///
/// Directives are not expanded. `#include` becomes an inclusion marker pair and `#define NAME` a macro marker;
/// every other directive is dropped.
impl<'a, C: ParserCallback> Parser<'a, C> {
    fn directive(&mut self) -> PResult<()> {
        let token = self.advance();
        let TokenKind::Directive { name, body } = &token.kind else {
            return Err(CompileError::syntax(format!("Expected directive, found {:?}", token.kind), token.span).into());
        };
        match name.as_str() {
            "include" | "include_next" | "import" => {
                self.callback.inclusion_begin(include_path(body))?;
                self.callback.inclusion_end()?;
            }
            "define" => match macro_name(body) {
                Some(defined) => self.callback.macro_defined(defined)?,
                None => tracing::trace!(body = %body, "#define without a macro name"),
            },
            _ => tracing::trace!(directive = %name, "directive skipped"),
        }
        Ok(())
    }
}

/// `<stdio.h>` and `"local.h"` both yield the bare path.
fn include_path(body: &str) -> &str {
    let body = body.trim();
    if let Some(rest) = body.strip_prefix('<') {
        return rest.find('>').map_or(rest, |end| &rest[..end]);
    }
    if let Some(rest) = body.strip_prefix('"') {
        return rest.find('"').map_or(rest, |end| &rest[..end]);
    }
    body
}

fn macro_name(body: &str) -> Option<&str> {
    let end = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(body.len());
    let name = &body[..end];
    let starts_like_ident = name.chars().next().is_some_and(|c| !c.is_ascii_digit());
    starts_like_ident.then_some(name)
}
