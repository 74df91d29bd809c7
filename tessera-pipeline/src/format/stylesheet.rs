//! Stylesheet variable renderers.

use tessera_core::{CodeBuilder, Indent, to_kebab_case};
use tessera_document::alias::display_value;

use crate::transform::Token;

fn declarations(tokens: &[Token], comment: &str, declare: impl Fn(&str, &str) -> String) -> String {
    let mut code = CodeBuilder::new(Indent::JS);
    for token in tokens {
        if let Some(text) = &token.comment {
            code.push_comment(comment, text);
        }
        code.push_line(&declare(
            &to_kebab_case(&token.name),
            &display_value(&token.value),
        ));
    }
    code.build()
}

/// `$name: value;`
pub(super) fn scss(tokens: &[Token]) -> String {
    declarations(tokens, "//", |name, value| format!("${}: {};", name, value))
}

/// `$name: value` (indented syntax, no semicolons).
pub(super) fn sass(tokens: &[Token]) -> String {
    declarations(tokens, "//", |name, value| format!("${}: {}", name, value))
}

/// `@name: value;`
pub(super) fn less(tokens: &[Token]) -> String {
    declarations(tokens, "//", |name, value| format!("@{}: {};", name, value))
}

/// `:root { --name: value; }`
pub(super) fn custom_properties(tokens: &[Token]) -> String {
    let mut code = CodeBuilder::new(Indent::JS);
    code.push_line(":root {").push_indent();
    for token in tokens {
        if let Some(text) = &token.comment {
            code.push_line(&format!("/* {} */", text.replace("*/", "* /")));
        }
        code.push_line(&format!(
            "--{}: {};",
            to_kebab_case(&token.name),
            display_value(&token.value)
        ));
    }
    code.push_dedent().push_line("}");
    code.build()
}
