//! Content encoding: turning arbitrary text into dialect-safe literals.
//!
//! The escape helpers here are shared by the statement builders in
//! `syntax/`. Each one is a pure string transform; the order of replacements
//! matters (the escape character itself always goes first).

use crate::domain::{
    error::DomainError,
    registry,
    value_objects::DialectId,
};

/// Default heredoc terminator; see [`heredoc_delimiter`].
pub const HEREDOC_DELIMITER: &str = "EOF";

/// Statements that write `content` to `path` in `dialect`.
///
/// `path` must already be normalized for the dialect. The returned lines are
/// joined by the assembler with the dialect's line terminator.
pub fn encode_file_write(
    path: &str,
    content: &str,
    dialect: DialectId,
) -> Result<Vec<String>, DomainError> {
    if content.contains('\0') {
        return Err(DomainError::ContentEncoding {
            path: path.to_string(),
            dialect: dialect.as_str().to_string(),
            reason: "content contains NUL bytes".into(),
        });
    }
    Ok(registry::descriptor(dialect).syntax.write_content(path, content))
}

/// Statement that creates (or truncates) an empty file.
pub fn encode_empty_file(path: &str, dialect: DialectId) -> String {
    registry::descriptor(dialect).syntax.create_empty_file(path)
}

// ── Heredoc ──────────────────────────────────────────────────────────────────

/// First of `EOF`, `EOF_1`, `EOF_2`, ... that no body line equals.
pub fn heredoc_delimiter<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let lines = lines.into_iter();
    let mut candidate = HEREDOC_DELIMITER.to_string();
    let mut n = 0;
    while lines.clone().any(|line| line == candidate) {
        n += 1;
        candidate = format!("{HEREDOC_DELIMITER}_{n}");
    }
    candidate
}

// ── Escape helpers ───────────────────────────────────────────────────────────

/// fish single-quoted strings honour only `\\` and `\'`.
pub fn escape_fish_single(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// PowerShell single-quoted strings: every quote character is doubled,
/// including the typographic ones PowerShell also accepts as delimiters.
pub fn escape_powershell_single(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}') {
            out.push(c);
        }
        out.push(c);
    }
    out
}

/// One cmd.exe `echo` argument.
///
/// `^` is escaped first so the carets added afterwards are not doubled.
pub fn escape_batch(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '^' => out.push_str("^^"),
            '&' | '<' | '>' | '|' | '"' | '(' | ')' => {
                out.push('^');
                out.push(c);
            }
            '%' => out.push_str("%%"),
            _ => out.push(c),
        }
    }
    out
}

/// Body of a Python `'''...'''` literal.
pub fn escape_python(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\r', "\\r")
}

/// Body of a JavaScript template literal.
pub fn escape_template_literal(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace('$', "\\$")
        .replace('\r', "\\r")
}

/// Ruby and Perl single-quoted strings share the same two escapes.
pub fn escape_single_backslash(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Ruby and Perl expression producing `s` exactly.
///
/// Both lexers fold a CR-LF pair inside a literal into LF, so the text is
/// split on `\r` into single-quoted pieces and every carriage return is
/// spliced back as a double-quoted `"\r"` joined with `concat` (`+` or `.`).
pub fn single_quoted_concat(s: &str, concat: &str) -> String {
    let glue = format!(" {concat} \"\\r\" {concat} ");
    s.split('\r')
        .map(|piece| format!("'{}'", escape_single_backslash(piece)))
        .collect::<Vec<_>>()
        .join(&glue)
}

/// Double-quoted POSIX shell word (bash, zsh).
pub fn quote_posix(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Double-quoted fish word; fish does not treat backticks specially.
pub fn quote_fish(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Double-quoted PowerShell string; backtick is the escape character.
pub fn quote_powershell(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '`' | '"' | '$') {
            out.push('`');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Double-quoted cmd.exe path. Quotes cannot occur in Windows file names;
/// only `%` needs doubling.
pub fn quote_batch(s: &str) -> String {
    format!("\"{}\"", s.replace('%', "%%"))
}

/// Single-quoted literal for the interpreter dialects.
pub fn quote_single(s: &str) -> String {
    format!("'{}'", escape_single_backslash(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carriage_returns_leave_the_single_quoted_literal() {
        assert_eq!(single_quoted_concat("plain", "."), "'plain'");
        assert_eq!(
            single_quoted_concat("a\r\nb\r\n", "+"),
            "'a' + \"\\r\" + '\nb' + \"\\r\" + '\n'"
        );
        assert_eq!(single_quoted_concat("\r", "."), "'' . \"\\r\" . ''");
        assert_eq!(single_quoted_concat("it's\\", "."), "'it\\'s\\\\'");
    }

    #[test]
    fn delimiter_skips_colliding_lines() {
        assert_eq!(heredoc_delimiter(["a", "b"]), "EOF");
        assert_eq!(heredoc_delimiter(["EOF"]), "EOF_1");
        assert_eq!(heredoc_delimiter(["EOF", "EOF_1", "x"]), "EOF_2");
        assert_eq!(heredoc_delimiter(["  EOF"]), "EOF");
    }

    #[test]
    fn batch_escapes_caret_first() {
        assert_eq!(escape_batch("a^b"), "a^^b");
        assert_eq!(escape_batch("echo a & b > c"), "echo a ^& b ^> c");
        assert_eq!(escape_batch("100% (sure)"), "100%% ^(sure^)");
        assert_eq!(escape_batch("$HOME \"q\""), "$HOME ^\"q^\"");
    }

    #[test]
    fn powershell_doubles_every_single_quote() {
        assert_eq!(escape_powershell_single("it's"), "it''s");
        assert_eq!(escape_powershell_single("\u{2019}"), "\u{2019}\u{2019}");
        assert_eq!(escape_powershell_single("$x `y`"), "$x `y`");
    }

    #[test]
    fn python_escapes_backslash_before_quote() {
        assert_eq!(escape_python(r"a\'b"), r"a\\\'b");
        assert_eq!(escape_python("x\r\n"), "x\\r\n");
    }

    #[test]
    fn template_literal_blocks_interpolation() {
        assert_eq!(escape_template_literal("${x} `y`"), "\\${x} \\`y\\`");
    }

    #[test]
    fn fish_only_escapes_backslash_and_quote() {
        assert_eq!(escape_fish_single(r"it's \n $x"), r"it\'s \\n $x");
    }

    #[test]
    fn posix_quote_blocks_expansion() {
        assert_eq!(quote_posix("a $b `c` \"d\""), r#""a \$b \`c\` \"d\"""#);
    }

    #[test]
    fn powershell_quote_uses_backtick() {
        assert_eq!(quote_powershell("a$b"), "\"a`$b\"");
    }

    #[test]
    fn batch_quote_doubles_percent() {
        assert_eq!(quote_batch("50%\\x"), "\"50%%\\x\"");
    }

    #[test]
    fn nul_is_rejected() {
        let err = encode_file_write("a.bin", "a\0b", DialectId::Bash).unwrap_err();
        assert!(matches!(err, DomainError::ContentEncoding { .. }));
    }
}
