use crate::domain::encoding::{escape_fish_single, heredoc_delimiter, quote_fish, quote_posix};

use super::ScriptSyntax;

// ── bash / zsh ───────────────────────────────────────────────────────────────

/// Shells with quoted heredocs: bash and zsh.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeredocSyntax;

impl ScriptSyntax for HeredocSyntax {
    fn create_directory(&self, path: &str) -> String {
        format!("mkdir -p {}", quote_posix(path))
    }

    fn create_empty_file(&self, path: &str) -> String {
        format!("touch {}", quote_posix(path))
    }

    fn write_content(&self, path: &str, content: &str) -> Vec<String> {
        let target = quote_posix(path);

        // A heredoc always ends its body with a newline. Content without one
        // goes through command substitution, which strips it again.
        let (body, ends_with_newline) = match content.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (content, false),
        };
        let delimiter = heredoc_delimiter(body.split('\n'));

        let mut lines = Vec::with_capacity(body.matches('\n').count() + 4);
        if ends_with_newline {
            lines.push(format!("cat > {target} << '{delimiter}'"));
        } else {
            lines.push(format!("printf '%s' \"$(cat << '{delimiter}'"));
        }
        lines.extend(body.split('\n').map(str::to_string));
        lines.push(delimiter);
        if !ends_with_newline {
            lines.push(format!(")\" > {target}"));
        }
        lines
    }

    fn completion(&self, message: &str) -> String {
        format!("echo {}", quote_posix(message))
    }
}

// ── fish ─────────────────────────────────────────────────────────────────────

/// fish has no heredocs; content goes through one single-quoted `printf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FishSyntax;

impl ScriptSyntax for FishSyntax {
    fn create_directory(&self, path: &str) -> String {
        format!("mkdir -p {}", quote_fish(path))
    }

    fn create_empty_file(&self, path: &str) -> String {
        format!("touch {}", quote_fish(path))
    }

    fn write_content(&self, path: &str, content: &str) -> Vec<String> {
        vec![format!(
            "printf '%s' '{}' > {}",
            escape_fish_single(content),
            quote_fish(path)
        )]
    }

    fn completion(&self, message: &str) -> String {
        format!("echo {}", quote_fish(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heredoc_with_trailing_newline() {
        let lines = HeredocSyntax.write_content("src/main.sh", "echo \"$HOME\"\n");
        assert_eq!(
            lines,
            vec![
                "cat > \"src/main.sh\" << 'EOF'",
                "echo \"$HOME\"",
                "EOF",
            ]
        );
    }

    #[test]
    fn heredoc_without_trailing_newline_uses_substitution() {
        let lines = HeredocSyntax.write_content("a.txt", "x\ny");
        assert_eq!(
            lines,
            vec![
                "printf '%s' \"$(cat << 'EOF'",
                "x",
                "y",
                "EOF",
                ")\" > \"a.txt\"",
            ]
        );
    }

    #[test]
    fn heredoc_picks_a_free_delimiter() {
        let lines = HeredocSyntax.write_content("a.txt", "EOF\nEOF_1\n");
        assert_eq!(lines[0], "cat > \"a.txt\" << 'EOF_2'");
        assert_eq!(lines.last().unwrap(), "EOF_2");
    }

    #[test]
    fn heredoc_keeps_blank_lines() {
        let lines = HeredocSyntax.write_content("a.txt", "a\n\n");
        assert_eq!(lines[1..], ["a", "", "EOF"]);
    }

    #[test]
    fn posix_paths_are_double_quoted() {
        assert_eq!(
            HeredocSyntax.create_directory("my dir/$x"),
            "mkdir -p \"my dir/\\$x\""
        );
        assert_eq!(HeredocSyntax.create_empty_file("a b"), "touch \"a b\"");
    }

    #[test]
    fn fish_uses_single_quoted_printf() {
        let lines = FishSyntax.write_content("f.txt", "it's\n");
        assert_eq!(lines, vec!["printf '%s' 'it\\'s\n' > \"f.txt\""]);
    }
}
