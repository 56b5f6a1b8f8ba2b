//! General-purpose interpreters: Python, Node.js, Ruby, Perl.
//!
//! All four quote paths as single-quoted literals with backslash escapes and
//! embed content in the literal form that round-trips bytes most directly.
//! Ruby and Perl cannot carry a raw CR in a literal; see
//! [`single_quoted_concat`].

use crate::domain::encoding::{
    escape_python, escape_template_literal, quote_single, single_quoted_concat,
};

use super::ScriptSyntax;

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonSyntax;

impl ScriptSyntax for PythonSyntax {
    fn create_directory(&self, path: &str) -> String {
        format!("os.makedirs({}, exist_ok=True)", quote_single(path))
    }

    fn create_empty_file(&self, path: &str) -> String {
        format!("open({}, 'w').close()", quote_single(path))
    }

    fn write_content(&self, path: &str, content: &str) -> Vec<String> {
        vec![
            format!(
                "with open({}, 'w', encoding='utf-8', newline='') as f:",
                quote_single(path)
            ),
            format!("    f.write('''{}''')", escape_python(content)),
        ]
    }

    fn completion(&self, message: &str) -> String {
        format!("print({})", quote_single(message))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NodeSyntax;

impl ScriptSyntax for NodeSyntax {
    fn create_directory(&self, path: &str) -> String {
        format!("fs.mkdirSync({}, {{ recursive: true }});", quote_single(path))
    }

    fn create_empty_file(&self, path: &str) -> String {
        format!("fs.writeFileSync({}, '');", quote_single(path))
    }

    fn write_content(&self, path: &str, content: &str) -> Vec<String> {
        vec![format!(
            "fs.writeFileSync({}, `{}`, 'utf8');",
            quote_single(path),
            escape_template_literal(content)
        )]
    }

    fn completion(&self, message: &str) -> String {
        format!("console.log({});", quote_single(message))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RubySyntax;

impl ScriptSyntax for RubySyntax {
    fn create_directory(&self, path: &str) -> String {
        format!("FileUtils.mkdir_p({})", quote_single(path))
    }

    fn create_empty_file(&self, path: &str) -> String {
        format!("FileUtils.touch({})", quote_single(path))
    }

    fn write_content(&self, path: &str, content: &str) -> Vec<String> {
        vec![format!(
            "File.binwrite({}, {})",
            quote_single(path),
            single_quoted_concat(content, "+")
        )]
    }

    fn completion(&self, message: &str) -> String {
        format!("puts {}", quote_single(message))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PerlSyntax;

impl ScriptSyntax for PerlSyntax {
    fn create_directory(&self, path: &str) -> String {
        format!("make_path({});", quote_single(path))
    }

    fn create_empty_file(&self, path: &str) -> String {
        format!(
            "{{ open(my $fh, '>', {}) or die \"Cannot create file: $!\"; close($fh); }}",
            quote_single(path)
        )
    }

    fn write_content(&self, path: &str, content: &str) -> Vec<String> {
        vec![format!(
            "{{ open(my $fh, '>:raw', {}) or die \"Cannot write file: $!\"; print $fh {}; close($fh); }}",
            quote_single(path),
            single_quoted_concat(content, ".")
        )]
    }

    fn completion(&self, message: &str) -> String {
        format!("print {}, \"\\n\";", quote_single(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_writes_with_triple_quotes() {
        let lines = PythonSyntax.write_content("pkg/it's.py", "x = 'a'\r\n");
        assert_eq!(
            lines,
            vec![
                "with open('pkg/it\\'s.py', 'w', encoding='utf-8', newline='') as f:",
                "    f.write('''x = \\'a\\'\\r\n''')",
            ]
        );
    }

    #[test]
    fn node_escapes_template_literal_triggers() {
        let lines = NodeSyntax.write_content("a.js", "const s = `${x}`;\n");
        assert_eq!(
            lines,
            vec!["fs.writeFileSync('a.js', `const s = \\`\\${x}\\`;\n`, 'utf8');"]
        );
    }

    #[test]
    fn ruby_and_perl_share_single_quote_rules() {
        assert_eq!(
            RubySyntax.write_content("a.rb", "puts 'hi' \\ \n"),
            vec!["File.binwrite('a.rb', 'puts \\'hi\\' \\\\ \n')"]
        );
        assert!(PerlSyntax.write_content("a.pl", "'")[0].contains("print $fh '\\''"));
    }

    #[test]
    fn ruby_and_perl_splice_carriage_returns() {
        assert_eq!(
            RubySyntax.write_content("w.txt", "a\r\n"),
            vec!["File.binwrite('w.txt', 'a' + \"\\r\" + '\n')"]
        );
        let perl = &PerlSyntax.write_content("w.txt", "a\r\nb")[0];
        assert!(perl.contains("print $fh 'a' . \"\\r\" . '\nb';"), "{perl}");
        assert!(!perl.contains('\r'));
    }

    #[test]
    fn directories_are_created_recursively() {
        assert_eq!(
            PythonSyntax.create_directory("a/b"),
            "os.makedirs('a/b', exist_ok=True)"
        );
        assert_eq!(
            NodeSyntax.create_directory("a/b"),
            "fs.mkdirSync('a/b', { recursive: true });"
        );
        assert_eq!(RubySyntax.create_directory("a/b"), "FileUtils.mkdir_p('a/b')");
        assert_eq!(PerlSyntax.create_directory("a/b"), "make_path('a/b');");
    }
}
