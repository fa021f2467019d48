// src/core/tokenizer.rs

use crate::constants::ARGUMENT_DELIMITERS;

/// The words of one command line. The first word, if any, is the command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector {
    words: Vec<String>,
}

impl ArgumentVector {
    /// Wraps already-split words.
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// The command name, or `None` for an empty line.
    pub fn command(&self) -> Option<&str> {
        self.words.first().map(String::as_str)
    }

    /// Everything after the command name.
    pub fn args(&self) -> &[String] {
        self.words.get(1..).unwrap_or(&[])
    }

    /// All words, command name included, ready to hand to a child process.
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    /// Number of words, command name included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True for a blank line.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Splits `line` on runs of spaces, tabs and newlines.
///
/// No quoting or escaping is interpreted: `"a b"` yields the two words `"a`
/// and `b"`.
pub fn split(line: &str) -> ArgumentVector {
    ArgumentVector::new(
        line.split(ARGUMENT_DELIMITERS)
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_and_arguments() {
        let argv = split("ls -la");
        assert_eq!(argv.as_slice(), ["ls", "-la"]);
        assert_eq!(argv.command(), Some("ls"));
        assert_eq!(argv.args(), ["-la"]);
    }

    #[test]
    fn test_runs_of_mixed_whitespace_collapse() {
        let argv = split("  \tgrep\t\t-n   foo \n");
        assert_eq!(argv.as_slice(), ["grep", "-n", "foo"]);
    }

    #[test]
    fn test_blank_lines_are_empty() {
        for line in ["", "   ", "\t\n", "\n"] {
            let argv = split(line);
            assert!(argv.is_empty(), "line {:?} produced {:?}", line, argv);
            assert_eq!(argv.command(), None);
            assert!(argv.args().is_empty());
        }
    }

    #[test]
    fn test_quotes_are_not_interpreted() {
        assert_eq!(split(r#"echo "a b""#).as_slice(), ["echo", "\"a", "b\""]);
        assert_eq!(split(r"touch a\ b").as_slice(), ["touch", "a\\", "b"]);
    }

    #[test]
    fn test_rejoining_normalises_whitespace() {
        let lines = [
            "cd  /tmp",
            "\tgit   commit -m\tmsg  ",
            "single",
            " a  b   c    d ",
        ];
        for line in lines {
            let joined = split(line).as_slice().join(" ");
            assert!(!joined.starts_with(' ') && !joined.ends_with(' '));
            assert!(!joined.contains("  "));
            assert_eq!(split(&joined), split(line));
        }
    }

    #[test]
    fn test_command_only_has_no_args() {
        let argv = split("pwd");
        assert_eq!(argv.len(), 1);
        assert!(argv.args().is_empty());
    }
}
