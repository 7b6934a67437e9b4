//! Finished statements handed to a connection.

use std::fmt;

use crate::value::Value;

/// A rendered SQL statement plus the parameters bound to it, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Command {
    text: String,
    parameters: Vec<(String, Value)>,
}

impl Command {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parameters: Vec::new(),
        }
    }

    /// Attach a named parameter. Parameters are bound positionally, in the
    /// order they were added.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &[(String, Value)] {
        &self.parameters
    }

    /// Statement text without trailing terminators or whitespace.
    pub fn trimmed(&self) -> &str {
        self.text.trim_end_matches(|c: char| c == ';' || c.is_whitespace())
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Command {
    fn from(text: &str) -> Self {
        Command::new(text)
    }
}

impl From<String> for Command {
    fn from(text: String) -> Self {
        Command::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed() {
        let cmd = Command::new("SELECT 1; \n");
        assert_eq!(cmd.trimmed(), "SELECT 1");
        assert_eq!(cmd.text(), "SELECT 1; \n");
    }

    #[test]
    fn test_parameters_keep_order() {
        let cmd = Command::new("SELECT ? + ?")
            .with_parameter("b", 2)
            .with_parameter("a", 1);
        let names: Vec<&str> = cmd.parameters().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
