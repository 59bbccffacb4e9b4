//! Command bridge
//!
//! RUN_COMMAND hands its text to a host-registered handler. The first
//! token names the command; the remaining tokens are passed through as
//! strings without any coercion.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Host callback for a dialogue command
///
/// A returned string is appended to the line buffer.
pub type CommandHandler = Box<dyn FnMut(&[String]) -> Option<String> + Send>;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r#"(?:[^\s"']+|"[^"]*"|'[^']*'|["'])+"#).expect("command token regex must compile")
    })
}

/// Named command handlers registered by the host
#[derive(Default)]
pub struct CommandBridge {
    handlers: HashMap<String, CommandHandler>,
}

impl CommandBridge {
    /// Create an empty bridge
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a handler
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&[String]) -> Option<String> + Send + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Remove a handler, returning whether one was registered
    pub fn unregister(&mut self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// Check whether a handler is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Invoke a handler; `None` when no handler is registered under `name`
    pub(crate) fn invoke(&mut self, name: &str, args: &[String]) -> Option<Option<String>> {
        self.handlers.get_mut(name).map(|handler| handler(args))
    }

    /// Split command text into tokens
    ///
    /// Whitespace separates tokens except inside single or double quotes.
    /// One layer of matching surrounding quotes is removed from each token.
    ///
    /// ```
    /// use interpreter::CommandBridge;
    ///
    /// let tokens = CommandBridge::tokenize(r#"walk "the dog" 'to the park'"#);
    /// assert_eq!(tokens, vec!["walk", "the dog", "to the park"]);
    /// ```
    pub fn tokenize(text: &str) -> Vec<String> {
        token_regex()
            .find_iter(text.trim())
            .map(|m| strip_quotes(m.as_str()).to_string())
            .collect()
    }
}

fn strip_quotes(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' || first == b'\'') && first == last {
            return &token[1..token.len() - 1];
        }
    }
    token
}

impl fmt::Debug for CommandBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("CommandBridge")
            .field("handlers", &names)
            .finish()
    }
}
