//! Append-only warning sink threaded through every pipeline stage.

use std::fmt;

/// A single non-fatal problem found during a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Warning(String);

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Warning> for String {
    fn from(w: Warning) -> Self {
        w.0
    }
}

/// Ordered accumulator of warnings for one run.
///
/// Stages receive `&mut Warnings` rather than sharing a list; nested stages
/// may collect into their own sink and [`extend`](Self::extend) the parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    items: Vec<Warning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and mirror it to the log.
    pub fn push(&mut self, warning: impl Into<Warning>) {
        let warning = warning.into();
        tracing::warn!(warning = %warning, "Generation warning");
        self.items.push(warning);
    }

    /// Move every warning from `other` into this sink, keeping order.
    pub fn extend(&mut self, other: Warnings) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.items.iter()
    }

    /// Whether any warning contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.items.iter().any(|w| w.0.contains(needle))
    }

    /// Consume the sink into plain message strings.
    pub fn into_messages(self) -> Vec<String> {
        self.items.into_iter().map(String::from).collect()
    }
}

impl From<String> for Warning {
    fn from(message: String) -> Self {
        Warning(message)
    }
}

impl From<&str> for Warning {
    fn from(message: &str) -> Self {
        Warning(message.to_string())
    }
}
