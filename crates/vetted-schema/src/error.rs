use serde::Serialize;
use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Registration errors grouped by route (record path, then field). Messages
/// at a node belong to that route; children nest below it.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ErrorTree {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Add a message at this level.
    pub fn add(&mut self, err: impl ToString) {
        self.messages.push(err.to_string());
    }

    /// Add a message under a child route.
    pub fn addf(&mut self, route: impl Into<String>, err: impl ToString) {
        self.child(route).add(err);
    }

    /// Merge another tree into this level.
    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.child(route).merge(child);
        }
    }

    /// Merge another tree under a route given as `a.b.c`; an empty route
    /// merges at this level.
    pub fn merge_at(&mut self, route: &str, other: Self) {
        let mut node = self;
        for segment in route.split('.').filter(|s| !s.is_empty()) {
            node = node.child(segment);
        }
        node.merge(other);
    }

    fn child(&mut self, route: impl Into<String>) -> &mut Self {
        self.children.entry(route.into()).or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Number of messages in the whole tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Every message with its full route.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for msg in &self.messages {
            out.push((prefix.to_string(), msg.clone()));
        }
        for (route, child) in &self.children {
            let route = if prefix.is_empty() {
                route.clone()
            } else {
                format!("{prefix}.{route}")
            };
            child.flatten_into(&route, out);
        }
    }

    /// Messages recorded under `route` and below.
    #[must_use]
    pub fn messages_at(&self, route: &str) -> Vec<String> {
        self.flatten()
            .into_iter()
            .filter(|(r, _)| r == route || r.starts_with(&format!("{route}.")))
            .map(|(_, msg)| msg)
            .collect()
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (route, msg)) in self.flatten().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            if route.is_empty() {
                write!(f, "{msg}")?;
            } else {
                write!(f, "{route}: {msg}")?;
            }
        }

        Ok(())
    }
}

/// Add a formatted message to an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

///
/// TESTS
///
