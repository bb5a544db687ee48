use indexmap::IndexMap;

/// Ordered header multimap.
///
/// Names keep the order in which they were first inserted and every name keeps
/// its values in insertion order, so multi-valued headers such as `Vary` reach
/// the wire exactly as configured.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<&'static str, Vec<String>>,
}

impl Headers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces every value stored under `name`.
    pub(crate) fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.entries.insert(name, vec![value.into()]);
    }

    /// Appends a value to `name`, keeping the ones already stored.
    pub(crate) fn append(&mut self, name: &'static str, value: impl Into<String>) {
        self.entries.entry(name).or_default().push(value.into());
    }

    /// First value stored under `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.get_all(name).is_empty()
    }

    /// Iterates `(name, value)` pairs, one per value, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |value| (*name, value.as_str())))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
