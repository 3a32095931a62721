//! Named placeholder allocation and binding storage.
//!
//! Every value that flows through a condition chain or a prepared SET/VALUES
//! clause is spliced into the statement text as a token (`:users_age`), never
//! as the literal itself. The token map lives here: an insertion-ordered list
//! of `(token, value)` pairs where `None` marks a token that still awaits a
//! value from [`get_all`](crate::statement::SqlStatement::get_all).

/// Marker character prefixed to every placeholder token.
pub const PLACEHOLDER_MARK: char = ':';

/// Insertion-ordered map from placeholder token to its bound value.
#[derive(Clone, Debug, Default)]
pub struct Placeholders {
    entries: Vec<(String, Option<String>)>,
}

impl Placeholders {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Allocate a unique token for `column` and store `value` under it.
    ///
    /// The column is normalized (`.` becomes `_`, marker prefix) and when the
    /// base name is already taken, optionally with a numeric suffix, the new
    /// token gets `count + 1` appended. Tokens are unique within one map.
    pub fn allocate(&mut self, column: &str, value: Option<String>) -> String {
        let base = format!("{}{}", PLACEHOLDER_MARK, column.replace('.', "_"));

        let taken = self
            .entries
            .iter()
            .filter(|(name, _)| matches_base(name, &base))
            .count();

        let token = if taken > 0 {
            format!("{}{}", base, taken + 1)
        } else {
            base
        };

        self.entries.push((token.clone(), value));
        token
    }

    /// Bound value stored under `token`, if any.
    pub fn value(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == token)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Whether `token` exists in the map, bound or not.
    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == token)
    }

    /// Iterate over `(token, value)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Number of tokens in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tokens that still have no bound value.
    pub fn unbound_count(&self) -> usize {
        self.entries.iter().filter(|(_, value)| value.is_none()).count()
    }

    /// First unbound token in allocation order.
    pub fn first_unbound(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, value)| value.is_none())
            .map(|(name, _)| name.as_str())
    }

    /// Bind `values` to the unbound tokens in allocation order.
    ///
    /// Returns `false` and leaves the map untouched when the count does not
    /// match the number of unbound tokens.
    pub fn bind_all(&mut self, values: &[&str]) -> bool {
        if values.len() != self.unbound_count() {
            return false;
        }

        let mut values = values.iter();
        for (_, slot) in self.entries.iter_mut() {
            if slot.is_none() {
                if let Some(value) = values.next() {
                    *slot = Some((*value).to_string());
                }
            }
        }
        true
    }

    /// Substitute every bound token in `text`, longest token first.
    ///
    /// Longest-first ordering is a correctness requirement: a token that is a
    /// prefix of another (`:id` vs `:id2`) must not clobber the longer one.
    /// Each token is replaced at most once.
    pub fn substitute(&self, text: &str) -> String {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[b].0.len().cmp(&self.entries[a].0.len()));

        let mut out = text.to_string();
        for index in order {
            let (token, value) = &self.entries[index];
            if let Some(value) = value {
                out = out.replacen(token.as_str(), value, 1);
            }
        }
        out
    }
}

// `name` is `base` itself or `base` followed by digits only.
fn matches_base(name: &str, base: &str) -> bool {
    match name.strip_prefix(base) {
        Some(suffix) => suffix.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}
