//! Region naming policy: validation and the rotating candidate pool.

use crate::error::RegionNameError;

/// Check a proposed name against the naming policy.
///
/// A valid name is non-empty, at most `max_len` characters, and made
/// only of letters and digits.
pub fn validate_region_name(name: &str, max_len: usize) -> Result<(), RegionNameError> {
    if name.is_empty() {
        return Err(RegionNameError::Empty);
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(RegionNameError::TooLong { len, max: max_len });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(RegionNameError::ContainsWhitespace);
    }
    if let Some(ch) = name.chars().find(|c| !c.is_alphanumeric()) {
        return Err(RegionNameError::InvalidCharacter { ch });
    }
    Ok(())
}

/// Rotating source of candidate names for automatic allocation.
///
/// Candidate `n` is `bases[n % len]`, with the suffix `n / len` appended
/// once the list has been used up: for `[a, b, c]` the sequence is
/// `a, b, c, a1, b1, c1, a2, ...`. Every candidate is distinct, so a
/// search that walks `n` upward always terminates.
#[derive(Clone, Debug)]
pub struct NamePool {
    bases: Vec<String>,
}

impl NamePool {
    /// Build a pool. Returns `None` if `bases` is empty.
    pub fn new(bases: Vec<String>) -> Option<Self> {
        if bases.is_empty() {
            None
        } else {
            Some(Self { bases })
        }
    }

    /// Number of base names.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Always `false`; construction rejects an empty pool.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// The `n`th candidate name.
    pub fn candidate(&self, n: usize) -> String {
        let base = &self.bases[n % self.bases.len()];
        match n / self.bases.len() {
            0 => base.clone(),
            suffix => format!("{base}{suffix}"),
        }
    }

    /// The first candidate at or after `start` that `is_taken` rejects.
    pub fn first_free(&self, start: usize, is_taken: impl Fn(&str) -> bool) -> String {
        let mut n = start;
        loop {
            let name = self.candidate(n);
            if !is_taken(&name) {
                return name;
            }
            n += 1;
        }
    }
}
