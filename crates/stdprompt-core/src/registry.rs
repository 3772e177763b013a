//! Ownership Registry.
//!
//! Append-only record of every [`Line`] a session handed out. The registry
//! keeps one handle per line so that nothing is released until
//! [`LineRegistry::release`] runs, however callers treat their own handles.

use crate::error::ReadError;
use crate::stdio::Line;

/// Most entries the registry storage can address.
pub const MAX_ENTRIES: usize = isize::MAX as usize / std::mem::size_of::<Line>();

/// What a release freed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Lines released.
    pub lines: usize,
    /// Content bytes of those lines, terminators and NULs excluded.
    pub bytes: usize,
}

/// Append-only line ledger.
#[derive(Debug)]
pub struct LineRegistry {
    lines: Vec<Line>,
    bytes: usize,
    limit: usize,
}

impl Default for LineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LineRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(MAX_ENTRIES)
    }

    /// Create a registry that refuses entries past `limit` (at most
    /// [`MAX_ENTRIES`]).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            lines: Vec::new(),
            bytes: 0,
            limit: limit.min(MAX_ENTRIES),
        }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the cap. Lines already held stay held even past a lower cap.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.min(MAX_ENTRIES);
    }

    /// Returns true if one more entry fits.
    #[must_use]
    pub fn can_grow(&self) -> bool {
        self.lines.len() < self.limit
    }

    /// Append a line, growing storage by exactly one slot when full.
    ///
    /// On failure the registry is unchanged and `line` is dropped.
    pub fn register(&mut self, line: Line) -> Result<(), ReadError> {
        if !self.can_grow() {
            return Err(ReadError::CapacityOverflow);
        }
        self.lines.try_reserve_exact(1)?;
        self.bytes += line.len();
        self.lines.push(line);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Content bytes currently held.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.bytes
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Registered lines in read order.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Returns true if this exact buffer (not merely equal content) is held.
    #[must_use]
    pub fn contains(&self, line: &Line) -> bool {
        self.lines.iter().any(|held| Line::ptr_eq(held, line))
    }

    /// Drop every held handle and the storage itself. Idempotent.
    pub fn release(&mut self) -> ReleaseSummary {
        let summary = ReleaseSummary {
            lines: self.lines.len(),
            bytes: self.bytes,
        };
        self.lines = Vec::new();
        self.bytes = 0;
        summary
    }
}
