//! Entity id generation

use uuid::Uuid;

/// Source of ids for newly added entities
pub trait IdGenerator {
    /// Produce the next id; ids are never reused by one generator
    fn next_id(&mut self) -> String;
}

/// Deterministic `<prefix><n>` ids starting at 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Counter producing `<prefix>1`, `<prefix>2`, ...
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Random UUID v4 ids in simple (unhyphenated) form
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("t");
        assert_eq!(ids.next_id(), "t1");
        assert_eq!(ids.next_id(), "t2");
        assert_eq!(SequentialIds::default().next_id(), "id1");
    }

    #[test]
    fn test_random_ids_are_distinct() {
        let mut ids = RandomIds;
        let first = ids.next_id();
        assert_eq!(first.len(), 32);
        assert_ne!(first, ids.next_id());
    }
}
