// ── Editable DNS server slots ──
//
// The edit surface always shows at least one row, even when the
// canonical list is empty, while the submitted list may still be empty.

use serde::Serialize;

/// Ordered editable rows for the DNS server list. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSlots {
    slots: Vec<String>,
}

impl Default for DnsSlots {
    fn default() -> Self {
        Self {
            slots: vec![String::new()],
        }
    }
}

impl DnsSlots {
    /// Build slots from a canonical list. An empty list gives one empty slot.
    pub fn from_canonical(servers: &[String]) -> Self {
        let mut slots = Self::default();
        slots.replace_all(servers);
        slots
    }

    /// Discard every edit and rebuild from the canonical list.
    pub fn replace_all(&mut self, servers: &[String]) {
        self.slots = if servers.is_empty() {
            vec![String::new()]
        } else {
            servers.to_vec()
        };
    }

    /// Append one empty slot.
    pub fn push_empty(&mut self) {
        self.slots.push(String::new());
    }

    /// Remove slot `index`. The last remaining slot is cleared instead of
    /// removed; an out-of-range index does nothing.
    pub fn remove_at(&mut self, index: usize) {
        if index >= self.slots.len() {
            return;
        }
        if self.slots.len() > 1 {
            self.slots.remove(index);
        } else if let Some(only) = self.slots.first_mut() {
            only.clear();
        }
    }

    /// Replace the text of slot `index`. Out of range does nothing.
    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = value.into();
        }
    }

    /// The list to send: trimmed, with blank slots dropped. May be empty.
    pub fn submitted(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`; at least one slot is held.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn servers(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_canonical_gives_one_blank_slot() {
        let slots = DnsSlots::from_canonical(&[]);
        assert_eq!(slots.slots(), &[String::new()]);
    }

    #[test]
    fn canonical_order_preserved() {
        let slots = DnsSlots::from_canonical(&servers(&["8.8.8.8", "1.1.1.1"]));
        assert_eq!(slots.slots(), servers(&["8.8.8.8", "1.1.1.1"]).as_slice());
    }

    #[test]
    fn push_appends_blank() {
        let mut slots = DnsSlots::from_canonical(&servers(&["8.8.8.8"]));
        slots.push_empty();
        assert_eq!(slots.slots(), servers(&["8.8.8.8", ""]).as_slice());
    }

    #[test]
    fn remove_deletes_when_more_than_one() {
        let mut slots = DnsSlots::from_canonical(&servers(&["a", "b", "c"]));
        slots.remove_at(1);
        assert_eq!(slots.slots(), servers(&["a", "c"]).as_slice());
    }

    #[test]
    fn removing_last_slot_never_drops_below_one() {
        let mut slots = DnsSlots::from_canonical(&servers(&["8.8.8.8"]));
        for _ in 0..5 {
            slots.remove_at(0);
            assert_eq!(slots.len(), 1);
        }
        assert_eq!(slots.slots(), &[String::new()]);
    }

    #[test]
    fn out_of_range_edits_are_noops() {
        let mut slots = DnsSlots::from_canonical(&servers(&["a", "b"]));
        slots.remove_at(7);
        slots.set(9, "x");
        assert_eq!(slots.slots(), servers(&["a", "b"]).as_slice());
    }

    #[test]
    fn all_blank_submits_empty() {
        let mut slots = DnsSlots::default();
        slots.push_empty();
        slots.set(0, "   ");
        slots.set(1, "\t");
        assert!(slots.submitted().is_empty());
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn submitted_values_are_trimmed() {
        let mut slots = DnsSlots::default();
        slots.set(0, " 8.8.8.8 ");
        slots.push_empty();
        slots.push_empty();
        slots.set(2, "1.1.1.1");
        assert_eq!(slots.submitted(), servers(&["8.8.8.8", "1.1.1.1"]));
    }

    #[test]
    fn replace_all_discards_edits() {
        let mut slots = DnsSlots::from_canonical(&servers(&["8.8.8.8"]));
        slots.set(0, "edited");
        slots.push_empty();
        slots.replace_all(&servers(&["9.9.9.9"]));
        assert_eq!(slots.slots(), servers(&["9.9.9.9"]).as_slice());

        slots.replace_all(&[]);
        assert_eq!(slots.slots(), &[String::new()]);
    }
}
