//! Pick-mode letters.
//!
//! Each document keeps the letter it was first given for as long as it is
//! open, so the hint under a buffer does not change between picks.

use crate::config::DEFAULT_PICK_ALPHABET;
use crate::host::DocumentId;
use std::collections::HashMap;

/// Assigns pick letters to documents.
#[derive(Debug, Clone)]
pub struct LetterRegistry {
    alphabet: Vec<char>,
    assigned: HashMap<DocumentId, char>,
}

impl LetterRegistry {
    /// Creates a registry drawing from `alphabet`; duplicate characters are
    /// ignored.
    #[must_use]
    pub fn new(alphabet: &str) -> Self {
        let mut letters = Vec::new();
        for letter in alphabet.chars() {
            if !letters.contains(&letter) {
                letters.push(letter);
            }
        }
        LetterRegistry {
            alphabet: letters,
            assigned: HashMap::new(),
        }
    }

    /// Returns the letter of `id`, assigning one if needed.
    ///
    /// A new document gets the first character of its name when that is in
    /// the alphabet and still free, otherwise the first free letter. Returns
    /// `None` once the alphabet is exhausted.
    pub fn get_or_assign(&mut self, id: DocumentId, name: &str) -> Option<char> {
        if let Some(letter) = self.assigned.get(&id) {
            return Some(*letter);
        }

        let preferred = name
            .chars()
            .next()
            .filter(|c| self.alphabet.contains(c) && !self.is_taken(*c));
        let letter = preferred.or_else(|| {
            self.alphabet
                .iter()
                .copied()
                .find(|c| !self.is_taken(*c))
        })?;

        self.assigned.insert(id, letter);
        Some(letter)
    }

    /// Returns the document holding `letter`.
    #[must_use]
    pub fn id_for(&self, letter: char) -> Option<DocumentId> {
        self.assigned
            .iter()
            .find_map(|(id, assigned)| (*assigned == letter).then_some(*id))
    }

    /// Releases the letters of documents not in `live`.
    pub fn retain_live(&mut self, live: &[DocumentId]) {
        self.assigned.retain(|id, _| live.contains(id));
    }

    /// Number of letters currently handed out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    fn is_taken(&self, letter: char) -> bool {
        self.assigned.values().any(|assigned| *assigned == letter)
    }
}

impl Default for LetterRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PICK_ALPHABET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_first_letter_of_name() {
        let mut letters = LetterRegistry::default();
        assert_eq!(letters.get_or_assign(1, "main.rs"), Some('m'));
        assert_eq!(letters.get_or_assign(2, "mod.rs"), Some('a'));
        assert_eq!(letters.get_or_assign(3, "lib.rs"), Some('l'));
    }

    #[test]
    fn test_letters_are_stable() {
        let mut letters = LetterRegistry::default();
        let first = letters.get_or_assign(1, "a.rs");
        letters.get_or_assign(2, "b.rs");
        assert_eq!(letters.get_or_assign(1, "renamed.rs"), first);
        assert_eq!(letters.id_for('a'), Some(1));
        assert_eq!(letters.id_for('b'), Some(2));
        assert_eq!(letters.id_for('q'), None);
    }

    #[test]
    fn test_name_outside_alphabet_takes_first_free() {
        let mut letters = LetterRegistry::new("xy");
        assert_eq!(letters.get_or_assign(1, "[No Name]"), Some('x'));
        assert_eq!(letters.get_or_assign(2, "_"), Some('y'));
    }

    #[test]
    fn test_exhausted_alphabet() {
        let mut letters = LetterRegistry::new("aa");
        assert_eq!(letters.get_or_assign(1, "z"), Some('a'));
        assert_eq!(letters.get_or_assign(2, "z"), None);
        assert_eq!(letters.len(), 1);
    }

    #[test]
    fn test_retain_live_releases_letters() {
        let mut letters = LetterRegistry::new("ab");
        letters.get_or_assign(1, "a");
        letters.get_or_assign(2, "b");
        letters.retain_live(&[2]);
        assert_eq!(letters.id_for('a'), None);
        assert_eq!(letters.get_or_assign(3, "a"), Some('a'));
    }
}
