//! Inline edit pattern: every field saves on its own.

use visage_form::FieldMachine;

use crate::links::{LinkList, Platform};
use crate::seed;

/// Inline-edit demonstration state.
///
/// The name and bio fields run independent machines; editing one never
/// blocks the other. Saves are mocked as immediate successes.
#[derive(Debug, Clone)]
pub struct InlineEditDemo {
    pub name: FieldMachine<String>,
    pub bio: FieldMachine<String>,
    pub links: LinkList,
    editing_link: Option<u64>,
}

impl InlineEditDemo {
    pub fn new() -> Self {
        Self {
            name: FieldMachine::new(seed::NAME.to_string()),
            bio: FieldMachine::new(seed::BIO.to_string()),
            links: LinkList::seeded(),
            editing_link: None,
        }
    }

    /// Commit a field's draft: the mocked backend always succeeds, so
    /// submit resolves immediately and the `Saved` banner shows.
    pub fn save_field(field: &mut FieldMachine<String>) {
        if let Ok(draft) = field.submit() {
            let _ = field.resolve(Ok(draft));
        }
    }

    pub fn editing_link(&self) -> Option<u64> {
        self.editing_link
    }

    /// Open one link row for editing; only one row at a time.
    pub fn edit_link(&mut self, id: u64) {
        if self.links.links().iter().any(|link| link.id == id) {
            self.editing_link = Some(id);
        }
    }

    pub fn close_link_editor(&mut self) {
        self.editing_link = None;
    }

    pub fn add_link(&mut self, platform: Platform, url: impl Into<String>) -> u64 {
        self.links.add(platform, url)
    }
}

impl Default for InlineEditDemo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_form::FieldState;

    #[test]
    fn name_edit_saves_without_touching_bio() {
        let mut demo = InlineEditDemo::new();

        demo.name.begin_edit().unwrap();
        demo.name.set_draft("Sarah J.".to_string()).unwrap();
        InlineEditDemo::save_field(&mut demo.name);

        assert_eq!(demo.name.state(), FieldState::Saved);
        assert_eq!(demo.name.persisted(), "Sarah J.");
        // The bio field never moved.
        assert_eq!(demo.bio.state(), FieldState::Idle);
        assert_eq!(demo.bio.persisted(), seed::BIO);
    }

    #[test]
    fn cancel_reverts_to_seed_value() {
        let mut demo = InlineEditDemo::new();

        demo.bio.begin_edit().unwrap();
        demo.bio.set_draft("Scratch bio".to_string()).unwrap();
        demo.bio.cancel().unwrap();

        assert_eq!(demo.bio.persisted(), seed::BIO);
        assert_eq!(demo.bio.state(), FieldState::Idle);
    }

    #[test]
    fn saved_banner_reverts_via_timer_callback() {
        let mut demo = InlineEditDemo::new();
        demo.name.begin_edit().unwrap();
        demo.name.set_draft("New Name".to_string()).unwrap();
        InlineEditDemo::save_field(&mut demo.name);

        let generation = demo.name.generation();
        assert!(demo.name.banner_elapsed(generation));
        assert_eq!(demo.name.state(), FieldState::Idle);
    }

    #[test]
    fn one_link_row_edits_at_a_time() {
        let mut demo = InlineEditDemo::new();
        let first = demo.links.links()[0].id;
        let second = demo.links.links()[1].id;

        demo.edit_link(first);
        demo.edit_link(second);
        assert_eq!(demo.editing_link(), Some(second));

        demo.close_link_editor();
        assert_eq!(demo.editing_link(), None);
    }

    #[test]
    fn unknown_link_id_is_not_editable() {
        let mut demo = InlineEditDemo::new();
        demo.edit_link(12345);
        assert_eq!(demo.editing_link(), None);
    }
}
