//! Visage prototypes - a demo harness comparing three profile-edit
//! interaction patterns over purely in-memory state.
//!
//! Nothing in this crate persists anything, calls the gateway, or
//! checks a session; it exists to compare how the inline, modal, and
//! card-based patterns feel. Selecting a variant constructs its state
//! fresh, exactly as remounting the corresponding UI component would.

pub mod cards;
pub mod inline;
pub mod links;
pub mod modal;

pub use cards::{Card, CardDemo};
pub use inline::InlineEditDemo;
pub use links::{LinkList, Platform, SocialLink};
pub use modal::{ModalDemo, ProfileDraft};

/// The three mutually exclusive editing-pattern demonstrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    InlineEdit,
    Modal,
    CardBased,
}

/// State of the currently selected demonstration.
#[derive(Debug, Clone)]
pub enum ActiveDemo {
    Inline(InlineEditDemo),
    Modal(ModalDemo),
    Cards(CardDemo),
}

/// Client-side switcher between the three patterns.
#[derive(Debug, Clone)]
pub struct PrototypeSwitcher {
    active: ActiveDemo,
}

impl PrototypeSwitcher {
    pub fn new() -> Self {
        Self {
            active: ActiveDemo::Inline(InlineEditDemo::new()),
        }
    }

    pub fn variant(&self) -> Variant {
        match self.active {
            ActiveDemo::Inline(_) => Variant::InlineEdit,
            ActiveDemo::Modal(_) => Variant::Modal,
            ActiveDemo::Cards(_) => Variant::CardBased,
        }
    }

    /// Switch patterns. The outgoing variant's state is discarded and
    /// the incoming one starts from the seed data.
    pub fn select(&mut self, variant: Variant) {
        self.active = match variant {
            Variant::InlineEdit => ActiveDemo::Inline(InlineEditDemo::new()),
            Variant::Modal => ActiveDemo::Modal(ModalDemo::new()),
            Variant::CardBased => ActiveDemo::Cards(CardDemo::new()),
        };
    }

    pub fn active(&self) -> &ActiveDemo {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ActiveDemo {
        &mut self.active
    }
}

impl Default for PrototypeSwitcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed values shared by all three variants.
pub(crate) mod seed {
    pub const NAME: &str = "Sarah Johnson";
    pub const USERNAME: &str = "sarahj";
    pub const BIO: &str =
        "Product designer passionate about creating intuitive user experiences. Coffee enthusiast ☕";
    pub const LOCATION: &str = "San Francisco, CA";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_variants_discards_local_state() {
        let mut switcher = PrototypeSwitcher::new();

        let ActiveDemo::Inline(inline) = switcher.active_mut() else {
            panic!("default variant is inline");
        };
        inline.name.begin_edit().unwrap();
        inline.name.set_draft("Scratch".to_string()).unwrap();

        switcher.select(Variant::Modal);
        switcher.select(Variant::InlineEdit);

        let ActiveDemo::Inline(inline) = switcher.active() else {
            panic!("inline selected");
        };
        // Fresh state: the abandoned draft is gone.
        assert_eq!(inline.name.persisted(), seed::NAME);
        assert_eq!(inline.name.draft(), None);
    }

    #[test]
    fn variants_report_their_identity() {
        let mut switcher = PrototypeSwitcher::new();
        assert_eq!(switcher.variant(), Variant::InlineEdit);

        switcher.select(Variant::CardBased);
        assert_eq!(switcher.variant(), Variant::CardBased);

        switcher.select(Variant::Modal);
        assert_eq!(switcher.variant(), Variant::Modal);
    }
}
