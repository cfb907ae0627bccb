//! Card pattern: the profile is split into cards that edit one at a
//! time, each with its own edit/save cycle over a temporary copy.

use crate::links::LinkList;
use crate::seed;

/// The three profile cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
    Identity,
    About,
    Social,
}

/// Name and username, shown on the identity card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityCard {
    pub name: String,
    pub username: String,
}

/// Bio and location, shown on the about card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutCard {
    pub bio: String,
    pub location: String,
}

/// Temporary copy of whichever card is under edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardDraft {
    Identity(IdentityCard),
    About(AboutCard),
    Social(LinkList),
}

impl CardDraft {
    fn card(&self) -> Card {
        match self {
            Self::Identity(_) => Card::Identity,
            Self::About(_) => Card::About,
            Self::Social(_) => Card::Social,
        }
    }
}

/// Card-based demonstration state.
///
/// Only one card edits at a time. Starting an edit on a second card
/// discards the first card's temporary copy without saving it.
#[derive(Debug, Clone)]
pub struct CardDemo {
    identity: IdentityCard,
    about: AboutCard,
    social: LinkList,
    draft: Option<CardDraft>,
}

impl CardDemo {
    pub fn new() -> Self {
        Self {
            identity: IdentityCard {
                name: seed::NAME.to_string(),
                username: seed::USERNAME.to_string(),
            },
            about: AboutCard {
                bio: seed::BIO.to_string(),
                location: seed::LOCATION.to_string(),
            },
            social: LinkList::seeded(),
            draft: None,
        }
    }

    pub fn identity(&self) -> &IdentityCard {
        &self.identity
    }

    pub fn about(&self) -> &AboutCard {
        &self.about
    }

    pub fn social(&self) -> &LinkList {
        &self.social
    }

    /// The card currently under edit, if any.
    pub fn editing(&self) -> Option<Card> {
        self.draft.as_ref().map(CardDraft::card)
    }

    /// Start editing a card over a copy of its saved values. Any other
    /// card's open draft is dropped.
    pub fn edit(&mut self, card: Card) {
        self.draft = Some(match card {
            Card::Identity => CardDraft::Identity(self.identity.clone()),
            Card::About => CardDraft::About(self.about.clone()),
            Card::Social => CardDraft::Social(self.social.clone()),
        });
    }

    pub fn draft(&self) -> Option<&CardDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut CardDraft> {
        self.draft.as_mut()
    }

    /// Discard the open draft; the card's saved values stand.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Commit the open draft back onto its card. The mocked backend
    /// always succeeds. A no-op with no card under edit.
    pub fn save(&mut self) {
        match self.draft.take() {
            Some(CardDraft::Identity(identity)) => self.identity = identity,
            Some(CardDraft::About(about)) => self.about = about,
            Some(CardDraft::Social(links)) => self.social = links,
            None => {}
        }
    }
}

impl Default for CardDemo {
    fn default() -> Self {
        Self::new()
    }
}
