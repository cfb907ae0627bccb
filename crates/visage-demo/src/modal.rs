//! Modal dialog pattern: the whole profile edits and saves as one unit.

use visage_form::{CombinedForm, FieldState, TransitionError};

use crate::links::LinkList;
use crate::seed;

/// Everything the modal edits, carried as one draft value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub username: String,
    pub bio: String,
    pub location: String,
    pub links: LinkList,
}

impl ProfileDraft {
    pub fn seeded() -> Self {
        Self {
            name: seed::NAME.to_string(),
            username: seed::USERNAME.to_string(),
            bio: seed::BIO.to_string(),
            location: seed::LOCATION.to_string(),
            links: LinkList::seeded(),
        }
    }
}

/// Modal demonstration state.
///
/// One combined machine covers every field, so opening the dialog is
/// one `Editing` transition and the save button is one `Saving`
/// transition for all of them.
#[derive(Debug, Clone)]
pub struct ModalDemo {
    form: CombinedForm<ProfileDraft>,
    open: bool,
}

impl ModalDemo {
    pub fn new() -> Self {
        Self {
            form: CombinedForm::new(ProfileDraft::seeded()),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The profile as last saved, shown behind the dialog.
    pub fn profile(&self) -> &ProfileDraft {
        self.form.persisted()
    }

    pub fn state(&self) -> FieldState {
        self.form.state()
    }

    /// Open the dialog with a draft seeded from the saved profile.
    pub fn open(&mut self) -> Result<(), TransitionError> {
        self.form.begin_edit()?;
        self.open = true;
        Ok(())
    }

    /// The draft under edit. `None` while the dialog is closed.
    pub fn draft(&self) -> Option<&ProfileDraft> {
        self.form.draft()
    }

    /// Replace the draft wholesale; field setters in the dialog funnel
    /// through here.
    pub fn set_draft(&mut self, draft: ProfileDraft) -> Result<(), TransitionError> {
        self.form.set_draft(draft)
    }

    /// Dismiss without saving. Refused while the save is in flight.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        self.form.cancel()?;
        self.open = false;
        Ok(())
    }

    /// Save everything at once. The mocked backend always succeeds;
    /// the dialog closes on commit.
    pub fn save(&mut self) -> Result<(), TransitionError> {
        let draft = self.form.submit()?;
        self.form.resolve(Ok(draft))?;
        self.open = false;
        Ok(())
    }
}

impl Default for ModalDemo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::Platform;

    #[test]
    fn open_seeds_draft_from_saved_profile() {
        let mut demo = ModalDemo::new();
        demo.open().unwrap();

        assert!(demo.is_open());
        let draft = demo.draft().unwrap();
        assert_eq!(draft.name, seed::NAME);
        assert_eq!(draft.username, seed::USERNAME);
        assert_eq!(draft.links.len(), 3);
    }

    #[test]
    fn save_commits_every_field_at_once() {
        let mut demo = ModalDemo::new();
        demo.open().unwrap();

        let mut draft = demo.draft().unwrap().clone();
        draft.name = "Sarah J.".to_string();
        draft.location = "Portland, OR".to_string();
        draft.links.add(Platform::Website, "sarahj.design");
        demo.set_draft(draft).unwrap();
        demo.save().unwrap();

        assert!(!demo.is_open());
        assert_eq!(demo.state(), FieldState::Saved);
        assert_eq!(demo.profile().name, "Sarah J.");
        assert_eq!(demo.profile().location, "Portland, OR");
        assert_eq!(demo.profile().links.len(), 4);
        // Untouched fields rode along unchanged.
        assert_eq!(demo.profile().bio, seed::BIO);
    }

    #[test]
    fn cancel_discards_the_whole_draft() {
        let mut demo = ModalDemo::new();
        demo.open().unwrap();

        let mut draft = demo.draft().unwrap().clone();
        draft.name = "Scratch".to_string();
        draft.links.remove(draft.links.links()[0].id);
        demo.set_draft(draft).unwrap();
        demo.cancel().unwrap();

        assert!(!demo.is_open());
        assert_eq!(demo.profile().name, seed::NAME);
        assert_eq!(demo.profile().links.len(), 3);
        assert_eq!(demo.draft(), None);
    }

    #[test]
    fn reopening_reseeds_from_the_saved_profile() {
        let mut demo = ModalDemo::new();
        demo.open().unwrap();
        let mut draft = demo.draft().unwrap().clone();
        draft.bio = "New bio".to_string();
        demo.set_draft(draft).unwrap();
        demo.save().unwrap();

        demo.open().unwrap();
        assert_eq!(demo.draft().unwrap().bio, "New bio");
    }
}
