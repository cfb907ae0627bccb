//! Pure, synchronous edit/save state machine for one editable unit.

use thiserror::Error;

/// Where an editable unit currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Displaying the persisted value.
    Idle,
    /// A local draft is open; the persisted value is untouched.
    Editing,
    /// The draft is frozen and a request is in flight.
    Saving,
    /// Transient success banner; auto-reverts to `Idle`.
    Saved,
    /// A save failed. The draft and an inline message are kept so the
    /// user can fix and resubmit; the persisted value is unchanged.
    Error,
}

/// Rejected machine transition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// A request is pending; no second submission or re-edit of the
    /// same unit is permitted.
    #[error("a save is already in flight")]
    SaveInFlight,
    /// The operation needs an open draft.
    #[error("not editing")]
    NotEditing,
}

/// State machine for one editable unit holding values of type `T`.
///
/// Every transition away from `Saved` bumps the generation counter, so
/// a banner timer scheduled for an earlier generation can never revert
/// a machine that has since moved on.
#[derive(Debug, Clone)]
pub struct FieldMachine<T: Clone> {
    persisted: T,
    draft: Option<T>,
    state: FieldState,
    error: Option<String>,
    generation: u64,
}

/// A whole-form machine for the modal arrangement: all fields share
/// one combined `Editing` and one combined `Saving` transition by
/// running a single machine over the full draft struct.
pub type CombinedForm<D> = FieldMachine<D>;

impl<T: Clone> FieldMachine<T> {
    /// Start in `Idle` over an already-persisted value.
    pub fn new(persisted: T) -> Self {
        Self {
            persisted,
            draft: None,
            state: FieldState::Idle,
            error: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    /// The last successfully saved value.
    pub fn persisted(&self) -> &T {
        &self.persisted
    }

    /// The open draft, if any.
    pub fn draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    /// The inline error message shown in the `Error` state.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn is_editing(&self) -> bool {
        matches!(self.state, FieldState::Editing | FieldState::Error)
    }

    /// Open a draft seeded from the persisted value.
    ///
    /// Refused while a save is in flight; a no-op when a draft is
    /// already open. Editing away from `Saved` dismisses the banner.
    pub fn begin_edit(&mut self) -> Result<(), TransitionError> {
        match self.state {
            FieldState::Saving => Err(TransitionError::SaveInFlight),
            FieldState::Editing | FieldState::Error => Ok(()),
            FieldState::Idle | FieldState::Saved => {
                self.draft = Some(self.persisted.clone());
                self.state = FieldState::Editing;
                self.error = None;
                self.generation += 1;
                Ok(())
            }
        }
    }

    /// Replace the draft value. Only legal with an open draft; in
    /// particular the draft is read-only while `Saving`.
    pub fn set_draft(&mut self, value: T) -> Result<(), TransitionError> {
        if self.state == FieldState::Saving {
            return Err(TransitionError::SaveInFlight);
        }
        if !self.is_editing() {
            return Err(TransitionError::NotEditing);
        }
        self.draft = Some(value);
        Ok(())
    }

    /// Discard the draft and revert to `Idle` without contacting the
    /// gateway. Refused while a save is in flight.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        if self.state == FieldState::Saving {
            return Err(TransitionError::SaveInFlight);
        }
        if !self.is_editing() {
            return Err(TransitionError::NotEditing);
        }
        self.draft = None;
        self.error = None;
        self.state = FieldState::Idle;
        self.generation += 1;
        Ok(())
    }

    /// Freeze the draft and enter `Saving`, returning the value to
    /// send. A second submit while one is pending is refused.
    pub fn submit(&mut self) -> Result<T, TransitionError> {
        if self.state == FieldState::Saving {
            return Err(TransitionError::SaveInFlight);
        }
        if !self.is_editing() {
            return Err(TransitionError::NotEditing);
        }
        let value = self.draft.clone().ok_or(TransitionError::NotEditing)?;
        self.state = FieldState::Saving;
        self.error = None;
        self.generation += 1;
        Ok(value)
    }

    /// Complete the in-flight save.
    ///
    /// Success commits the frozen draft and shows the `Saved` banner;
    /// failure keeps the draft and the message, leaving the persisted
    /// value untouched.
    pub fn resolve(&mut self, result: Result<T, String>) -> Result<(), TransitionError> {
        if self.state != FieldState::Saving {
            return Err(TransitionError::NotEditing);
        }
        self.generation += 1;
        match result {
            Ok(value) => {
                self.persisted = value;
                self.draft = None;
                self.error = None;
                self.state = FieldState::Saved;
            }
            Err(message) => {
                self.error = Some(message);
                self.state = FieldState::Error;
            }
        }
        Ok(())
    }

    /// Banner timer callback: revert `Saved` to `Idle`, but only if
    /// the machine is still in the generation the timer was scheduled
    /// for. Returns whether the revert happened.
    pub fn banner_elapsed(&mut self, generation: u64) -> bool {
        if self.state == FieldState::Saved && self.generation == generation {
            self.state = FieldState::Idle;
            self.generation += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved_machine() -> FieldMachine<String> {
        let mut m = FieldMachine::new("old".to_string());
        m.begin_edit().unwrap();
        m.set_draft("new".to_string()).unwrap();
        m.submit().unwrap();
        m.resolve(Ok("new".to_string())).unwrap();
        m
    }

    #[test]
    fn edit_save_commits_draft() {
        let mut m = FieldMachine::new("old".to_string());
        m.begin_edit().unwrap();
        assert_eq!(m.draft(), Some(&"old".to_string()));

        m.set_draft("new".to_string()).unwrap();
        let sent = m.submit().unwrap();
        assert_eq!(sent, "new");
        assert_eq!(m.state(), FieldState::Saving);
        // Persisted value is untouched while the request is pending.
        assert_eq!(m.persisted(), "old");

        m.resolve(Ok("new".to_string())).unwrap();
        assert_eq!(m.state(), FieldState::Saved);
        assert_eq!(m.persisted(), "new");
        assert_eq!(m.draft(), None);
    }

    #[test]
    fn cancel_discards_draft_and_reverts() {
        let mut m = FieldMachine::new("old".to_string());
        m.begin_edit().unwrap();
        m.set_draft("scratch".to_string()).unwrap();
        m.cancel().unwrap();

        assert_eq!(m.state(), FieldState::Idle);
        assert_eq!(m.draft(), None);
        assert_eq!(m.persisted(), "old");
    }

    #[test]
    fn failed_save_keeps_draft_and_message() {
        let mut m = FieldMachine::new("old".to_string());
        m.begin_edit().unwrap();
        m.set_draft("bad".to_string()).unwrap();
        m.submit().unwrap();
        m.resolve(Err("Name is required".to_string())).unwrap();

        assert_eq!(m.state(), FieldState::Error);
        assert_eq!(m.error(), Some("Name is required"));
        assert_eq!(m.draft(), Some(&"bad".to_string()));
        assert_eq!(m.persisted(), "old");

        // The user can fix the draft and resubmit from here.
        m.set_draft("fixed".to_string()).unwrap();
        assert_eq!(m.submit().unwrap(), "fixed");
    }

    #[test]
    fn saving_refuses_everything_but_resolve() {
        let mut m = FieldMachine::new(1u32);
        m.begin_edit().unwrap();
        m.set_draft(2).unwrap();
        m.submit().unwrap();

        assert_eq!(m.submit(), Err(TransitionError::SaveInFlight));
        assert_eq!(m.begin_edit(), Err(TransitionError::SaveInFlight));
        assert_eq!(m.set_draft(3), Err(TransitionError::SaveInFlight));
        assert_eq!(m.cancel(), Err(TransitionError::SaveInFlight));
    }

    #[test]
    fn banner_reverts_only_its_own_generation() {
        let mut m = saved_machine();
        let generation = m.generation();

        // Re-editing before the timer fires supersedes the banner.
        m.begin_edit().unwrap();
        assert!(!m.banner_elapsed(generation));
        assert_eq!(m.state(), FieldState::Editing);
    }

    #[test]
    fn banner_reverts_saved_to_idle() {
        let mut m = saved_machine();
        assert!(m.banner_elapsed(m.generation()));
        assert_eq!(m.state(), FieldState::Idle);
    }

    #[test]
    fn begin_edit_from_saved_dismisses_banner() {
        let mut m = saved_machine();
        m.begin_edit().unwrap();
        assert_eq!(m.state(), FieldState::Editing);
        assert_eq!(m.draft(), Some(&"new".to_string()));
    }

    #[test]
    fn combined_form_moves_all_fields_at_once() {
        #[derive(Debug, Clone, PartialEq, Eq)]
        struct Draft {
            name: String,
            bio: String,
        }

        let mut form: CombinedForm<Draft> = CombinedForm::new(Draft {
            name: "Sarah Johnson".to_string(),
            bio: "Product designer".to_string(),
        });

        form.begin_edit().unwrap();
        form.set_draft(Draft {
            name: "Sarah J.".to_string(),
            bio: "Designer".to_string(),
        })
        .unwrap();
        let sent = form.submit().unwrap();
        form.resolve(Ok(sent)).unwrap();

        assert_eq!(form.persisted().name, "Sarah J.");
        assert_eq!(form.persisted().bio, "Designer");
    }
}
