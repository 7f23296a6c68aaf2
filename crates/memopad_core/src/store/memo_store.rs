//! In-memory memo list and edit-session orchestration.
//!
//! # Responsibility
//! - Hold the current memo list, newest first.
//! - Call the repository first, apply local state second.
//! - Track which memo (if any) is being created or edited.
//!
//! # Invariants
//! - A failed repository call leaves the list exactly as it was.
//! - Successful create prepends the canonical server record; successful
//!   update replaces the matching entry wholesale, never field-merged.
//! - Delete confirmation is the caller's concern; `delete` assumes it.

use crate::model::memo::{Memo, MemoDraft, MemoId, MemoValidationError};
use crate::repo::memo_repo::{MemoRepository, RepoError};
use crate::search::filter::filter_memos;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Transient state tracking the single open modal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    /// No form is open.
    #[default]
    Idle,
    /// The new-memo form is open.
    Creating,
    /// The edit form is open for one existing memo.
    Editing(MemoId),
}

/// Store-level error for view-model operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected before any external request was issued.
    Validation(MemoValidationError),
    /// The external store call failed; local state is unchanged.
    Repo(RepoError),
    /// A second edit session was requested while one is open.
    SessionBusy(EditSession),
    /// Edit requested for an id not present in the loaded list.
    UnknownMemo(MemoId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "memo store operation failed: {err}"),
            Self::SessionBusy(session) => {
                write!(f, "an edit session is already open: {session:?}")
            }
            Self::UnknownMemo(id) => write!(f, "no loaded memo with id {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemoValidationError> for StoreError {
    fn from(value: MemoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// View model over an injected repository implementation.
///
/// Front ends render [`MemoStore::memos`] (or a [`MemoStore::filtered`]
/// view) and forward user intents as method calls; no other path mutates
/// the list.
pub struct MemoStore<R: MemoRepository> {
    repo: R,
    memos: Vec<Memo>,
    session: EditSession,
}

impl<R: MemoRepository> MemoStore<R> {
    /// Creates an empty store over the given repository.
    ///
    /// The list stays empty until the first [`MemoStore::load`].
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            memos: Vec::new(),
            session: EditSession::Idle,
        }
    }

    /// Current list, newest first.
    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    /// Current edit-session state.
    pub fn session(&self) -> EditSession {
        self.session
    }

    /// Derived view for a search box value. Pure; never reorders the list.
    pub fn filtered(&self, search_text: &str) -> Vec<&Memo> {
        filter_memos(&self.memos, search_text)
    }

    /// Replaces the list with the full newest-first set from the store.
    ///
    /// On failure the previous list is kept; callers may retry by calling
    /// `load` again.
    pub fn load(&mut self) -> Result<(), StoreError> {
        match self.repo.load_all() {
            Ok(memos) => {
                info!(
                    "event=memo_load module=store status=ok count={}",
                    memos.len()
                );
                self.memos = memos;
                Ok(())
            }
            Err(err) => {
                error!("event=memo_load module=store status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Opens the new-memo session.
    pub fn begin_create(&mut self) -> Result<(), StoreError> {
        if self.session != EditSession::Idle {
            return Err(StoreError::SessionBusy(self.session));
        }
        self.session = EditSession::Creating;
        Ok(())
    }

    /// Opens the edit session for one loaded memo.
    pub fn begin_edit(&mut self, id: MemoId) -> Result<(), StoreError> {
        if self.session != EditSession::Idle {
            return Err(StoreError::SessionBusy(self.session));
        }
        if !self.memos.iter().any(|memo| memo.id == id) {
            return Err(StoreError::UnknownMemo(id));
        }
        self.session = EditSession::Editing(id);
        Ok(())
    }

    /// Abandons the open session, if any.
    pub fn cancel_edit(&mut self) {
        self.session = EditSession::Idle;
    }

    /// Creates a memo and prepends the canonical record on success.
    ///
    /// Validation failures never reach the repository. On repository failure
    /// the list is untouched and an open `Creating` session stays open so
    /// the caller can retry without losing input.
    pub fn create(&mut self, title: &str, content: &str) -> Result<Memo, StoreError> {
        let draft = MemoDraft::new(title, content);
        draft.validate()?;

        match self.repo.insert(&draft) {
            Ok(memo) => {
                info!(
                    "event=memo_create module=store status=ok id={}",
                    memo.id
                );
                self.memos.insert(0, memo.clone());
                if self.session == EditSession::Creating {
                    self.session = EditSession::Idle;
                }
                Ok(memo)
            }
            Err(err) => {
                error!("event=memo_create module=store status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Updates a memo and replaces the matching list entry on success.
    ///
    /// The replacement is always the server-returned record so the canonical
    /// `updated_at` is picked up. A missing id surfaces the repository's
    /// `NotFound` and changes nothing locally.
    pub fn update(&mut self, id: MemoId, title: &str, content: &str) -> Result<Memo, StoreError> {
        let draft = MemoDraft::new(title, content);
        draft.validate()?;

        match self.repo.update_by_id(id, &draft) {
            Ok(memo) => {
                info!("event=memo_update module=store status=ok id={id}");
                if let Some(entry) = self.memos.iter_mut().find(|entry| entry.id == id) {
                    *entry = memo.clone();
                }
                if self.session == EditSession::Editing(id) {
                    self.session = EditSession::Idle;
                }
                Ok(memo)
            }
            Err(err) => {
                error!("event=memo_update module=store status=error id={id} error={err}");
                Err(err.into())
            }
        }
    }

    /// Deletes a memo and removes it from the list on success.
    ///
    /// Interactive confirmation happens before this call, in the front end.
    pub fn delete(&mut self, id: MemoId) -> Result<(), StoreError> {
        match self.repo.delete_by_id(id) {
            Ok(()) => {
                info!("event=memo_delete module=store status=ok id={id}");
                self.memos.retain(|memo| memo.id != id);
                if self.session == EditSession::Editing(id) {
                    self.session = EditSession::Idle;
                }
                Ok(())
            }
            Err(err) => {
                error!("event=memo_delete module=store status=error id={id} error={err}");
                Err(err.into())
            }
        }
    }
}
