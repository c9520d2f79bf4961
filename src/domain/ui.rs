use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::PostId;
use crate::app::FailureKind;
use crate::locale::MessageKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormStatus {
    #[default]
    Idle,
    Validating,
    Invalid,
    Submitting,
    Submitted,
}

impl FormStatus {
    /// Whether the input should refuse edits and resubmission.
    pub fn is_busy(self) -> bool {
        matches!(self, FormStatus::Validating | FormStatus::Submitting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Success(MessageKey),
    Error(MessageKey),
}

impl Feedback {
    pub fn key(self) -> MessageKey {
        match self {
            Feedback::Success(key) | Feedback::Error(key) => key,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub status: FormStatus,
    pub feedback: Option<Feedback>,
}

impl FormState {
    pub fn with_status(status: FormStatus) -> Self {
        Self {
            status,
            feedback: None,
        }
    }

    pub fn invalid(key: MessageKey) -> Self {
        Self {
            status: FormStatus::Invalid,
            feedback: Some(Feedback::Error(key)),
        }
    }

    pub fn submitted(key: MessageKey) -> Self {
        Self {
            status: FormStatus::Submitted,
            feedback: Some(Feedback::Success(key)),
        }
    }
}

/// Progress of the network part of a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(FailureKind),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalState {
    pub selected: Option<PostId>,
}

/// Posts the user has opened. Only ever grows during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewedSet(BTreeSet<PostId>);

impl ViewedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: PostId) -> bool {
        self.0.contains(&id)
    }

    /// Returns `false` when the id was already present.
    pub fn insert(&mut self, id: PostId) -> bool {
        self.0.insert(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PostId> + '_ {
        self.0.iter().copied()
    }
}
