//! Session identity handed to the study service
//!
//! Credential checking happens elsewhere; a session only records which
//! owner, if any, the caller acts as.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flashcards::{FlashcardError, OwnerId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_id: Option<OwnerId>,
}

impl Session {
    /// A signed-in user
    pub fn user(owner_id: OwnerId) -> Self {
        Self {
            owner_id: Some(owner_id),
        }
    }

    /// No signed-in user; only demo cards are readable
    pub fn anonymous() -> Self {
        Self { owner_id: None }
    }

    pub fn from_owner(owner_id: Option<Uuid>) -> Self {
        Self { owner_id }
    }

    pub fn owner_id(&self) -> Option<OwnerId> {
        self.owner_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.owner_id.is_some()
    }

    /// The owner id, or `Unauthorized` for anonymous sessions
    pub fn require_owner(&self) -> Result<OwnerId, FlashcardError> {
        self.owner_id.ok_or(FlashcardError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session_is_rejected() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(matches!(
            session.require_owner(),
            Err(FlashcardError::Unauthorized)
        ));
    }

    #[test]
    fn test_user_session() {
        let owner = Uuid::new_v4();
        let session = Session::user(owner);
        assert!(session.is_authenticated());
        assert_eq!(session.require_owner().unwrap(), owner);
        assert_eq!(Session::from_owner(Some(owner)), session);
    }
}
