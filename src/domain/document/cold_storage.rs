//! Cold-storage lifecycle of a document's main content.
//!
//! ```text
//! Active ──move──▶ InColdStorage ──retrieve──▶ BeingRetrieved
//!   ▲                                              │
//!   └──────────── retrieval completed ─────────────┘
//! ```
//!
//! Completion of a retrieval is driven from outside this crate; only the
//! request is recorded here.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, Timestamp};

/// Where the main content of a document currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColdStorageState {
    /// Content is in the regular (hot) tier.
    #[default]
    Active,
    /// Content has been relocated to the cold tier.
    InColdStorage,
    /// A retrieval has been requested and not yet completed.
    BeingRetrieved,
}

impl StateMachine for ColdStorageState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ColdStorageState::*;
        matches!(
            (self, target),
            (Active, InColdStorage) | (InColdStorage, BeingRetrieved) | (BeingRetrieved, Active)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ColdStorageState::*;
        match self {
            Active => vec![InColdStorage],
            InColdStorage => vec![BeingRetrieved],
            BeingRetrieved => vec![Active],
        }
    }
}

/// Opaque handle to content held by the cold tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColdContentRef {
    /// Backend key for the stored payload.
    pub key: String,
    /// Digest of the payload at the time it was moved.
    pub digest: String,
    pub length: usize,
    pub mime_type: String,
}

/// A recorded retrieval request and its availability window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalRequest {
    pub number_of_days_of_availability: u32,
    pub requested_at: Timestamp,
    /// End of the window during which the restored copy stays hot.
    pub available_until: Timestamp,
}

impl RetrievalRequest {
    /// # Errors
    ///
    /// - `OutOfRange` if the window ends past the last representable date
    pub fn new(
        number_of_days_of_availability: u32,
        requested_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let available_until = requested_at
            .add_days(number_of_days_of_availability)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::OutOfRange,
                    format!(
                        "numberOfDaysOfAvailability {} is too large",
                        number_of_days_of_availability
                    ),
                )
                .with_detail("field", "numberOfDaysOfAvailability")
            })?;
        Ok(Self {
            number_of_days_of_availability,
            requested_at,
            available_until,
        })
    }
}

/// Cold-storage facet of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColdStorage {
    state: ColdStorageState,
    cold_content: Option<ColdContentRef>,
    retrieval: Option<RetrievalRequest>,
}

impl ColdStorage {
    pub fn state(&self) -> ColdStorageState {
        self.state
    }

    pub fn cold_content(&self) -> Option<&ColdContentRef> {
        self.cold_content.as_ref()
    }

    pub fn retrieval(&self) -> Option<&RetrievalRequest> {
        self.retrieval.as_ref()
    }

    /// True once a retrieval request has been accepted and until it completes.
    pub fn is_being_retrieved(&self) -> bool {
        self.state == ColdStorageState::BeingRetrieved
    }

    pub(super) fn moved(&mut self, cold_content: ColdContentRef) -> Result<(), DomainError> {
        self.state = self.state.transition_to(ColdStorageState::InColdStorage)?;
        self.cold_content = Some(cold_content);
        self.retrieval = None;
        Ok(())
    }

    pub(super) fn retrieval_requested(
        &mut self,
        request: RetrievalRequest,
    ) -> Result<(), DomainError> {
        self.state = self.state.transition_to(ColdStorageState::BeingRetrieved)?;
        self.retrieval = Some(request);
        Ok(())
    }

    pub(super) fn retrieval_completed(&mut self) -> Result<(), DomainError> {
        self.state = self.state.transition_to(ColdStorageState::Active)?;
        self.cold_content = None;
        self.retrieval = None;
        Ok(())
    }
}
