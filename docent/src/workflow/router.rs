//! Pure routing decisions between workflow stages.
//!
//! Each function reads the merged state and returns a [`Route`] variant; no
//! side effects. The graph wiring maps variants to node ids through
//! conditional-edge path maps.

use crate::state::ConversationState;

/// Interest score at which the workflow starts soliciting contact details.
pub const INTEREST_THRESHOLD: u8 = 7;

/// Next stage selected by a routing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Contact collection stage.
    CollectContact,
    /// Answer generation stage.
    Generate,
    /// Lead notification stage.
    Notify,
    /// Terminate the run.
    End,
}

impl Route {
    /// Stable key used in conditional-edge path maps.
    pub fn key(self) -> &'static str {
        match self {
            Route::CollectContact => "collect_contact",
            Route::Generate => "generate",
            Route::Notify => "notify",
            Route::End => "end",
        }
    }
}

/// After interest evaluation: enter the contact flow when already
/// collecting, already collected, or the interest ratchet reached the
/// threshold; otherwise answer directly.
pub fn after_interest(state: &ConversationState) -> Route {
    if state.collecting_contact
        || state.contact_info.collected
        || state.interest_score >= INTEREST_THRESHOLD
    {
        Route::CollectContact
    } else {
        Route::Generate
    }
}

/// After generation: notify once per captured lead, otherwise terminate.
pub fn after_generate(state: &ConversationState) -> Route {
    if state.contact_info.collected && !state.lead_notified {
        Route::Notify
    } else {
        Route::End
    }
}
