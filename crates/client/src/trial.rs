//! Trial display state derived from the session's subscription record.
//!
//! Pure computation, no I/O: callers re-derive on every read since "now"
//! moves continuously.

use chrono::{DateTime, Utc};
use shared::{SessionEnvelope, SubscriptionStatus};

/// Trials within this many days of ending get the "ending soon" treatment.
pub const DEFAULT_ENDING_SOON_DAYS: i64 = 3;

/// Display state for the trial banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialDisplayState {
    pub status: SubscriptionStatus,
    /// Whole days until the trial ends, clamped to zero; `None` when no
    /// trial end date is known.
    pub days_remaining: Option<i64>,
    pub trial_end: Option<DateTime<Utc>>,
}

impl TrialDisplayState {
    const INACTIVE: TrialDisplayState = TrialDisplayState {
        status: SubscriptionStatus::Inactive,
        days_remaining: None,
        trial_end: None,
    };

    /// Whether the banner should switch to its "ending soon" treatment.
    /// The day-0 boundary is inclusive: a trial on its last day still counts.
    pub fn is_ending_soon(&self, threshold_days: i64) -> bool {
        self.status == SubscriptionStatus::Trialing
            && self.days_remaining.is_some_and(|days| days <= threshold_days)
    }
}

/// Derives trial display state as of `now`.
///
/// A session with no company or no subscription yields the inactive state.
pub fn derive_trial_status_at(session: &SessionEnvelope, now: DateTime<Utc>) -> TrialDisplayState {
    let Some(subscription) = session
        .user
        .company
        .as_ref()
        .and_then(|company| company.subscription.as_ref())
    else {
        return TrialDisplayState::INACTIVE;
    };

    let days_remaining = subscription
        .trial_end
        .map(|end| (end - now).num_days().max(0));

    TrialDisplayState {
        status: subscription.status,
        days_remaining,
        trial_end: subscription.trial_end,
    }
}

/// [`derive_trial_status_at`] evaluated at the current instant.
pub fn derive_trial_status(session: &SessionEnvelope) -> TrialDisplayState {
    derive_trial_status_at(session, Utc::now())
}
