//! Screen-level view state
//!
//! Each screen owns a [`ViewState`] per resource and re-fetches on every
//! [`Trigger`]; nothing is shared or cached between screens. A load is
//! started with [`ViewState::begin`], which hands out a [`LoadTicket`]; the
//! outcome is applied with [`ViewState::apply`], which discards results for
//! unmounted screens and results overtaken by a newer load.

pub mod article;
pub mod assistant;
pub mod home;
pub mod lists;
pub mod profile;
pub mod statistics;

use crate::api::ApiError;
use crate::session::Session;

/// What caused a screen to (re)load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The screen was first shown
    Mount,
    /// The user pulled to refresh
    PullToRefresh,
    /// Another screen navigated back, optionally asking for a refresh
    NavigationBack {
        /// Whether the returning screen changed data
        refresh: bool,
    },
    /// The screen regained focus
    Focus,
}

impl Trigger {
    /// Whether this trigger should cause a reload
    pub const fn should_reload(self) -> bool {
        match self {
            Self::NavigationBack { refresh } => refresh,
            Self::Mount | Self::PullToRefresh | Self::Focus => true,
        }
    }
}

/// Proof that a load was started; must be handed back to [`ViewState::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

/// What [`ViewState::apply`] did with a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Data replaced
    Updated,
    /// Error recorded; previous data kept
    Failed,
    /// Placeholder data shown alongside the error
    Placeholder,
    /// Credential rejected; session cleared and data dropped
    SignedOut,
    /// Screen unmounted or a newer load is in flight; nothing changed
    Discarded,
}

/// `{loading, error, data}` for one resource on one screen
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    data: Option<T>,
    error: Option<String>,
    loading: bool,
    refreshing: bool,
    signed_out: bool,
    mounted: bool,
    generation: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewState<T> {
    /// Mounted, idle, empty state
    pub const fn new() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
            refreshing: false,
            signed_out: false,
            mounted: true,
            generation: 0,
        }
    }

    /// Start a load for `trigger`
    ///
    /// Returns `None` when the screen is unmounted or the trigger does not
    /// ask for a reload.
    pub fn begin(&mut self, trigger: Trigger) -> Option<LoadTicket> {
        if !self.mounted || !trigger.should_reload() {
            return None;
        }
        self.generation += 1;
        self.loading = true;
        self.refreshing = trigger == Trigger::PullToRefresh;
        self.error = None;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    fn accepts(&self, ticket: LoadTicket) -> bool {
        self.mounted && ticket.generation == self.generation
    }

    fn finish(&mut self) {
        self.loading = false;
        self.refreshing = false;
    }

    /// Apply the outcome of the load identified by `ticket`
    ///
    /// A 401/403 clears `session` and puts the screen into the signed-out
    /// state. Any other failure records an error and keeps previous data.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        result: Result<T, ApiError>,
        session: &Session,
    ) -> Applied {
        if !self.accepts(ticket) {
            return Applied::Discarded;
        }
        self.finish();
        match result {
            Ok(data) => {
                self.set_data(data);
                Applied::Updated
            }
            Err(e) if e.is_auth_failure() => {
                self.sign_out(session);
                Applied::SignedOut
            }
            Err(e) => {
                tracing::warn!("Load failed: {e}");
                self.error = Some(e.user_message());
                Applied::Failed
            }
        }
    }

    /// Like [`ViewState::apply`], but show `placeholder(&error)` on
    /// non-authentication failures
    pub fn apply_or_placeholder(
        &mut self,
        ticket: LoadTicket,
        result: Result<T, ApiError>,
        session: &Session,
        placeholder: impl FnOnce(&ApiError) -> T,
    ) -> Applied {
        match result {
            Err(e) if !e.is_auth_failure() && self.accepts(ticket) => {
                self.finish();
                tracing::warn!("Load failed, showing placeholder: {e}");
                self.data = Some(placeholder(&e));
                self.error = Some(e.user_message());
                Applied::Placeholder
            }
            other => self.apply(ticket, other, session),
        }
    }

    /// Record the failure of a user action (like, comment, save, delete)
    ///
    /// A 401/403 clears `session` and signs the screen out; anything else
    /// becomes the error notice and data is kept.
    pub fn fail(&mut self, error: &ApiError, session: &Session) -> Applied {
        if error.is_auth_failure() {
            self.sign_out(session);
            Applied::SignedOut
        } else {
            tracing::warn!("Action failed: {error}");
            self.error = Some(error.user_message());
            Applied::Failed
        }
    }

    fn sign_out(&mut self, session: &Session) {
        if let Err(e) = session.clear() {
            tracing::warn!("Failed to clear session: {e}");
        }
        self.mark_signed_out();
    }

    /// Drop data and enter the signed-out state; in-flight results are
    /// discarded
    pub fn mark_signed_out(&mut self) {
        self.generation += 1;
        self.finish();
        self.data = None;
        self.error = None;
        self.signed_out = true;
    }

    /// Replace data directly (e.g. after a local mutation)
    pub fn set_data(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.signed_out = false;
    }

    /// Mutable access to current data
    pub const fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// Record a notice without touching data
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Hide the current error notice
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Mark the screen as gone; in-flight results will be discarded
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.finish();
    }

    /// Mark the screen as shown again
    pub const fn mount(&mut self) {
        self.mounted = true;
    }

    /// Current data
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Current error notice
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a load is in flight
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the in-flight load came from pull-to-refresh
    pub const fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Whether the last load found the credential rejected
    pub const fn is_signed_out(&self) -> bool {
        self.signed_out
    }

    /// Whether the screen is mounted
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn http(status: StatusCode) -> ApiError {
        ApiError::Http {
            status,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_loading_then_success() {
        let session = Session::in_memory();
        let mut state = ViewState::new();
        let ticket = state.begin(Trigger::Mount).unwrap();
        assert!(state.is_loading());
        assert!(!state.is_refreshing());

        assert_eq!(state.apply(ticket, Ok(vec![1, 2]), &session), Applied::Updated);
        assert!(!state.is_loading());
        assert_eq!(state.data(), Some(&vec![1, 2]));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let session = Session::in_memory();
        let mut state = ViewState::new();
        let ticket = state.begin(Trigger::Mount).unwrap();
        let _ = state.apply(ticket, Ok("old"), &session);

        let ticket = state.begin(Trigger::PullToRefresh).unwrap();
        assert!(state.is_refreshing());
        let applied = state.apply(ticket, Err(http(StatusCode::INTERNAL_SERVER_ERROR)), &session);
        assert_eq!(applied, Applied::Failed);
        assert_eq!(state.data(), Some(&"old"));
        assert_eq!(state.error(), Some("boom"));

        state.dismiss_error();
        assert!(state.error().is_none());
    }

    #[test]
    fn test_auth_failure_clears_session() {
        let session = Session::in_memory();
        session.set_credential("stale").unwrap();

        let mut state: ViewState<u32> = ViewState::new();
        let ticket = state.begin(Trigger::Focus).unwrap();
        let applied = state.apply(ticket, Err(http(StatusCode::UNAUTHORIZED)), &session);

        assert_eq!(applied, Applied::SignedOut);
        assert!(state.is_signed_out());
        assert!(session.credential().is_none());
    }

    #[test]
    fn test_failed_action_signs_out_on_auth_failure() {
        let session = Session::in_memory();
        session.set_credential("stale").unwrap();
        let mut state = ViewState::new();
        let ticket = state.begin(Trigger::Mount).unwrap();
        let _ = state.apply(ticket, Ok("loaded"), &session);

        assert_eq!(
            state.fail(&http(StatusCode::INTERNAL_SERVER_ERROR), &session),
            Applied::Failed
        );
        assert_eq!(state.data(), Some(&"loaded"));
        assert_eq!(state.error(), Some("boom"));
        assert!(session.is_authenticated());

        assert_eq!(state.fail(&http(StatusCode::FORBIDDEN), &session), Applied::SignedOut);
        assert!(state.is_signed_out());
        assert!(state.data().is_none());
        assert!(session.credential().is_none());
    }

    #[test]
    fn test_unmounted_result_is_discarded() {
        let session = Session::in_memory();
        let mut state = ViewState::new();
        let ticket = state.begin(Trigger::Mount).unwrap();
        state.unmount();

        assert_eq!(state.apply(ticket, Ok(1), &session), Applied::Discarded);
        assert!(state.data().is_none());
        assert!(state.begin(Trigger::Focus).is_none());

        state.mount();
        assert!(state.begin(Trigger::Focus).is_some());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let session = Session::in_memory();
        let mut state = ViewState::new();
        let first = state.begin(Trigger::Mount).unwrap();
        let second = state.begin(Trigger::PullToRefresh).unwrap();

        assert_eq!(state.apply(second, Ok("new"), &session), Applied::Updated);
        assert_eq!(state.apply(first, Ok("old"), &session), Applied::Discarded);
        assert_eq!(state.data(), Some(&"new"));
    }

    #[test]
    fn test_navigation_back_without_refresh_is_ignored() {
        let mut state: ViewState<()> = ViewState::new();
        assert!(state.begin(Trigger::NavigationBack { refresh: false }).is_none());
        assert!(!state.is_loading());
        assert!(state.begin(Trigger::NavigationBack { refresh: true }).is_some());
    }

    #[test]
    fn test_placeholder_on_failure() {
        let session = Session::in_memory();
        let mut state = ViewState::new();
        let ticket = state.begin(Trigger::Mount).unwrap();
        let applied = state.apply_or_placeholder(
            ticket,
            Err(http(StatusCode::BAD_GATEWAY)),
            &session,
            |_| "placeholder",
        );
        assert_eq!(applied, Applied::Placeholder);
        assert_eq!(state.data(), Some(&"placeholder"));
        assert!(state.error().is_some());

        // Authentication failures never get a placeholder
        let ticket = state.begin(Trigger::Focus).unwrap();
        let applied = state.apply_or_placeholder(
            ticket,
            Err(http(StatusCode::FORBIDDEN)),
            &session,
            |_| "placeholder",
        );
        assert_eq!(applied, Applied::SignedOut);
        assert!(state.data().is_none());
    }
}
