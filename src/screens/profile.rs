//! Profile: user details plus aggregated activity counts

use super::{Applied, Trigger, ViewState};
use crate::api::{ApiClient, ApiError};
use crate::models::{ProfileStats, ProfileUpdate, User};

/// Count the user's activity by fetching each listing in turn
pub async fn aggregate_stats(api: &ApiClient) -> Result<ProfileStats, ApiError> {
    let articles = api.user_articles().await?.len();
    let likes = api.user_likes().await?.len();
    let comments = api.user_comments().await?.len();
    let favorites = api.favorite_articles().await?.len();
    Ok(ProfileStats {
        articles,
        likes,
        comments,
        favorites,
    })
}

/// State of the profile screen
#[derive(Debug, Default)]
pub struct ProfileScreen {
    /// The signed-in user
    pub user: ViewState<User>,
    /// Activity counts
    pub stats: ProfileStats,
}

impl ProfileScreen {
    /// Empty screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the profile, then the activity counts
    ///
    /// If aggregation fails the counts embedded in the profile are shown.
    pub async fn refresh(&mut self, api: &ApiClient, trigger: Trigger) -> Applied {
        let Some(ticket) = self.user.begin(trigger) else {
            return Applied::Discarded;
        };
        let applied = self
            .user
            .apply(ticket, api.get_profile().await, api.session());
        if applied != Applied::Updated {
            return applied;
        }

        self.stats = match aggregate_stats(api).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!("Failed to aggregate profile statistics: {e}");
                self.user.data().map(ProfileStats::from_user).unwrap_or_default()
            }
        };
        applied
    }

    /// Save profile changes and show the updated user
    pub async fn save(&mut self, api: &ApiClient, update: &ProfileUpdate) -> Result<(), ApiError> {
        match api.update_profile(update).await {
            Ok(user) => {
                self.user.set_data(user);
                Ok(())
            }
            Err(e) => {
                if self.user.fail(&e, api.session()) == Applied::SignedOut {
                    self.stats = ProfileStats::default();
                }
                Err(e)
            }
        }
    }

    /// Sign out; the screen ends up in the signed-out state
    pub fn logout(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let result = api.logout();
        // Leave the screen regardless of whether storage could be cleared
        self.user.mark_signed_out();
        self.stats = ProfileStats::default();
        result
    }

    /// Whether there is no signed-in user to show
    pub const fn is_signed_out(&self) -> bool {
        self.user.is_signed_out()
    }
}
