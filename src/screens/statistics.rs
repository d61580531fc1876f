//! Publishing statistics: articles per week and AI analytics

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use super::{Applied, Trigger, ViewState};
use crate::api::{ApiClient, ApiError};
use crate::models::{AnalyticsReport, Article};

/// Number of weeks shown
pub const WEEKS_SHOWN: usize = 8;

/// Period sent with analytics requests
pub const ANALYTICS_PERIOD: &str = "all_time";

/// Articles published in one Monday-to-Sunday week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBucket {
    /// Monday of the week
    pub start: NaiveDate,
    /// Articles created that week
    pub count: usize,
}

impl WeekBucket {
    /// Sunday of the week
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    /// Label such as `Oct 06-Oct 12`
    pub fn label(&self) -> String {
        format!("{}-{}", self.start.format("%b %d"), self.end().format("%b %d"))
    }
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The [`WEEKS_SHOWN`] weeks ending with the week of `today`, all empty
pub fn empty_weeks(today: NaiveDate) -> Vec<WeekBucket> {
    let current = week_start(today);
    (0..WEEKS_SHOWN)
        .rev()
        .map(|back| WeekBucket {
            start: current - Duration::weeks(back as i64),
            count: 0,
        })
        .collect()
}

/// Articles per week, oldest week first, limited to the most recent
/// [`WEEKS_SHOWN`] weeks that had any articles
///
/// With no dated articles the result is [`empty_weeks`].
pub fn weekly_counts(articles: &[Article], today: NaiveDate) -> Vec<WeekBucket> {
    let mut by_week: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for created in articles.iter().filter_map(|a| a.created_at) {
        *by_week.entry(week_start(created.date_naive())).or_default() += 1;
    }

    if by_week.is_empty() {
        return empty_weeks(today);
    }

    let skip = by_week.len().saturating_sub(WEEKS_SHOWN);
    by_week
        .into_iter()
        .skip(skip)
        .map(|(start, count)| WeekBucket { start, count })
        .collect()
}

/// Totals shown under the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklySummary {
    /// Articles across the shown weeks
    pub total: usize,
    /// Week with the most articles (earliest on ties)
    pub busiest: Option<WeekBucket>,
    /// Mean articles per shown week
    pub average: f64,
}

/// Summarise the shown weeks
pub fn summarize(weeks: &[WeekBucket]) -> WeeklySummary {
    let total: usize = weeks.iter().map(|w| w.count).sum();
    let busiest = weeks
        .iter()
        .copied()
        .filter(|w| w.count > 0)
        .fold(None, |best: Option<WeekBucket>, week| match best {
            Some(b) if b.count >= week.count => Some(b),
            _ => Some(week),
        });
    let average = if weeks.is_empty() {
        0.0
    } else {
        total as f64 / weeks.len() as f64
    };
    WeeklySummary {
        total,
        busiest,
        average,
    }
}

/// State of the statistics screen
#[derive(Debug, Default)]
pub struct StatisticsScreen {
    /// Weekly article counts
    pub weeks: ViewState<Vec<WeekBucket>>,
}

impl StatisticsScreen {
    /// Empty screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the user's articles and bucket them by week
    ///
    /// On failure the chart shows empty weeks.
    pub async fn refresh(&mut self, api: &ApiClient, trigger: Trigger, today: NaiveDate) -> Applied {
        let Some(ticket) = self.weeks.begin(trigger) else {
            return Applied::Discarded;
        };
        let result = api
            .user_articles()
            .await
            .map(|articles| weekly_counts(&articles, today));
        self.weeks
            .apply_or_placeholder(ticket, result, api.session(), |_| empty_weeks(today))
    }

    /// Summary of the loaded weeks
    pub fn summary(&self) -> WeeklySummary {
        summarize(self.weeks.data().map(Vec::as_slice).unwrap_or_default())
    }
}

/// Run AI analytics over all of the user's articles
///
/// Returns the number of articles analysed along with the report.
pub async fn ai_analytics(api: &ApiClient) -> Result<(usize, AnalyticsReport), ApiError> {
    let articles = api.user_articles().await?;
    let report = api.analytics(&articles, ANALYTICS_PERIOD).await?;
    Ok((articles.len(), report))
}
