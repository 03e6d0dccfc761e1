use time::{Date, OffsetDateTime, macros::format_description};
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{
        AdminReport, CategoryEngagement, FavoritesReport, FavoritesWindowQuery,
        FilteredOffersQuery, OfferLikes, ReportPeriod, StatsSummary, UserFavoriteCount,
    },
    repository::{OfferFilter, ReportRepository},
};

pub const SUMMARY_TOP_OFFERS: i64 = 5;
pub const TOP_USERS_LIMIT: i64 = 5;
pub const FILTERED_OFFERS_LIMIT: i64 = 20;

/// Read-only rollups over offers, favorites and comments.
///
/// Queries run on the shared pool without locks and may observe a snapshot
/// that is slightly behind concurrent favorites.
#[derive(Clone)]
pub struct ReportingService {
    report_repo: ReportRepository,
}

impl ReportingService {
    pub fn new(report_repo: ReportRepository) -> Self {
        Self { report_repo }
    }

    #[instrument(name = "report.top_offers_by_likes", skip(self))]
    pub async fn top_offers_by_likes(&self, n: i64) -> AppResult<Vec<OfferLikes>> {
        Ok(self.report_repo.top_offers_by_likes(n.max(0)).await?)
    }

    #[instrument(name = "report.top_users_by_favorites", skip(self))]
    pub async fn top_users_by_favorites(&self, n: i64) -> AppResult<Vec<UserFavoriteCount>> {
        Ok(self.report_repo.top_users_by_favorites(n.max(0)).await?)
    }

    /// Both dates are inclusive calendar days in UTC.
    #[instrument(name = "report.favorites_in_window", skip(self))]
    pub async fn favorites_in_window(&self, start: Date, end: Date) -> AppResult<FavoritesReport> {
        let (from, until) = window_bounds(start, end)?;

        let favorites: Vec<_> = self
            .report_repo
            .favorites_between(from, until)
            .await?
            .into_iter()
            .filter_map(|row| row.into_entry())
            .collect();

        Ok(FavoritesReport {
            total_favorites: favorites.len(),
            period: ReportPeriod::new(start, end),
            favorites,
        })
    }

    #[instrument(name = "report.stats_summary", skip(self))]
    pub async fn stats_summary(&self) -> AppResult<StatsSummary> {
        let total_users = self.report_repo.count_users().await?;
        let total_offers = self.report_repo.count_offers().await?;
        let total_favorites = self.report_repo.count_favorites().await?;
        let featured_offers = self.report_repo.featured_offers().await?;
        let most_liked_offers = self
            .report_repo
            .top_offers_by_likes(SUMMARY_TOP_OFFERS)
            .await?;

        Ok(StatsSummary {
            total_users,
            total_offers,
            total_favorites,
            featured_offers,
            most_liked_offers,
        })
    }

    #[instrument(name = "report.admin_report", skip(self))]
    pub async fn admin_report(&self) -> AppResult<AdminReport> {
        Ok(AdminReport {
            total_users: self.report_repo.count_users().await?,
            total_offers: self.report_repo.count_offers().await?,
            top_offers: self
                .report_repo
                .top_offers_by_likes(SUMMARY_TOP_OFFERS)
                .await?,
        })
    }

    #[instrument(name = "report.filtered_offers", skip(self))]
    pub async fn filtered_offers(&self, query: FilteredOffersQuery) -> AppResult<Vec<OfferLikes>> {
        let created_from = query
            .created_from
            .as_deref()
            .map(|raw| parse_date("created_from", raw))
            .transpose()?
            .map(start_of_day);

        let created_before = query
            .created_to
            .as_deref()
            .map(|raw| parse_date("created_to", raw))
            .transpose()?
            .map(day_after)
            .transpose()?;

        let store = non_blank(query.store.as_deref()).map(escape_like);

        let filter = OfferFilter {
            store: store.as_deref(),
            category: non_blank(query.category.as_deref()),
            created_from,
            created_before,
            limit: FILTERED_OFFERS_LIMIT,
        };

        Ok(self.report_repo.filtered_offers(&filter).await?)
    }

    #[instrument(name = "report.category_engagement", skip(self))]
    pub async fn category_engagement(&self) -> AppResult<Vec<CategoryEngagement>> {
        Ok(self.report_repo.category_engagement().await?)
    }

    #[instrument(name = "report.category_csv", skip(self))]
    pub async fn category_csv(&self) -> AppResult<String> {
        let categories = self.report_repo.category_engagement().await?;
        Ok(render_category_csv(&categories))
    }
}

/// Validates the `start`/`end` query pair of the favorites report.
pub fn parse_window(query: &FavoritesWindowQuery) -> AppResult<(Date, Date)> {
    let (Some(start), Some(end)) = (query.start.as_deref(), query.end.as_deref()) else {
        return Err(AppError::Validation(
            "Both start and end dates are required (YYYY-MM-DD)".to_string(),
        ));
    };

    let start = parse_date("start", start)?;
    let end = parse_date("end", end)?;

    if start > end {
        return Err(AppError::Validation(
            "start must not be after end".to_string(),
        ));
    }

    Ok((start, end))
}

fn parse_date(field: &str, raw: &str) -> AppResult<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        AppError::Validation(format!("Invalid {field} date, expected YYYY-MM-DD"))
    })
}

fn start_of_day(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

fn day_after(date: Date) -> AppResult<OffsetDateTime> {
    date.next_day()
        .map(start_of_day)
        .ok_or(AppError::Validation("Date out of range".to_string()))
}

/// Half-open `[start 00:00, end + 1 day 00:00)` range covering both days.
fn window_bounds(start: Date, end: Date) -> AppResult<(OffsetDateTime, OffsetDateTime)> {
    Ok((start_of_day(start), day_after(end)?))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Escapes `ILIKE` metacharacters so the store filter matches literally.
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub fn render_category_csv(categories: &[CategoryEngagement]) -> String {
    let mut out = String::from("category,favorites,comments\n");
    for row in categories {
        out.push_str(&csv_field(&row.category));
        out.push(',');
        out.push_str(&row.favorites.to_string());
        out.push(',');
        out.push_str(&row.comments.to_string());
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn window(start: Option<&str>, end: Option<&str>) -> FavoritesWindowQuery {
        FavoritesWindowQuery {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_window_valid() {
        let (start, end) =
            parse_window(&window(Some("2024-01-01"), Some("2024-01-31"))).expect("valid window");
        assert_eq!(start, date!(2024 - 01 - 01));
        assert_eq!(end, date!(2024 - 01 - 31));
    }

    #[test]
    fn test_parse_window_same_day() {
        assert!(parse_window(&window(Some("2024-02-10"), Some("2024-02-10"))).is_ok());
    }

    #[test]
    fn test_parse_window_missing_dates() {
        assert!(matches!(
            parse_window(&window(Some("2024-01-01"), None)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_window(&window(None, None)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_window_rejects_bad_format_and_order() {
        assert!(matches!(
            parse_window(&window(Some("01/02/2024"), Some("2024-02-10"))),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_window(&window(Some("2024-03-01"), Some("2024-02-01"))),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_window_bounds_include_whole_end_day() {
        let (from, until) =
            window_bounds(date!(2024 - 01 - 01), date!(2024 - 01 - 31)).expect("in range");
        assert_eq!(from, datetime!(2024-01-01 00:00:00 UTC));
        assert_eq!(until, datetime!(2024-02-01 00:00:00 UTC));

        let late_on_end_day = datetime!(2024-01-31 23:59:59 UTC);
        assert!(late_on_end_day >= from && late_on_end_day < until);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Loja ")), Some("Loja"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("MegaStore"), "MegaStore");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_render_category_csv() {
        let csv = render_category_csv(&[
            CategoryEngagement {
                category: "Eletrônicos".to_string(),
                favorites: 42,
                comments: 18,
            },
            CategoryEngagement {
                category: "Casa, Jardim".to_string(),
                favorites: 3,
                comments: 0,
            },
        ]);

        assert_eq!(
            csv,
            "category,favorites,comments\nEletrônicos,42,18\n\"Casa, Jardim\",3,0\n"
        );
    }

    #[test]
    fn test_csv_field_escapes_quotes() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }
}
