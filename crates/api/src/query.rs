//! Query-string parameter types for the listing endpoints.
//!
//! Each struct converts itself into a [`ListQuery`]. Whether the visibility
//! gate applies is decided by the caller (see
//! [`Identity::visibility_only`](crate::middleware::auth::Identity::visibility_only)).

use std::str::FromStr;

use cityguide_core::pagination::PageRequest;
use cityguide_core::search::normalize_term;
use cityguide_db::listing::ListQuery;
use serde::{Deserialize, Deserializer};

/// Numeric parameter that falls back to its default when empty or not a
/// number, so `?page=` behaves like an absent `page`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok()))
}

/// Flag parameter: empty means absent, otherwise only `true` (any case) is true.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.eq_ignore_ascii_case("true")))
}

/// `?page=&per_page=&category=&approved_only=&search=`
#[derive(Debug, Default, Deserialize)]
pub struct CompanyListParams {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub per_page: Option<i64>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub approved_only: Option<bool>,
    pub search: Option<String>,
}

impl CompanyListParams {
    pub fn into_query(self, visibility_only: bool) -> ListQuery {
        ListQuery::new(PageRequest::new(self.page, self.per_page), visibility_only)
            .equals("category", normalize_term(self.category))
            .search(normalize_term(self.search))
    }
}

/// `?page=&per_page=&category=&contract_type=&location=&active_only=&search=`
#[derive(Debug, Default, Deserialize)]
pub struct JobListParams {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub per_page: Option<i64>,
    pub category: Option<String>,
    pub contract_type: Option<String>,
    /// Substring match.
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub active_only: Option<bool>,
    pub search: Option<String>,
}

impl JobListParams {
    pub fn into_query(self, visibility_only: bool) -> ListQuery {
        ListQuery::new(PageRequest::new(self.page, self.per_page), visibility_only)
            .equals("category", normalize_term(self.category))
            .equals("contract_type", normalize_term(self.contract_type))
            .contains("location", normalize_term(self.location))
            .search(normalize_term(self.search))
    }
}

/// `?page=&per_page=&property_type=&purpose=&neighborhood=&min_price=&max_price=&active_only=&search=`
#[derive(Debug, Default, Deserialize)]
pub struct PropertyListParams {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub per_page: Option<i64>,
    pub property_type: Option<String>,
    pub purpose: Option<String>,
    /// Substring match.
    pub neighborhood: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub active_only: Option<bool>,
    pub search: Option<String>,
}

impl PropertyListParams {
    pub fn into_query(self, visibility_only: bool) -> ListQuery {
        ListQuery::new(PageRequest::new(self.page, self.per_page), visibility_only)
            .equals("property_type", normalize_term(self.property_type))
            .equals("purpose", normalize_term(self.purpose))
            .contains("neighborhood", normalize_term(self.neighborhood))
            .between("price", self.min_price, self.max_price)
            .search(normalize_term(self.search))
    }
}

/// `?page=&per_page=&category=&published_only=&search=`
#[derive(Debug, Default, Deserialize)]
pub struct NewsListParams {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub per_page: Option<i64>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub published_only: Option<bool>,
    pub search: Option<String>,
}

impl NewsListParams {
    pub fn into_query(self, visibility_only: bool) -> ListQuery {
        ListQuery::new(PageRequest::new(self.page, self.per_page), visibility_only)
            .equals("category", normalize_term(self.category))
            .search(normalize_term(self.search))
    }
}

#[cfg(test)]
mod tests {
    use cityguide_db::listing::Filter;

    use super::*;

    #[test]
    fn empty_strings_are_not_filters() {
        let params = CompanyListParams {
            category: Some(String::new()),
            search: Some(String::new()),
            ..Default::default()
        };
        let query = params.into_query(true);
        assert!(query.filters.is_empty());
        assert!(query.search.is_none());
        assert!(query.visibility_only);
    }

    #[test]
    fn property_filters_combine() {
        let params = PropertyListParams {
            purpose: Some("venda".into()),
            neighborhood: Some("Centro".into()),
            min_price: Some(1000.0),
            max_price: Some(5000.0),
            ..Default::default()
        };
        let query = params.into_query(false);
        assert_eq!(
            query.filters,
            vec![
                Filter::Equals("purpose", "venda".into()),
                Filter::Contains("neighborhood", "Centro".into()),
                Filter::AtLeast("price", 1000.0),
                Filter::AtMost("price", 5000.0),
            ]
        );
    }

    fn parse<T: serde::de::DeserializeOwned>(qs: &str) -> T {
        let uri: axum::http::Uri = format!("/list?{qs}").parse().unwrap();
        axum::extract::Query::<T>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let params: CompanyListParams =
            parse("page=&per_page=&category=&approved_only=&search=");
        assert_eq!(params.page, None);
        assert_eq!(params.per_page, None);
        assert_eq!(params.approved_only, None);
        let query = params.into_query(true);
        assert_eq!(query.page.page(), 1);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn unparsable_numbers_are_ignored() {
        let params: PropertyListParams = parse("page=abc&min_price=cheap&max_price=900");
        assert_eq!(params.page, None);
        assert_eq!(params.min_price, None);
        assert_eq!(params.max_price, Some(900.0));
    }

    #[test]
    fn flags_accept_any_case() {
        let params: JobListParams = parse("active_only=True");
        assert_eq!(params.active_only, Some(true));
        let params: NewsListParams = parse("published_only=no");
        assert_eq!(params.published_only, Some(false));
    }

    #[test]
    fn job_location_is_substring() {
        let params = JobListParams {
            location: Some("Centro".into()),
            ..Default::default()
        };
        assert_eq!(
            params.into_query(true).filters,
            vec![Filter::Contains("location", "Centro".into())]
        );
    }

    #[test]
    fn paging_is_normalized() {
        let params = NewsListParams {
            page: Some(0),
            per_page: Some(500),
            ..Default::default()
        };
        let query = params.into_query(true);
        assert_eq!(query.page.page(), 1);
        assert_eq!(query.page.per_page(), 100);
    }
}
