//! Generic filtered/paginated listing over any table that implements
//! [`Listable`].
//!
//! A listing is built from four independent parts:
//!
//! 1. the visibility gate (`approved` / `active` / `published = TRUE`),
//! 2. field filters, all combined with `AND`,
//! 3. an optional free-text search, `OR`-ed across the table's search columns,
//! 4. ordering: `featured DESC` first when the table has that flag, then
//!    `created_at DESC, id DESC`.
//!
//! The row count and the page slice are read inside one `REPEATABLE READ`
//! transaction so `total` always describes the same snapshot as `items`.

use cityguide_core::moderation::VisibilityFlag;
use cityguide_core::pagination::{Page, PageRequest};
use cityguide_core::search::contains_pattern;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// A table the listing engine can page through.
pub trait Listable: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Backing table name.
    const TABLE: &'static str;
    /// Column list selected for each row.
    const COLUMNS: &'static str;
    /// Flag that gates anonymous visibility.
    const VISIBILITY: VisibilityFlag;
    /// Free-text columns matched by `search`.
    const SEARCH_COLUMNS: &'static [&'static str];
    /// Whether rows carry a `featured` flag that sorts them first.
    const HAS_FEATURED: bool;
}

/// A single field filter. Column names are always static identifiers, never
/// caller input.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Equals(&'static str, String),
    /// `column LIKE %value%` with wildcards in `value` matched literally.
    Contains(&'static str, String),
    /// `column >= value`
    AtLeast(&'static str, f64),
    /// `column <= value`
    AtMost(&'static str, f64),
}

/// Everything that shapes one listing request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: PageRequest,
    pub visibility_only: bool,
    pub filters: Vec<Filter>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: PageRequest, visibility_only: bool) -> Self {
        Self {
            page,
            visibility_only,
            filters: Vec::new(),
            search: None,
        }
    }

    /// Add an exact-match filter when `value` is present.
    pub fn equals(mut self, column: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.filters.push(Filter::Equals(column, value));
        }
        self
    }

    /// Add a substring filter when `value` is present.
    pub fn contains(mut self, column: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.filters.push(Filter::Contains(column, value));
        }
        self
    }

    /// Add inclusive numeric bounds; either side may be absent.
    pub fn between(mut self, column: &'static str, min: Option<f64>, max: Option<f64>) -> Self {
        if let Some(min) = min {
            self.filters.push(Filter::AtLeast(column, min));
        }
        if let Some(max) = max {
            self.filters.push(Filter::AtMost(column, max));
        }
        self
    }

    pub fn search(mut self, term: Option<String>) -> Self {
        self.search = term;
        self
    }
}

fn push_where<T: Listable>(builder: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    builder.push(" WHERE TRUE");

    if query.visibility_only {
        builder.push(format_args!(" AND {} = TRUE", T::VISIBILITY.column()));
    }

    for filter in &query.filters {
        match filter {
            Filter::Equals(column, value) => {
                builder.push(format_args!(" AND {column} = "));
                builder.push_bind(value.clone());
            }
            Filter::Contains(column, value) => {
                builder.push(format_args!(" AND {column} LIKE "));
                builder.push_bind(contains_pattern(value));
                builder.push(" ESCAPE '\\'");
            }
            Filter::AtLeast(column, value) => {
                builder.push(format_args!(" AND {column} >= "));
                builder.push_bind(*value);
            }
            Filter::AtMost(column, value) => {
                builder.push(format_args!(" AND {column} <= "));
                builder.push_bind(*value);
            }
        }
    }

    if let Some(term) = &query.search {
        if !T::SEARCH_COLUMNS.is_empty() {
            let pattern = contains_pattern(term);
            builder.push(" AND (");
            for (i, column) in T::SEARCH_COLUMNS.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                builder.push(format_args!("{column} LIKE "));
                builder.push_bind(pattern.clone());
                builder.push(" ESCAPE '\\'");
            }
            builder.push(")");
        }
    }
}

/// `ORDER BY` clause for `T`.
pub fn order_clause<T: Listable>() -> &'static str {
    if T::HAS_FEATURED {
        " ORDER BY featured DESC, created_at DESC, id DESC"
    } else {
        " ORDER BY created_at DESC, id DESC"
    }
}

/// Count and fetch one page of `T` matching `query`.
pub async fn fetch_page<T: Listable>(
    pool: &PgPool,
    query: &ListQuery,
) -> Result<Page<T>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
        .execute(&mut *tx)
        .await?;

    let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", T::TABLE));
    push_where::<T>(&mut count, query);
    let total: i64 = count.build_query_scalar().fetch_one(&mut *tx).await?;

    let mut select =
        QueryBuilder::<Postgres>::new(format!("SELECT {} FROM {}", T::COLUMNS, T::TABLE));
    push_where::<T>(&mut select, query);
    select.push(order_clause::<T>());
    select.push(" LIMIT ");
    select.push_bind(query.page.limit());
    select.push(" OFFSET ");
    select.push_bind(query.page.offset());
    let items = select.build_query_as::<T>().fetch_all(&mut *tx).await?;

    tx.commit().await?;
    Ok(Page::new(items, total, query.page))
}
