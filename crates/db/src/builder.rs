//! Parameterized statement construction for the `manhwas` table.
//!
//! Clause text is assembled only from the fixed templates in this module.
//! Caller-supplied values always travel as [`BindValue`]s; a template's
//! `{param}` token is replaced with the positional placeholder (`$n`) of the
//! value bound alongside it.

use manhwa_core::catalog::{
    clamp_page, clamp_page_size, normalize_search_term, page_offset, substring_pattern,
};
use manhwa_core::types::{Date, EntryId, Timestamp};
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

use crate::error::DbError;
use crate::models::manhwa::{
    dedup_genres, CreateManhwa, Genre, ManhwaFilter, ManhwaStatus, UpdateManhwa,
};

// ---------------------------------------------------------------------------
// Column lists and clause templates
// ---------------------------------------------------------------------------

/// Column list shared by every SELECT and RETURNING clause.
pub const COLUMNS: &str = "\
    id, title, description, author, cover_image, genres, status, \
    chapter_count, release_date, last_update, rating, view_count, \
    is_active, created_at, updated_at";

const PARAM: &str = "{param}";

const ACTIVE_CLAUSE: &str = "is_active = TRUE";
const SEARCH_CLAUSE: &str =
    "(title ILIKE {param} OR description ILIKE {param} OR author ILIKE {param})";
const GENRE_CLAUSE: &str = "{param} = ANY(genres)";
const STATUS_CLAUSE: &str = "status = {param}";

const LIST_ORDER: &str = "last_update DESC, id ASC";
const TOP_RATED_ORDER: &str = "rating DESC, view_count DESC, id ASC";

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built statements.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Id(EntryId),
    Text(String),
    Genre(Genre),
    Genres(Vec<Genre>),
    Status(ManhwaStatus),
    Int(i32),
    BigInt(i64),
    Date(Date),
    Timestamp(Timestamp),
}

/// SQL text plus its positional bind values (`$1` is `binds[0]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

impl Statement {
    /// Encode the bind values into a fresh argument buffer.
    pub fn arguments(&self) -> Result<PgArguments, DbError> {
        let mut args = PgArguments::default();
        for value in &self.binds {
            let added = match value {
                BindValue::Id(v) => Arguments::add(&mut args, v),
                BindValue::Text(v) => Arguments::add(&mut args, v.as_str()),
                BindValue::Genre(v) => Arguments::add(&mut args, v),
                BindValue::Genres(v) => Arguments::add(&mut args, v),
                BindValue::Status(v) => Arguments::add(&mut args, v),
                BindValue::Int(v) => Arguments::add(&mut args, v),
                BindValue::BigInt(v) => Arguments::add(&mut args, v),
                BindValue::Date(v) => Arguments::add(&mut args, v),
                BindValue::Timestamp(v) => Arguments::add(&mut args, v),
            };
            added.map_err(|e| DbError::Persistence(sqlx::Error::Encode(e)))?;
        }
        Ok(args)
    }
}

/// A count statement and a page statement sharing one predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub count: Statement,
    pub page: Statement,
    /// Clamped page number echoed in the envelope.
    pub page_number: i64,
    /// Clamped page size echoed in the envelope.
    pub page_size: i64,
}

/// Fixed-order views over all active entries, always served as page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuratedView {
    /// Highest rating first, ties broken by view count.
    TopRated,
    /// Most recently updated first.
    RecentlyUpdated,
}

impl CuratedView {
    fn order_by(self) -> &'static str {
        match self {
            CuratedView::TopRated => TOP_RATED_ORDER,
            CuratedView::RecentlyUpdated => LIST_ORDER,
        }
    }
}

// ---------------------------------------------------------------------------
// Clause accumulation
// ---------------------------------------------------------------------------

/// An optional value paired with the clause template it activates.
type Rule = (Option<BindValue>, &'static str);

/// Clause fragments and bind values accumulated together so that placeholder
/// numbers always match bind positions.
#[derive(Debug, Default)]
struct ClauseSet {
    clauses: Vec<String>,
    binds: Vec<BindValue>,
}

impl ClauseSet {
    /// Append a clause that takes no parameter.
    fn fixed(mut self, clause: &'static str) -> Self {
        self.clauses.push(clause.to_string());
        self
    }

    /// Append `template` with its `{param}` tokens bound to `value`.
    fn bind(mut self, template: &'static str, value: BindValue) -> Self {
        let placeholder = self.next_placeholder();
        self.clauses.push(template.replace(PARAM, &placeholder));
        self.binds.push(value);
        self
    }

    /// Fold step: apply a rule only when its value is present.
    fn apply(self, (value, template): Rule) -> Self {
        match value {
            Some(value) => self.bind(template, value),
            None => self,
        }
    }

    fn next_placeholder(&self) -> String {
        format!("${}", self.binds.len() + 1)
    }

    fn join(&self, separator: &str) -> String {
        self.clauses.join(separator)
    }
}

// ---------------------------------------------------------------------------
// Read queries
// ---------------------------------------------------------------------------

/// Build the count + page statements for a filtered listing.
///
/// Results are ordered by `last_update` descending.
pub fn build_list_query(filter: &ManhwaFilter) -> PageQuery {
    let page_number = clamp_page(filter.page);
    let page_size = clamp_page_size(filter.page_size);

    let rules: [Rule; 3] = [
        (
            normalize_search_term(filter.search_term.as_deref())
                .map(|term| BindValue::Text(substring_pattern(term))),
            SEARCH_CLAUSE,
        ),
        (filter.genre.map(BindValue::Genre), GENRE_CLAUSE),
        (filter.status.map(BindValue::Status), STATUS_CLAUSE),
    ];

    let predicate = rules
        .into_iter()
        .fold(ClauseSet::default().fixed(ACTIVE_CLAUSE), ClauseSet::apply);

    paged(
        predicate,
        LIST_ORDER,
        page_number,
        page_size,
        page_offset(page_number, page_size),
    )
}

/// Build the count + page statements for a curated view.
pub fn build_curated_query(view: CuratedView, limit: Option<i64>) -> PageQuery {
    let page_size = clamp_page_size(limit);
    let predicate = ClauseSet::default().fixed(ACTIVE_CLAUSE);
    paged(predicate, view.order_by(), 1, page_size, 0)
}

fn paged(
    predicate: ClauseSet,
    order_by: &'static str,
    page_number: i64,
    page_size: i64,
    offset: i64,
) -> PageQuery {
    let where_clause = predicate.join(" AND ");

    let count = Statement {
        sql: format!("SELECT COUNT(*) FROM manhwas WHERE {where_clause}"),
        binds: predicate.binds.clone(),
    };

    let limit_idx = predicate.binds.len() + 1;
    let offset_idx = limit_idx + 1;
    let mut binds = predicate.binds;
    binds.push(BindValue::BigInt(page_size));
    binds.push(BindValue::BigInt(offset));

    let page = Statement {
        sql: format!(
            "SELECT {COLUMNS} FROM manhwas WHERE {where_clause} \
             ORDER BY {order_by} \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        ),
        binds,
    };

    PageQuery {
        count,
        page,
        page_number,
        page_size,
    }
}

// ---------------------------------------------------------------------------
// Write statements
// ---------------------------------------------------------------------------

/// Build the INSERT for a new entry.
///
/// `now` is bound once and used for both `last_update` and `created_at`.
pub fn build_insert(id: EntryId, input: &CreateManhwa, now: Timestamp) -> Statement {
    Statement {
        sql: format!(
            "INSERT INTO manhwas (id, title, description, author, cover_image, genres, status, \
             chapter_count, release_date, last_update, rating, view_count, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, 0, TRUE, $10) \
             RETURNING {COLUMNS}"
        ),
        binds: vec![
            BindValue::Id(id),
            BindValue::Text(input.title.clone()),
            BindValue::Text(input.description.clone()),
            BindValue::Text(input.author.clone()),
            BindValue::Text(input.cover_image.clone()),
            BindValue::Genres(dedup_genres(&input.genres)),
            BindValue::Status(input.status),
            BindValue::Int(input.chapter_count),
            BindValue::Date(input.release_date),
            BindValue::Timestamp(now),
        ],
    }
}

/// Build the sparse UPDATE for an active entry.
///
/// Only provided fields are assigned; `last_update` and `updated_at` are
/// always assigned, so an empty payload still produces a valid statement.
/// `last_update` never moves backwards.
pub fn build_update(id: EntryId, input: &UpdateManhwa, now: Timestamp) -> Statement {
    let rules: [Rule; 9] = [
        (provided_text(&input.title), "title = {param}"),
        (provided_text(&input.description), "description = {param}"),
        (provided_text(&input.author), "author = {param}"),
        (provided_text(&input.cover_image), "cover_image = {param}"),
        (
            input
                .genres
                .as_deref()
                .filter(|genres| !genres.is_empty())
                .map(|genres| BindValue::Genres(dedup_genres(genres))),
            "genres = {param}",
        ),
        (input.status.map(BindValue::Status), "status = {param}"),
        (input.chapter_count.map(BindValue::Int), "chapter_count = {param}"),
        (
            Some(BindValue::Timestamp(now)),
            "last_update = GREATEST(last_update, {param})",
        ),
        (Some(BindValue::Timestamp(now)), "updated_at = {param}"),
    ];

    let assignments = rules.into_iter().fold(ClauseSet::default(), ClauseSet::apply);
    let id_placeholder = assignments.next_placeholder();
    let sql = format!(
        "UPDATE manhwas SET {} WHERE id = {id_placeholder} AND is_active = TRUE RETURNING {COLUMNS}",
        assignments.join(", ")
    );

    let mut binds = assignments.binds;
    binds.push(BindValue::Id(id));
    Statement { sql, binds }
}

/// Empty strings count as "not provided".
fn provided_text(value: &Option<String>) -> Option<BindValue> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| BindValue::Text(v.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn entry_id() -> EntryId {
        EntryId::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef)
    }

    // -- build_list_query ----------------------------------------------------

    #[test]
    fn list_without_filters_only_checks_active() {
        let query = build_list_query(&ManhwaFilter::default());

        assert_eq!(
            query.count.sql,
            "SELECT COUNT(*) FROM manhwas WHERE is_active = TRUE"
        );
        assert!(query.count.binds.is_empty());
        assert!(query
            .page
            .sql
            .ends_with("WHERE is_active = TRUE ORDER BY last_update DESC, id ASC LIMIT $1 OFFSET $2"));
        assert_eq!(
            query.page.binds,
            vec![BindValue::BigInt(10), BindValue::BigInt(0)]
        );
        assert_eq!(query.page_number, 1);
        assert_eq!(query.page_size, 10);
    }

    #[test]
    fn list_with_all_filters_numbers_placeholders_in_order() {
        let filter = ManhwaFilter {
            page: Some(3),
            page_size: Some(20),
            search_term: Some("tower".to_string()),
            genre: Some(Genre::Fantasy),
            status: Some(ManhwaStatus::Ongoing),
        };
        let query = build_list_query(&filter);

        assert_eq!(
            query.count.sql,
            "SELECT COUNT(*) FROM manhwas WHERE is_active = TRUE \
             AND (title ILIKE $1 OR description ILIKE $1 OR author ILIKE $1) \
             AND $2 = ANY(genres) AND status = $3"
        );
        assert_eq!(
            query.count.binds,
            vec![
                BindValue::Text("%tower%".to_string()),
                BindValue::Genre(Genre::Fantasy),
                BindValue::Status(ManhwaStatus::Ongoing),
            ]
        );
        assert!(query.page.sql.ends_with("LIMIT $4 OFFSET $5"));
        assert_eq!(&query.page.binds[..3], &query.count.binds[..]);
        assert_eq!(
            &query.page.binds[3..],
            &[BindValue::BigInt(20), BindValue::BigInt(40)]
        );
    }

    #[test]
    fn list_skips_empty_search_term() {
        let filter = ManhwaFilter {
            search_term: Some(String::new()),
            status: Some(ManhwaStatus::Completed),
            ..Default::default()
        };
        let query = build_list_query(&filter);

        assert!(!query.count.sql.contains("ILIKE"));
        assert!(query.count.sql.ends_with("AND status = $1"));
        assert_eq!(
            query.count.binds,
            vec![BindValue::Status(ManhwaStatus::Completed)]
        );
    }

    #[test]
    fn search_term_whitespace_is_kept_in_pattern() {
        let filter = ManhwaFilter {
            search_term: Some(" of ".to_string()),
            ..Default::default()
        };
        let query = build_list_query(&filter);

        assert!(query.count.sql.contains("ILIKE $1"));
        assert_eq!(query.count.binds, vec![BindValue::Text("% of %".to_string())]);

        let filter = ManhwaFilter {
            search_term: Some("   ".to_string()),
            ..Default::default()
        };
        let query = build_list_query(&filter);
        assert_eq!(query.count.binds, vec![BindValue::Text("%   %".to_string())]);
    }

    #[test]
    fn search_term_never_reaches_clause_text() {
        let hostile = "x'; DROP TABLE manhwas; --";
        let filter = ManhwaFilter {
            search_term: Some(hostile.to_string()),
            ..Default::default()
        };
        let query = build_list_query(&filter);

        assert!(!query.count.sql.contains("DROP"));
        assert!(!query.page.sql.contains("DROP"));
        assert_eq!(
            query.count.binds,
            vec![BindValue::Text(format!("%{hostile}%"))]
        );
    }

    #[test]
    fn second_page_offsets_by_page_size() {
        let filter = ManhwaFilter {
            page: Some(2),
            page_size: Some(10),
            ..Default::default()
        };
        let query = build_list_query(&filter);

        assert_eq!(
            query.page.binds,
            vec![BindValue::BigInt(10), BindValue::BigInt(10)]
        );
    }

    #[test]
    fn out_of_range_paging_is_clamped_and_echoed() {
        let filter = ManhwaFilter {
            page: Some(0),
            page_size: Some(10_000),
            ..Default::default()
        };
        let query = build_list_query(&filter);

        assert_eq!(query.page_number, 1);
        assert_eq!(query.page_size, 100);
    }

    // -- build_curated_query -------------------------------------------------

    #[test]
    fn top_rated_orders_by_rating_then_views() {
        let query = build_curated_query(CuratedView::TopRated, Some(5));

        assert_eq!(
            query.count.sql,
            "SELECT COUNT(*) FROM manhwas WHERE is_active = TRUE"
        );
        assert!(query
            .page
            .sql
            .contains("ORDER BY rating DESC, view_count DESC, id ASC LIMIT $1 OFFSET $2"));
        assert_eq!(
            query.page.binds,
            vec![BindValue::BigInt(5), BindValue::BigInt(0)]
        );
        assert_eq!(query.page_number, 1);
        assert_eq!(query.page_size, 5);
    }

    #[test]
    fn recently_updated_orders_by_last_update() {
        let query = build_curated_query(CuratedView::RecentlyUpdated, None);

        assert!(query
            .page
            .sql
            .contains("ORDER BY last_update DESC, id ASC LIMIT $1"));
        assert_eq!(query.page_size, 10);
    }

    // -- build_update --------------------------------------------------------

    #[test]
    fn empty_update_touches_only_bookkeeping_fields() {
        let stmt = build_update(entry_id(), &UpdateManhwa::default(), now());

        assert_eq!(
            stmt.sql,
            format!(
                "UPDATE manhwas SET last_update = GREATEST(last_update, $1), updated_at = $2 \
                 WHERE id = $3 AND is_active = TRUE RETURNING {COLUMNS}"
            )
        );
        assert_eq!(
            stmt.binds,
            vec![
                BindValue::Timestamp(now()),
                BindValue::Timestamp(now()),
                BindValue::Id(entry_id()),
            ]
        );
    }

    #[test]
    fn empty_strings_and_lists_are_not_provided() {
        let input = UpdateManhwa {
            title: Some(String::new()),
            description: Some(String::new()),
            author: Some(String::new()),
            cover_image: Some(String::new()),
            genres: Some(Vec::new()),
            ..Default::default()
        };
        let stmt = build_update(entry_id(), &input, now());

        assert_eq!(stmt, build_update(entry_id(), &UpdateManhwa::default(), now()));
    }

    #[test]
    fn zero_chapter_count_is_provided() {
        let input = UpdateManhwa {
            chapter_count: Some(0),
            ..Default::default()
        };
        let stmt = build_update(entry_id(), &input, now());

        assert!(stmt.sql.starts_with("UPDATE manhwas SET chapter_count = $1, "));
        assert_eq!(stmt.binds[0], BindValue::Int(0));
        assert_eq!(stmt.binds.len(), 4);
    }

    #[test]
    fn full_update_assigns_fields_in_fixed_order() {
        let input = UpdateManhwa {
            title: Some("New Title".to_string()),
            description: Some("New description".to_string()),
            author: Some("New Author".to_string()),
            cover_image: Some("covers/new.png".to_string()),
            genres: Some(vec![Genre::Romance, Genre::Comedy, Genre::Romance]),
            status: Some(ManhwaStatus::Hiatus),
            chapter_count: Some(42),
        };
        let stmt = build_update(entry_id(), &input, now());

        assert!(stmt.sql.starts_with(
            "UPDATE manhwas SET title = $1, description = $2, author = $3, cover_image = $4, \
             genres = $5, status = $6, chapter_count = $7, \
             last_update = GREATEST(last_update, $8), updated_at = $9 \
             WHERE id = $10 AND is_active = TRUE"
        ));
        assert_eq!(
            stmt.binds[4],
            BindValue::Genres(vec![Genre::Romance, Genre::Comedy])
        );
        assert_eq!(stmt.binds[9], BindValue::Id(entry_id()));
    }

    // -- build_insert --------------------------------------------------------

    #[test]
    fn insert_binds_creation_time_once_for_both_timestamps() {
        let input = CreateManhwa {
            title: "Omniscient Reader".to_string(),
            description: "The end of the world".to_string(),
            author: "singNsong".to_string(),
            cover_image: String::new(),
            genres: vec![Genre::Action, Genre::Action, Genre::Fantasy],
            status: ManhwaStatus::Ongoing,
            chapter_count: 0,
            release_date: Date::from_ymd_opt(2020, 5, 1).unwrap(),
        };
        let stmt = build_insert(entry_id(), &input, now());

        assert!(stmt.sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, 0, TRUE, $10)"));
        assert_eq!(stmt.binds.len(), 10);
        assert_eq!(stmt.binds[0], BindValue::Id(entry_id()));
        assert_eq!(
            stmt.binds[5],
            BindValue::Genres(vec![Genre::Action, Genre::Fantasy])
        );
        assert_eq!(stmt.binds[9], BindValue::Timestamp(now()));
    }

    #[test]
    fn arguments_encode_every_bind() {
        let stmt = build_update(
            entry_id(),
            &UpdateManhwa {
                title: Some("Encoded".to_string()),
                genres: Some(vec![Genre::Horror]),
                status: Some(ManhwaStatus::Cancelled),
                ..Default::default()
            },
            now(),
        );
        assert!(stmt.arguments().is_ok());
    }
}
