use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use crate::movie::Movie;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than `asc` sorts descending
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Movie field a listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    Title,
    Description,
    Genre,
    Year,
    Director,
    Rating,
    PosterUrl,
    #[default]
    AddedDate,
    UpdatedDate,
    Watched,
    Priority,
}

impl SortField {
    pub const ALL: [SortField; 12] = [
        SortField::Id,
        SortField::Title,
        SortField::Description,
        SortField::Genre,
        SortField::Year,
        SortField::Director,
        SortField::Rating,
        SortField::PosterUrl,
        SortField::AddedDate,
        SortField::UpdatedDate,
        SortField::Watched,
        SortField::Priority,
    ];

    /// Look up a field by its JSON (camelCase) name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Description => "description",
            SortField::Genre => "genre",
            SortField::Year => "year",
            SortField::Director => "director",
            SortField::Rating => "rating",
            SortField::PosterUrl => "posterUrl",
            SortField::AddedDate => "addedDate",
            SortField::UpdatedDate => "updatedDate",
            SortField::Watched => "watched",
            SortField::Priority => "priority",
        }
    }

    /// Ascending comparison of two movies on this field.
    /// Movies never updated sort before updated ones.
    pub fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Genre => a.genre.cmp(&b.genre),
            SortField::Year => a.year.cmp(&b.year),
            SortField::Director => a.director.cmp(&b.director),
            SortField::Rating => a.rating.total_cmp(&b.rating),
            SortField::PosterUrl => a.poster_url.cmp(&b.poster_url),
            SortField::AddedDate => a.added_date.cmp(&b.added_date),
            SortField::UpdatedDate => a.updated_date.cmp(&b.updated_date),
            SortField::Watched => a.watched.cmp(&b.watched),
            SortField::Priority => a.priority.cmp(&b.priority),
        }
    }
}

/// Normalized listing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sort_by: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl ListQuery {
    /// Build a query from raw query-string values.
    ///
    /// Missing, non-numeric or non-positive `page`/`limit` take their defaults;
    /// an unknown `sort_by` falls back to `addedDate`.
    pub fn from_raw(
        page: Option<&str>,
        limit: Option<&str>,
        sort_by: Option<&str>,
        order: Option<&str>,
        default_limit: usize,
    ) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(1),
            limit: parse_positive(limit).unwrap_or(default_limit.max(1)),
            sort_by: sort_by
                .and_then(|name| SortField::from_name(name.trim()))
                .unwrap_or_default(),
            order: SortOrder::parse(order),
        }
    }

    /// Index range of the requested page within a collection of `total` items
    pub fn window(&self, total: usize) -> (usize, usize) {
        let start = self.page.saturating_sub(1).saturating_mul(self.limit).min(total);
        let end = self.page.saturating_mul(self.limit).min(total);
        (start, end)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(limit.max(1));
        Self {
            page,
            limit,
            total_items,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreMatches {
    pub genre: String,
    pub movies: Vec<Movie>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchMatches {
    pub query: String,
    pub movies: Vec<Movie>,
    pub count: usize,
}
