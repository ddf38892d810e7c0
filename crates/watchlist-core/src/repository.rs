// Movie operations over an already-loaded collection. Nothing here touches disk.

use chrono::{DateTime, Datelike, Utc};
use watchlist_models::{
    GenreMatches, ListQuery, Movie, MovieCollection, MovieDefaults, MoviePage, MovieUpdate,
    NewMovie, Pagination, SearchMatches, SortOrder,
};
use crate::error::RepositoryError;

/// Sort the whole collection, then cut out the requested page.
/// Pages past the end come back empty.
pub fn list_movies(collection: &MovieCollection, query: &ListQuery) -> MoviePage {
    let mut movies = collection.movies.clone();
    movies.sort_by(|a, b| {
        let ordering = query.sort_by.compare(a, b);
        match query.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let total_items = movies.len();
    let (start, end) = query.window(total_items);
    let page: Vec<Movie> = movies.drain(start..end).collect();

    MoviePage {
        movies: page,
        pagination: Pagination::new(query.page, query.limit, total_items),
    }
}

pub fn find_movie<'a>(collection: &'a MovieCollection, id: &str) -> Result<&'a Movie, RepositoryError> {
    collection
        .find(id)
        .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
}

/// Append a new movie built from `input`, filling omitted fields from `defaults`.
///
/// `priority` is the collection size before insertion plus one.
pub fn create_movie(
    collection: &mut MovieCollection,
    input: NewMovie,
    defaults: &MovieDefaults,
    id: String,
    now: DateTime<Utc>,
) -> Result<Movie, RepositoryError> {
    let title = input
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RepositoryError::Validation("Movie title is required".to_string()))?;

    let movie = Movie {
        id,
        title,
        description: input.description.unwrap_or_default(),
        genre: non_empty_or(input.genre, &defaults.genre),
        year: input.year.filter(|y| *y != 0).unwrap_or_else(|| now.year()),
        director: non_empty_or(input.director, &defaults.director),
        rating: input.rating.filter(|r| r.is_finite()).unwrap_or(0.0),
        poster_url: input.poster_url.unwrap_or_default(),
        added_date: now,
        updated_date: None,
        watched: false,
        priority: collection.len() as u64 + 1,
    };

    collection.movies.push(movie.clone());
    Ok(movie)
}

/// Shallow-merge `changes` over the stored movie. `id` and `addedDate` are kept.
pub fn update_movie(
    collection: &mut MovieCollection,
    id: &str,
    changes: MovieUpdate,
    now: DateTime<Utc>,
) -> Result<Movie, RepositoryError> {
    let index = collection
        .position(id)
        .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

    if let Some(title) = &changes.title {
        if title.trim().is_empty() {
            return Err(RepositoryError::Validation("Movie title cannot be empty".to_string()));
        }
    }

    let movie = &mut collection.movies[index];
    if let Some(title) = changes.title {
        movie.title = title.trim().to_string();
    }
    if let Some(description) = changes.description {
        movie.description = description;
    }
    if let Some(genre) = changes.genre {
        movie.genre = genre;
    }
    if let Some(year) = changes.year {
        movie.year = year;
    }
    if let Some(director) = changes.director {
        movie.director = director;
    }
    if let Some(rating) = changes.rating.filter(|r| r.is_finite()) {
        movie.rating = rating;
    }
    if let Some(poster_url) = changes.poster_url {
        movie.poster_url = poster_url;
    }
    if let Some(watched) = changes.watched {
        movie.watched = watched;
    }
    if let Some(priority) = changes.priority {
        movie.priority = priority;
    }
    movie.updated_date = Some(now);

    Ok(movie.clone())
}

/// Remove exactly one movie. Remaining priorities are left as they are.
pub fn delete_movie(collection: &mut MovieCollection, id: &str) -> Result<Movie, RepositoryError> {
    let index = collection
        .position(id)
        .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
    Ok(collection.movies.remove(index))
}

/// Case-insensitive exact match on genre
pub fn movies_by_genre(collection: &MovieCollection, genre: &str) -> GenreMatches {
    let wanted = genre.to_lowercase();
    let movies: Vec<Movie> = collection
        .movies
        .iter()
        .filter(|m| m.genre.to_lowercase() == wanted)
        .cloned()
        .collect();

    GenreMatches {
        genre: genre.to_string(),
        count: movies.len(),
        movies,
    }
}

/// Case-insensitive substring match over title, description and director
pub fn search_movies(collection: &MovieCollection, query: &str) -> Result<SearchMatches, RepositoryError> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(RepositoryError::Validation("Search query is required".to_string()));
    }

    let movies: Vec<Movie> = collection
        .movies
        .iter()
        .filter(|m| {
            m.title.to_lowercase().contains(&needle)
                || m.description.to_lowercase().contains(&needle)
                || m.director.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    Ok(SearchMatches {
        query: query.trim().to_string(),
        count: movies.len(),
        movies,
    })
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use watchlist_models::SortField;

    fn defaults() -> MovieDefaults {
        MovieDefaults::default()
    }

    fn add(collection: &mut MovieCollection, id: &str, input: NewMovie, now: DateTime<Utc>) -> Movie {
        create_movie(collection, input, &defaults(), id.to_string(), now).unwrap()
    }

    fn seeded(count: usize) -> MovieCollection {
        let mut collection = MovieCollection::default();
        let start = Utc::now() - Duration::days(count as i64);
        for i in 0..count {
            let input = NewMovie {
                rating: Some((i % 7) as f64),
                year: Some(1990 + (i as i32 * 3) % 30),
                ..NewMovie::with_title(format!("Movie {i}"))
            };
            add(&mut collection, &format!("id{i}"), input, start + Duration::hours(i as i64));
        }
        collection
    }

    #[test]
    fn test_create_applies_defaults() {
        let mut collection = MovieCollection::default();
        let now = Utc::now();
        let movie = add(&mut collection, "x1", NewMovie::with_title("Dune"), now);

        assert_eq!(movie.title, "Dune");
        assert_eq!(movie.description, "");
        assert_eq!(movie.genre, "Unspecified");
        assert_eq!(movie.director, "Unknown");
        assert_eq!(movie.year, now.year());
        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.poster_url, "");
        assert_eq!(movie.added_date, now);
        assert_eq!(movie.updated_date, None);
        assert!(!movie.watched);
        assert_eq!(movie.priority, 1);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_create_treats_empty_strings_and_zero_year_as_absent() {
        let mut collection = MovieCollection::default();
        let now = Utc::now();
        let input = NewMovie {
            genre: Some(String::new()),
            director: Some("  ".to_string()),
            year: Some(0),
            ..NewMovie::with_title("Stalker")
        };
        let movie = add(&mut collection, "x1", input, now);

        assert_eq!(movie.genre, "Unspecified");
        assert_eq!(movie.director, "Unknown");
        assert_eq!(movie.year, now.year());
    }

    #[test]
    fn test_create_requires_title() {
        let mut collection = MovieCollection::default();
        let now = Utc::now();

        let err = create_movie(&mut collection, NewMovie::default(), &defaults(), "a".into(), now).unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));

        let err = create_movie(&mut collection, NewMovie::with_title("   "), &defaults(), "a".into(), now).unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_priority_not_renumbered_after_delete() {
        let mut collection = MovieCollection::default();
        let now = Utc::now();
        add(&mut collection, "a", NewMovie::with_title("A"), now);
        add(&mut collection, "b", NewMovie::with_title("B"), now);
        add(&mut collection, "c", NewMovie::with_title("C"), now);

        delete_movie(&mut collection, "a").unwrap();
        assert_eq!(collection.find("b").unwrap().priority, 2);
        assert_eq!(collection.find("c").unwrap().priority, 3);

        // size is now 2, so the next priority collides with "c"
        let d = add(&mut collection, "d", NewMovie::with_title("D"), now);
        assert_eq!(d.priority, 3);
    }

    #[test]
    fn test_list_never_exceeds_limit() {
        let collection = seeded(23);
        for limit in 1..=25 {
            let total_pages = 23usize.div_ceil(limit);
            for page in 1..=total_pages + 1 {
                let query = ListQuery { page, limit, ..ListQuery::default() };
                let result = list_movies(&collection, &query);
                assert!(result.movies.len() <= limit);
                assert_eq!(result.pagination.total_items, 23);
                assert_eq!(result.pagination.total_pages, total_pages);
            }
        }
    }

    #[test]
    fn test_list_pages_cover_collection() {
        let collection = seeded(12);
        let first = list_movies(&collection, &ListQuery { page: 1, limit: 5, ..ListQuery::default() });
        let second = list_movies(&collection, &ListQuery { page: 2, limit: 5, ..ListQuery::default() });
        let third = list_movies(&collection, &ListQuery { page: 3, limit: 5, ..ListQuery::default() });

        assert_eq!(first.movies.len(), 5);
        assert_eq!(second.movies.len(), 5);
        assert_eq!(third.movies.len(), 2);
        assert!(first.pagination.has_next_page);
        assert!(!first.pagination.has_prev_page);
        assert!(!third.pagination.has_next_page);
        assert!(third.pagination.has_prev_page);
    }

    #[test]
    fn test_list_out_of_range_page_is_empty() {
        let collection = seeded(3);
        let result = list_movies(&collection, &ListQuery { page: 9, limit: 10, ..ListQuery::default() });
        assert!(result.movies.is_empty());
        assert_eq!(result.pagination.page, 9);
        assert!(!result.pagination.has_next_page);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let collection = seeded(4);
        let result = list_movies(&collection, &ListQuery::default());
        let ids: Vec<&str> = result.movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["id3", "id2", "id1", "id0"]);
    }

    #[test]
    fn test_ascending_sort_is_non_decreasing() {
        let collection = seeded(20);
        for field in [SortField::Rating, SortField::Year, SortField::Title, SortField::Priority] {
            let query = ListQuery {
                limit: 100,
                sort_by: field,
                order: SortOrder::Asc,
                ..ListQuery::default()
            };
            let result = list_movies(&collection, &query);
            assert!(result
                .movies
                .windows(2)
                .all(|w| field.compare(&w[0], &w[1]) != std::cmp::Ordering::Greater));
        }
    }

    #[test]
    fn test_descending_sort_is_non_increasing() {
        let collection = seeded(20);
        let query = ListQuery { limit: 100, sort_by: SortField::Rating, ..ListQuery::default() };
        let result = list_movies(&collection, &query);
        assert!(result.movies.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn test_update_preserves_identity() {
        let mut collection = MovieCollection::default();
        let created_at = Utc::now() - Duration::days(3);
        let original = add(&mut collection, "keep", NewMovie::with_title("Heat"), created_at);

        let now = Utc::now();
        let updated = update_movie(
            &mut collection,
            "keep",
            MovieUpdate {
                watched: Some(true),
                rating: Some(9.5),
                ..MovieUpdate::default()
            },
            now,
        )
        .unwrap();

        assert_eq!(updated.id, "keep");
        assert_eq!(updated.added_date, original.added_date);
        assert_eq!(updated.updated_date, Some(now));
        assert!(updated.watched);
        assert_eq!(updated.rating, 9.5);
        assert_eq!(updated.title, "Heat");
        assert_eq!(updated.genre, original.genre);
        assert_eq!(collection.find("keep"), Some(&updated));
    }

    #[test]
    fn test_update_unknown_id() {
        let mut collection = seeded(2);
        let err = update_movie(&mut collection, "nope", MovieUpdate::default(), Utc::now()).unwrap_err();
        assert_eq!(err, RepositoryError::NotFound("nope".to_string()));
    }

    #[test]
    fn test_update_rejects_empty_title() {
        let mut collection = seeded(1);
        let changes = MovieUpdate {
            title: Some(String::new()),
            watched: Some(true),
            ..MovieUpdate::default()
        };
        let err = update_movie(&mut collection, "id0", changes, Utc::now()).unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
        assert!(!collection.find("id0").unwrap().watched);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut collection = seeded(5);
        let removed = delete_movie(&mut collection, "id2").unwrap();
        assert_eq!(removed.id, "id2");
        assert_eq!(collection.len(), 4);
        assert!(find_movie(&collection, "id2").is_err());
        assert_eq!(
            delete_movie(&mut collection, "id2").unwrap_err(),
            RepositoryError::NotFound("id2".to_string())
        );
    }

    #[test]
    fn test_genre_filter_is_case_insensitive() {
        let mut collection = MovieCollection::default();
        let now = Utc::now();
        add(&mut collection, "a", NewMovie { genre: Some("Drama".into()), ..NewMovie::with_title("A") }, now);
        add(&mut collection, "b", NewMovie { genre: Some("Comedy".into()), ..NewMovie::with_title("B") }, now);
        add(&mut collection, "c", NewMovie { genre: Some("DRAMA".into()), ..NewMovie::with_title("C") }, now);
        add(&mut collection, "d", NewMovie { genre: Some("Драма".into()), ..NewMovie::with_title("D") }, now);

        let result = movies_by_genre(&collection, "drama");
        assert_eq!(result.genre, "drama");
        assert_eq!(result.count, 2);

        assert_eq!(movies_by_genre(&collection, "ДРАМА").count, 1);
        assert_eq!(movies_by_genre(&collection, "western").count, 0);
    }

    #[test]
    fn test_search_matches_several_fields() {
        let mut collection = MovieCollection::default();
        let now = Utc::now();
        add(&mut collection, "a", NewMovie::with_title("Blade Runner"), now);
        add(&mut collection, "b", NewMovie { director: Some("Ridley Scott".into()), ..NewMovie::with_title("Alien") }, now);
        add(&mut collection, "c", NewMovie { description: Some("A runner in the rain".into()), ..NewMovie::with_title("Other") }, now);

        let result = search_movies(&collection, "  RUNNER ").unwrap();
        assert_eq!(result.query, "RUNNER");
        assert_eq!(result.count, 2);

        assert_eq!(search_movies(&collection, "scott").unwrap().count, 1);
        assert!(search_movies(&collection, " ").is_err());
    }
}
