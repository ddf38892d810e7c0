pub mod movie;
pub mod query;
pub mod input;

pub use input::{MovieUpdate, NewMovie};
pub use movie::{Movie, MovieCollection, MovieDefaults};
pub use query::{GenreMatches, ListQuery, MoviePage, Pagination, SearchMatches, SortField, SortOrder, DEFAULT_PAGE_SIZE};
