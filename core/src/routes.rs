//! Route templates of the movie service and the helpers that fill them in.

use url::form_urlencoded;

/// List all movies (GET) and create a movie (POST).
pub const MOVIES_V1: &str = "/movies/v1/movie_infos";
/// Get, update or delete a single movie.
pub const MOVIE_BY_ID_V1: &str = "/movies/v1/movie_infos/{id}";
/// Query or delete by `movie_name`.
pub const MOVIE_BY_NAME_V1: &str = "/movies/v1/movie_infos/movieName";
/// Query by `year`.
pub const MOVIE_BY_YEAR_V1: &str = "/movies/v1/movie_infos/movieYear";

pub const MOVIE_NAME_PARAM: &str = "movie_name";
pub const YEAR_PARAM: &str = "year";

/// Substitute the `{id}` placeholder of `template`.
pub fn expand(template: &str, id: u64) -> String {
    template.replace("{id}", &id.to_string())
}

/// Append a single form-urlencoded query parameter to `path`.
pub fn with_query(path: &str, key: &str, value: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{path}?{query}")
}
