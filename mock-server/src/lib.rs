use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const DELETED_MESSAGE: &str = "Movie Deleted Successfully";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: u64,
    pub name: String,
    pub cast: String,
    pub release_date: NaiveDate,
    pub year: i32,
}

/// Body of create and update requests. Every field is optional on the wire;
/// create rejects missing ones, update applies only the present ones.
#[derive(Debug, Default, Deserialize)]
pub struct MovieInput {
    pub name: Option<String>,
    pub cast: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub year: Option<i32>,
}

/// A create request with every field present.
#[derive(Debug, PartialEq, Eq)]
pub struct NewMovie {
    pub name: String,
    pub cast: String,
    pub release_date: NaiveDate,
    pub year: i32,
}

impl MovieInput {
    /// Every field, or the names of the missing ones in declaration order.
    pub fn complete(self) -> Result<NewMovie, Vec<&'static str>> {
        match self {
            MovieInput {
                name: Some(name),
                cast: Some(cast),
                release_date: Some(release_date),
                year: Some(year),
            } => Ok(NewMovie {
                name,
                cast,
                release_date,
                year,
            }),
            input => {
                let present = [
                    ("name", input.name.is_some()),
                    ("cast", input.cast.is_some()),
                    ("release_date", input.release_date.is_some()),
                    ("year", input.year.is_some()),
                ];
                Err(present
                    .into_iter()
                    .filter(|(_, present)| !present)
                    .map(|(field, _)| field)
                    .collect())
            }
        }
    }
}

#[derive(Deserialize)]
pub struct NameQuery {
    pub movie_name: String,
}

#[derive(Deserialize)]
pub struct YearQuery {
    pub year: i32,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    movies: BTreeMap<u64, Movie>,
}

impl Store {
    fn insert(&mut self, new: NewMovie) -> Movie {
        self.next_id += 1;
        let movie = Movie {
            movie_id: self.next_id,
            name: new.name,
            cast: new.cast,
            release_date: new.release_date,
            year: new.year,
        };
        self.movies.insert(movie.movie_id, movie.clone());
        movie
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Router over an empty store.
pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router over a store seeded with `movies`; their ids are reassigned in order.
pub fn app_with(movies: Vec<Movie>) -> Router {
    let mut store = Store::default();
    for movie in movies {
        store.insert(NewMovie {
            name: movie.name,
            cast: movie.cast,
            release_date: movie.release_date,
            year: movie.year,
        });
    }
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/movies/v1/movie_infos", get(list_movies).post(create_movie))
        .route(
            "/movies/v1/movie_infos/movieName",
            get(movies_by_name).delete(delete_by_name),
        )
        .route("/movies/v1/movie_infos/movieYear", get(movies_by_year))
        .route(
            "/movies/v1/movie_infos/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

/// A handful of well-known movies for demos.
pub fn sample_movies() -> Vec<Movie> {
    let movie = |name: &str, cast: &str, date: (i32, u32, u32)| Movie {
        movie_id: 0,
        name: name.to_string(),
        cast: cast.to_string(),
        release_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
        year: date.0,
    };
    vec![
        movie("Batman Begins", "Christian Bale, Katie Holmes", (2005, 6, 15)),
        movie("The Dark Knight", "Christian Bale, Heath Ledger", (2008, 7, 18)),
        movie("The Avengers", "Robert Downey Jr, Chris Evans", (2012, 5, 4)),
        movie("The Dark Knight Rises", "Christian Bale, Tom Hardy", (2012, 7, 20)),
        movie("Avengers: End Game", "Robert Downey Jr, Chris Evans", (2019, 4, 26)),
    ]
}

async fn list_movies(State(db): State<Db>) -> Json<Vec<Movie>> {
    let store = db.read().await;
    Json(store.movies.values().cloned().collect())
}

async fn create_movie(State(db): State<Db>, Json(input): Json<MovieInput>) -> Response {
    let new = match input.complete() {
        Ok(new) => new,
        Err(missing) => {
            debug!(?missing, "rejecting movie with missing fields");
            return (
                StatusCode::BAD_REQUEST,
                format!("Please pass all the input fields : [{}]", missing.join(", ")),
            )
                .into_response();
        }
    };
    let movie = db.write().await.insert(new);
    debug!(movie_id = movie.movie_id, "created movie");
    (StatusCode::OK, Json(movie)).into_response()
}

async fn get_movie(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Movie>, StatusCode> {
    let store = db.read().await;
    store.movies.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_movie(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<MovieInput>,
) -> Result<Json<Movie>, StatusCode> {
    let mut store = db.write().await;
    let movie = store.movies.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        movie.name = name;
    }
    if let Some(cast) = input.cast {
        movie.cast = cast;
    }
    if let Some(release_date) = input.release_date {
        movie.release_date = release_date;
    }
    if let Some(year) = input.year {
        movie.year = year;
    }
    Ok(Json(movie.clone()))
}

async fn delete_movie(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<&'static str, StatusCode> {
    let mut store = db.write().await;
    store
        .movies
        .remove(&id)
        .map(|_| DELETED_MESSAGE)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn movies_by_name(
    State(db): State<Db>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<Movie>>, StatusCode> {
    let store = db.read().await;
    let found: Vec<Movie> = store
        .movies
        .values()
        .filter(|m| m.name.contains(&query.movie_name))
        .cloned()
        .collect();
    non_empty(found)
}

async fn movies_by_year(
    State(db): State<Db>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<Movie>>, StatusCode> {
    let store = db.read().await;
    let found: Vec<Movie> = store
        .movies
        .values()
        .filter(|m| m.year == query.year)
        .cloned()
        .collect();
    non_empty(found)
}

async fn delete_by_name(
    State(db): State<Db>,
    Query(query): Query<NameQuery>,
) -> StatusCode {
    let mut store = db.write().await;
    let before = store.movies.len();
    store.movies.retain(|_, m| m.name != query.movie_name);
    let removed = before - store.movies.len();
    debug!(name = %query.movie_name, removed, "deleted movies by name");
    if removed == 0 {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

fn non_empty(found: Vec<Movie>) -> Result<Json<Vec<Movie>>, StatusCode> {
    if found.is_empty() {
        Err(StatusCode::NOT_FOUND)
    } else {
        Ok(Json(found))
    }
}
