use super::{recover, Controller};
use crate::error::ApiError;
use crate::http::{bad_request, not_found, ok, Request, Response};
use crate::usecases::{AddMovie, FindMovieById};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Looks a catalogue movie up by the `id` path param and adds it to the list.
pub struct AddMovieController {
    add_movie: Arc<dyn AddMovie>,
    find_movie_by_id: Arc<dyn FindMovieById>,
}

impl AddMovieController {
    pub fn new(add_movie: Arc<dyn AddMovie>, find_movie_by_id: Arc<dyn FindMovieById>) -> Self {
        AddMovieController {
            add_movie,
            find_movie_by_id,
        }
    }

    async fn add(&self, request: &Request) -> anyhow::Result<Response> {
        let id = match request.param("id") {
            Some(id) => id,
            None => return Ok(bad_request(ApiError::missing_param("id"))),
        };

        let movie = match self.find_movie_by_id.execute(id).await? {
            Some(movie) if movie.has_id() => movie,
            _ => {
                debug!("movie {} not found", id);
                return Ok(not_found(id));
            }
        };

        let movie = self.add_movie.execute(movie).await?;
        Ok(ok(&movie))
    }
}

#[async_trait]
impl Controller for AddMovieController {
    async fn handle(&self, request: Request) -> Response {
        recover(self.add(&request).await)
    }
}
