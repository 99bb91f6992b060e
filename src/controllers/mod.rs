mod add_movie;
mod sign_up;

pub use add_movie::AddMovieController;
pub use sign_up::SignUpController;

use crate::http::{server_error, Request, Response};
use async_trait::async_trait;
use log::debug;

#[async_trait]
pub trait Controller: Send + Sync {
    async fn handle(&self, request: Request) -> Response;
}

/// The single catch point of a controller: collaborator failures become a 500.
fn recover(result: anyhow::Result<Response>) -> Response {
    result.unwrap_or_else(|err| {
        debug!("{:?}", err);
        server_error(&err)
    })
}
