//! Capabilities the controllers are built from. Every collaborator may fail;
//! the controllers turn any failure into a server error.

use crate::model::{Account, AddAccountModel, Movie};
use async_trait::async_trait;

/// One-way hash of a secret.
#[async_trait]
pub trait Encrypter: Send + Sync {
    async fn encrypt(&self, value: &str) -> anyhow::Result<String>;
}

/// Syntactic check of a single value.
pub trait Validator: Send + Sync {
    fn is_valid(&self, value: &str) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait AddAccount: Send + Sync {
    async fn execute(&self, account: AddAccountModel) -> anyhow::Result<Account>;
}

#[async_trait]
pub trait FindMovieById: Send + Sync {
    /// `None` when no movie has this id.
    async fn execute(&self, movie_id: &str) -> anyhow::Result<Option<Movie>>;
}

#[async_trait]
pub trait AddMovie: Send + Sync {
    async fn execute(&self, movie: Movie) -> anyhow::Result<Movie>;
}
