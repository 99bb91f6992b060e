use crate::model::*;
use crate::usecases::{AddAccount, AddMovie, FindMovieById};
use anyhow::anyhow;
use async_trait::async_trait;
use sled::transaction::{abort, ConflictableTransactionResult, TransactionError, Transactional};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),
    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

fn serialize_id(id: u64) -> [u8; 8] {
    id.to_le_bytes()
}

/// Movie list entries are keyed by owner, then movie id.
fn list_key(user_id: &str, movie_id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(user_id.len() + 9);
    key.extend_from_slice(user_id.as_bytes());
    key.push(0);
    key.extend_from_slice(&serialize_id(movie_id));
    key
}

pub trait AccountDb {
    type Error;
    /// `None` when the email is already registered.
    fn add_account(&self, account: AddAccountModel) -> Result<Option<Account>, Self::Error>;
    fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, Self::Error>;
}

pub trait MovieDb {
    type Error;
    fn put_catalogue_movie(&self, movie: &Movie) -> Result<(), Self::Error>;
    fn get_catalogue_movie(&self, id: u64) -> Result<Option<Movie>, Self::Error>;
    fn add_listed_movie(&self, movie: &Movie) -> Result<(), Self::Error>;
    fn get_listed_movie(&self, user_id: &str, id: u64) -> Result<Option<Movie>, Self::Error>;
}

const ACCOUNTS: &[u8] = b"accounts";
const ACCOUNTS_EMAIL: &[u8] = b"ACCOUNTS_EMAIL";
const MOVIES: &[u8] = b"movies";
const MOVIE_LIST: &[u8] = b"movie_list";

impl AccountDb for sled::Db {
    type Error = DatabaseError;

    fn add_account(&self, account: AddAccountModel) -> Result<Option<Account>, DatabaseError> {
        let accounts = self.open_tree(ACCOUNTS)?;
        let accounts_email = self.open_tree(ACCOUNTS_EMAIL)?;
        let id = self.generate_id()?;
        let key = serialize_id(id);
        let account = Account::new(id.to_string(), account);
        let encoded = bincode::serialize(&account)?;
        let result = (&accounts, &accounts_email).transaction(
            |(accounts, accounts_email)| -> ConflictableTransactionResult<(), ()> {
                if accounts_email
                    .insert(account.email.as_bytes(), &key[..])?
                    .is_some()
                {
                    return abort(());
                }
                accounts.insert(&key[..], encoded.as_slice())?;
                Ok(())
            },
        );
        match result {
            Ok(()) => Ok(Some(account)),
            Err(TransactionError::Abort(())) => Ok(None),
            Err(TransactionError::Storage(err)) => Err(err.into()),
        }
    }

    fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError> {
        let accounts_email = self.open_tree(ACCOUNTS_EMAIL)?;
        let accounts = self.open_tree(ACCOUNTS)?;
        let id = match accounts_email.get(email)? {
            Some(id) => id,
            None => return Ok(None),
        };
        match accounts.get(&id)? {
            Some(data) => Ok(Some(bincode::deserialize(&data)?)),
            None => Ok(None),
        }
    }
}

impl MovieDb for sled::Db {
    type Error = DatabaseError;

    fn put_catalogue_movie(&self, movie: &Movie) -> Result<(), DatabaseError> {
        let movies = self.open_tree(MOVIES)?;
        movies.insert(
            serialize_id(movie.id.unwrap_or_default()),
            bincode::serialize(movie)?,
        )?;
        Ok(())
    }

    fn get_catalogue_movie(&self, id: u64) -> Result<Option<Movie>, DatabaseError> {
        let movies = self.open_tree(MOVIES)?;
        match movies.get(serialize_id(id))? {
            Some(data) => Ok(Some(bincode::deserialize(&data)?)),
            None => Ok(None),
        }
    }

    fn add_listed_movie(&self, movie: &Movie) -> Result<(), DatabaseError> {
        let movie_list = self.open_tree(MOVIE_LIST)?;
        let key = list_key(
            movie.user_id.as_deref().unwrap_or_default(),
            movie.id.unwrap_or_default(),
        );
        movie_list.insert(key, bincode::serialize(movie)?)?;
        Ok(())
    }

    fn get_listed_movie(&self, user_id: &str, id: u64) -> Result<Option<Movie>, DatabaseError> {
        let movie_list = self.open_tree(MOVIE_LIST)?;
        match movie_list.get(list_key(user_id, id))? {
            Some(data) => Ok(Some(bincode::deserialize(&data)?)),
            None => Ok(None),
        }
    }
}

/// Seeds the catalogue of a fresh database with a demo movie.
pub fn seed_catalogue(db: &sled::Db) -> Result<(), DatabaseError> {
    db.put_catalogue_movie(&Movie {
        id: Some(680),
        imdb_id: Some("tt0110912".to_owned()),
        title: "Pulp Fiction".to_owned(),
        original_title: "Pulp Fiction".to_owned(),
        original_language: "en".to_owned(),
        release_date: "1994-09-10".to_owned(),
        runtime: Some(154),
        status: "Released".to_owned(),
        genres: vec![
            Genre {
                id: 53,
                name: "Thriller".to_owned(),
            },
            Genre {
                id: 80,
                name: "Crime".to_owned(),
            },
        ],
        budget: 8_500_000,
        revenue: 213_900_000,
        ..Movie::default()
    })
}

pub struct DbAddAccount {
    db: sled::Db,
}

impl DbAddAccount {
    pub fn new(db: sled::Db) -> Self {
        DbAddAccount { db }
    }
}

#[async_trait]
impl AddAccount for DbAddAccount {
    async fn execute(&self, account: AddAccountModel) -> anyhow::Result<Account> {
        let email = account.email.clone();
        self.db
            .add_account(account)?
            .ok_or_else(|| anyhow!("email already registered: {}", email))
    }
}

pub struct DbFindMovieById {
    db: sled::Db,
}

impl DbFindMovieById {
    pub fn new(db: sled::Db) -> Self {
        DbFindMovieById { db }
    }
}

#[async_trait]
impl FindMovieById for DbFindMovieById {
    async fn execute(&self, movie_id: &str) -> anyhow::Result<Option<Movie>> {
        match movie_id.parse() {
            Ok(id) => Ok(self.db.get_catalogue_movie(id)?),
            Err(_) => Ok(None),
        }
    }
}

pub struct DbAddMovie {
    db: sled::Db,
}

impl DbAddMovie {
    pub fn new(db: sled::Db) -> Self {
        DbAddMovie { db }
    }
}

#[async_trait]
impl AddMovie for DbAddMovie {
    async fn execute(&self, movie: Movie) -> anyhow::Result<Movie> {
        self.db.add_listed_movie(&movie)?;
        let user_id = movie.user_id.as_deref().unwrap_or_default();
        let id = movie.id.unwrap_or_default();
        self.db
            .get_listed_movie(user_id, id)?
            .ok_or_else(|| anyhow!("movie {} missing from the list of {:?}", id, user_id))
    }
}
