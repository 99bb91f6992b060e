use crate::usecases::Encrypter;
use actix_web::web;
use async_trait::async_trait;

/// bcrypt-backed [`Encrypter`]. Hashing runs on actix's blocking pool.
pub struct BcryptAdapter {
    cost: u32,
}

impl BcryptAdapter {
    pub fn new(cost: u32) -> Self {
        BcryptAdapter { cost }
    }
}

impl Default for BcryptAdapter {
    fn default() -> Self {
        BcryptAdapter::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl Encrypter for BcryptAdapter {
    async fn encrypt(&self, value: &str) -> anyhow::Result<String> {
        let value = value.to_owned();
        let cost = self.cost;
        let hash = web::block(move || bcrypt::hash(value, cost)).await??;
        Ok(hash)
    }
}
