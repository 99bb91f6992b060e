use serde::{Deserialize, Serialize};

/// Fields handed to the account store. `password` is already hashed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AddAccountModel {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn new(id: String, model: AddAccountModel) -> Self {
        Account {
            id,
            name: model.name,
            email: model.email,
            password: model.password,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductionCompany {
    pub id: u64,
    pub logo_path: Option<String>,
    pub name: String,
    pub origin_country: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SpokenLanguage {
    pub english_name: String,
    pub iso_639_1: String,
    pub name: String,
}

/// A catalogue movie. Controllers treat it as an opaque payload apart from `id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Movie {
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub budget: u64,
    pub genres: Vec<Genre>,
    pub id: Option<u64>,
    pub imdb_id: Option<String>,
    pub original_language: String,
    pub original_title: String,
    pub overview: String,
    pub popularity: f64,
    pub poster_path: Option<String>,
    pub production_companies: Vec<ProductionCompany>,
    pub production_countries: Vec<ProductionCountry>,
    pub release_date: String,
    pub revenue: u64,
    pub runtime: Option<u32>,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub status: String,
    pub title: String,
    pub video: bool,
    pub vote_average: f64,
    pub vote_count: u64,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl Movie {
    /// A movie only counts as found when it carries a non-zero id.
    pub fn has_id(&self) -> bool {
        matches!(self.id, Some(id) if id != 0)
    }
}
