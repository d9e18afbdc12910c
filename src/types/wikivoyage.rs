use serde::{Deserialize, Serialize};

/// Response of the MediaWiki `action=query&list=search` API.
#[derive(Serialize, Deserialize, Default)]
pub struct WikiSearchResponse {
    #[serde(default)]
    pub query: Option<WikiQuery>,
}

#[derive(Serialize, Deserialize, Default)]
pub struct WikiQuery {
    #[serde(default)]
    pub search: Vec<WikiSearchHit>,
}

#[derive(Serialize, Deserialize)]
pub struct WikiSearchHit {
    pub title: String,
    //HTML with searchmatch spans and entities
    #[serde(default)]
    pub snippet: String,
}

impl WikiSearchResponse {
    pub fn into_hits(self) -> Vec<WikiSearchHit> {
        self.query.map(|q| q.search).unwrap_or_default()
    }
}
