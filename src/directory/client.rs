//! Paginated GraphQL client for the hero index.

use alloy::primitives::Address;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::DirectoryConfig;
use crate::directory::filter::SearchFilters;
use crate::directory::types::Hero;
use crate::observability::metrics::record_directory_page;

const HEROES_QUERY: &str = r#"
query getHeroes($account_address: String!, $skip_number: Int!, $page_size: Int!, $min_summons: Int, $max_summons: Int, $main_classes: [Int], $sub_classes: [Int], $max_generation: Int, $min_generation: Int, $max_rarity: Int, $min_rarity: Int, $min_level: Int, $max_level: Int, $networks: [String], $professions: [String]) {
  heroes(first: $page_size, skip: $skip_number, orderBy: id, orderDirection: desc, where: {owner: $account_address, summonsRemaining_gte: $min_summons, summonsRemaining_lte: $max_summons, mainClass_in: $main_classes, subClass_in: $sub_classes, generation_lte: $max_generation, generation_gte: $min_generation, rarity_lte: $max_rarity, rarity_gte: $min_rarity, level_gte: $min_level, level_lte: $max_level, network_in: $networks, professionStr_in: $professions}) {
    id
    mainClass
    subClass
    summonsRemaining
    passive1
    passive2
    active1
    active2
    generation
    rarity
    level
    network
    professionStr
  }
}
"#;

/// Errors from a single page request.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Directory request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Directory returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No data found in response: {0}")]
    MissingData(String),

    #[error("Malformed hero record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// GraphQL variables of the heroes query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroQueryVariables {
    pub account_address: String,
    pub skip_number: usize,
    pub page_size: usize,
    pub min_summons: u32,
    pub max_summons: u32,
    pub main_classes: Vec<u8>,
    pub sub_classes: Vec<u8>,
    pub max_generation: u32,
    pub min_generation: u32,
    pub max_rarity: u8,
    pub min_rarity: u8,
    pub min_level: u32,
    pub max_level: u32,
    pub networks: Vec<&'static str>,
    pub professions: Vec<&'static str>,
}

impl HeroQueryVariables {
    /// Variables for the page starting at `skip`.
    pub fn new(owner: Address, filters: &SearchFilters, skip: usize, page_size: usize) -> Self {
        Self {
            account_address: owner.to_checksum(None),
            skip_number: skip,
            page_size,
            min_summons: *filters.summons.start(),
            max_summons: *filters.summons.end(),
            main_classes: filters.main_class.codes(),
            sub_classes: filters.sub_class.codes(),
            max_generation: *filters.generation.end(),
            min_generation: *filters.generation.start(),
            max_rarity: *filters.rarity.end(),
            min_rarity: *filters.rarity.start(),
            min_level: *filters.level.start(),
            max_level: *filters.level.end(),
            networks: filters.realms.iter().map(|r| r.tag()).collect(),
            professions: filters.professions.iter().map(|p| p.as_str()).collect(),
        }
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: &'a HeroQueryVariables,
}

/// Client for the hero directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    endpoint: String,
    page_size: usize,
}

impl DirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            page_size: config.page_size,
        })
    }

    /// Every hero owned by `owner` that matches `filters`, in index order.
    ///
    /// A failed page ends the search; heroes from earlier pages are kept.
    pub async fn search(&self, owner: Address, filters: &SearchFilters) -> Vec<Hero> {
        let mut heroes = Vec::new();
        let mut skip = 0;

        loop {
            let variables = HeroQueryVariables::new(owner, filters, skip, self.page_size);
            let page = match self.fetch_page(&variables).await {
                Ok(page) => {
                    record_directory_page("ok");
                    page
                }
                Err(e) => {
                    record_directory_page("error");
                    tracing::warn!(
                        skip,
                        kept = heroes.len(),
                        error = %e,
                        "Failed to fetch heroes"
                    );
                    break;
                }
            };

            let page_len = page.len();
            heroes.extend(page);
            tracing::debug!(skip, page_len, total = heroes.len(), "Fetched hero page");

            if page_len < self.page_size {
                break;
            }
            skip += self.page_size;
        }

        heroes
    }

    /// Request one page.
    pub async fn fetch_page(&self, variables: &HeroQueryVariables) -> Result<Vec<Hero>, DirectoryError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest {
                query: HEROES_QUERY,
                variables,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut json: serde_json::Value = serde_json::from_str(&body)?;
        let heroes = match json.pointer_mut("/data/heroes") {
            Some(serde_json::Value::Array(records)) => std::mem::take(records),
            _ => return Err(DirectoryError::MissingData(body)),
        };

        heroes
            .into_iter()
            .map(serde_json::from_value::<Hero>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DirectoryError::from)
    }
}
