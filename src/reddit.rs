use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Credentials;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
/// Listing endpoints return at most 100 items per request.
const PAGE_SIZE: usize = 100;
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 2000;

/// The parts of a submission the parser needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub url: String,
    /// Empty for link posts.
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub link_flair_text: Option<String>,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    after: Option<String>,
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Deserialize)]
struct Child {
    data: Post,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Application-only OAuth client for the Reddit API.
pub struct RedditClient {
    client: reqwest::Client,
    token: String,
}

impl RedditClient {
    /// Exchange the app credentials for a bearer token (client_credentials grant).
    pub async fn login(creds: &Credentials, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        let resp = client
            .post(TOKEN_URL)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .context("Failed to reach Reddit token endpoint")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Reddit login failed ({}): {}", status, body);
        }

        let token: TokenResponse = resp
            .json()
            .await
            .context("Unexpected token response from Reddit")?;
        info!("Authenticated with Reddit");

        Ok(Self {
            client,
            token: token.access_token,
        })
    }

    /// Newest posts of `subreddit`, following the `after` cursor up to `limit`.
    pub async fn new_posts(&self, subreddit: &str, limit: usize) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        let mut after: Option<String> = None;

        while posts.len() < limit {
            let page_size = PAGE_SIZE.min(limit - posts.len());
            let listing = self
                .fetch_page(subreddit, page_size, after.as_deref())
                .await?;

            let fetched = listing.data.children.len();
            posts.extend(listing.data.children.into_iter().map(|c| c.data));
            debug!("Fetched {} posts from r/{} ({} so far)", fetched, subreddit, posts.len());

            after = listing.data.after;
            if fetched == 0 || after.is_none() {
                break;
            }
        }

        posts.truncate(limit);
        info!("Fetched {} posts from r/{}", posts.len(), subreddit);
        Ok(posts)
    }

    async fn fetch_page(
        &self,
        subreddit: &str,
        page_size: usize,
        after: Option<&str>,
    ) -> Result<Listing> {
        let url = format!("{}/r/{}/new", API_BASE, subreddit);
        let mut query = vec![
            ("limit", page_size.to_string()),
            ("raw_json", "1".to_string()),
        ];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let mut attempt = 0;
        loop {
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .query(&query)
                .send()
                .await
                .with_context(|| format!("Failed to fetch {}", url))?;

            let status = resp.status();
            if status.is_success() {
                return resp
                    .json::<Listing>()
                    .await
                    .with_context(|| format!("Unexpected listing payload from {}", url));
            }

            if !is_transient(status) || attempt == MAX_RETRIES {
                let body = resp.text().await.unwrap_or_default();
                bail!("Listing request failed ({}): {}", status, body);
            }

            let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
            warn!(
                "{} on r/{} (attempt {}/{}), backing off {:.1}s",
                status,
                subreddit,
                attempt + 1,
                MAX_RETRIES,
                backoff.as_secs_f64()
            );
            tokio::time::sleep(backoff).await;
            attempt += 1;
        }
    }
}

/// Rate limiting and server errors are worth retrying.
fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
