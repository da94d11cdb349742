//! Orchestrates fetch → extract → prompt → completion → parse → cache.

pub mod errors;

pub use errors::{CheckError, MissingField};

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::assessment::{CredibilityResult, Evaluation, parse};
use crate::cache::{CacheStatus, CredibilityCache};
use crate::config::Config;
use crate::extractor::{self, ArticleText};
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::llm::{ChatCompletionClient, CompletionClient, CompletionRequest};
use crate::prompt::{Mode, SYSTEM_INSTRUCTION, build_prompt};

/// The combined check rejects articles shorter than this many characters.
pub const MIN_CHECK_CHARS: usize = 50;
/// Characters of article text echoed back in a check result.
pub const PREVIEW_CHARS: usize = 500;

pub struct CredibilityService {
    fetcher: Arc<dyn PageFetcher>,
    llm: Arc<dyn CompletionClient>,
    cache: Arc<CredibilityCache>,
}

impl CredibilityService {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        llm: Arc<dyn CompletionClient>,
        cache: Arc<CredibilityCache>,
    ) -> Self {
        Self {
            fetcher,
            llm,
            cache,
        }
    }

    /// Wires the HTTP fetcher, the OpenAI-compatible client and a cache from `config`.
    pub fn from_config(config: &Config) -> Result<Self, CheckError> {
        let fetcher = HttpFetcher::new(config.fetch_timeout())?;
        let llm = ChatCompletionClient::new(
            config.openai_api_key().map(str::to_string),
            config.openai_base_url(),
            config.openai_model(),
            config.llm_timeout(),
        )?;
        let cache = CredibilityCache::new(config.cache_policy());

        Ok(Self::new(Arc::new(fetcher), Arc::new(llm), Arc::new(cache)))
    }

    pub fn cache(&self) -> &CredibilityCache {
        &self.cache
    }

    pub fn capability_configured(&self) -> bool {
        self.llm.is_configured()
    }

    /// Fetches `url` and returns its article text. Short text is accepted here.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn extract_only(&self, url: &str) -> Result<String, CheckError> {
        let url = require(url, MissingField::Url)?;
        let article = self
            .fetch_article(url)
            .await
            .map_err(|e| CheckError::Extraction(e.to_string()))?;
        Ok(article.into_string())
    }

    /// Quick assessment of caller-supplied text. Not cached.
    #[instrument(skip_all, fields(chars = content.chars().count()))]
    pub async fn evaluate_only(&self, content: &str) -> Result<Evaluation, CheckError> {
        let content = require(content, MissingField::Content)?;
        let raw = self.assess(content, Mode::Quick).await?;
        let parsed = parse(&raw, Mode::Quick);

        info!(
            score = parsed.credibility_score,
            category = parsed.fake_article_type.label(),
            "quick assessment done"
        );

        Ok(Evaluation {
            credibility_score: parsed.credibility_score,
            fake_article_type: parsed.fake_article_type,
            raw_response: raw,
        })
    }

    /// Full assessment of the article at `url`, served from the cache when possible.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn check_credibility(
        &self,
        url: &str,
    ) -> Result<(Arc<CredibilityResult>, CacheStatus), CheckError> {
        let url = require(url, MissingField::Url)?;
        let (result, status) = self
            .cache
            .get_or_try_insert_with(url, || self.run_check(url))
            .await?;

        match status {
            CacheStatus::Hit => info!("returning cached result"),
            CacheStatus::Miss => info!(score = result.credibility_score, "cached new result"),
        }
        Ok((result, status))
    }

    async fn run_check(&self, url: &str) -> Result<CredibilityResult, CheckError> {
        let article = self.fetch_article(url).await?;

        let chars = article.char_len();
        if chars < MIN_CHECK_CHARS {
            return Err(CheckError::InsufficientContent { chars });
        }

        let raw = self.assess(article.as_str(), Mode::Full).await?;
        let parsed = parse(&raw, Mode::Full);
        if parsed.reason_is_short() {
            warn!(
                score = parsed.credibility_score,
                reason_chars = parsed.reason.chars().count(),
                "rationale shorter than requested, kept as-is"
            );
        }

        Ok(CredibilityResult::new(
            parsed,
            raw,
            article.preview(PREVIEW_CHARS),
        ))
    }

    async fn fetch_article(&self, url: &str) -> Result<ArticleText, CheckError> {
        let page = self.fetcher.fetch(url).await?;
        let article = extractor::extract(&page.body_utf8);
        info!(
            source = ?article.source,
            chars = article.char_len(),
            truncated = article.truncated,
            "extracted article"
        );
        Ok(article)
    }

    async fn assess(&self, article: &str, mode: Mode) -> Result<String, CheckError> {
        let request = CompletionRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_prompt(article, mode),
            max_tokens: mode.max_tokens(),
        };
        Ok(self.llm.complete(request).await?)
    }
}

/// Blank input counts as missing.
fn require(value: &str, field: MissingField) -> Result<&str, CheckError> {
    if value.trim().is_empty() {
        Err(CheckError::Validation(field))
    } else {
        Ok(value)
    }
}
