//! Link creation, resolution and lifecycle service.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{NewShortLink, SafetyVerdict, ShortLink};
use crate::domain::gatekeeper::LinkState;
use crate::domain::repositories::LinkRepository;
use crate::domain::variant_ranker::{RankedVariant, RankedVariants, rank_variants};
use crate::error::AppError;
use crate::infrastructure::password::PasswordHasher;
use crate::infrastructure::safety::SafetyVerifier;
use crate::utils::code_generator::generate_code;
use crate::utils::expires_in::parse_expires_in;
use crate::utils::validation::{
    DestinationPolicy, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, is_valid_code,
    is_valid_password, sanitize_destination,
};

/// Generated codes tried before giving up with [`AppError::Unavailable`].
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

pub const DEFAULT_SAFETY_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables of [`LinkService`].
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Prefix of every short URL, without trailing slash.
    pub base_url: String,
    /// Upper bound on one safety oracle call.
    pub safety_timeout: Duration,
    pub policy: DestinationPolicy,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            safety_timeout: DEFAULT_SAFETY_TIMEOUT,
            policy: DestinationPolicy::default(),
        }
    }
}

/// Raw creation request as received from a client.
#[derive(Debug, Clone, Default)]
pub struct CreateLinkInput {
    pub code: Option<String>,
    pub destination: String,
    pub expires_in: Option<String>,
    pub max_clicks: Option<i64>,
    pub password: Option<String>,
}

/// Creation request that passed every input check.
///
/// Produced by [`LinkService::validate_input`] and consumed by
/// [`LinkService::create_link`].
#[derive(Debug, Clone)]
pub struct LinkDraft {
    pub code: Option<String>,
    /// Sanitized destination.
    pub destination: String,
    /// Requested lifetime, counted from the moment the link is stored.
    pub lifetime: Option<ChronoDuration>,
    pub max_clicks: Option<i64>,
    pub password: Option<String>,
}

/// Result of resolving a short code on the redirect path.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No such code, or the code is malformed.
    NotFound,
    Expired(ShortLink),
    QuotaExceeded(ShortLink),
    /// The click was counted (or the count failed and was logged); redirect.
    Redirect(ShortLink),
}

impl Resolution {
    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Expired(_) => "expired",
            Self::QuotaExceeded(_) => "quota_exceeded",
            Self::Redirect(_) => "redirect",
        }
    }
}

/// Service for the whole short link lifecycle.
///
/// Creation runs the input checks, the safety oracle and code allocation.
/// Resolution classifies the stored record and counts the click. Listing
/// ranks the links sharing a destination and prunes stale ones.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    safety: Arc<dyn SafetyVerifier>,
    hasher: Arc<dyn PasswordHasher>,
    settings: LinkSettings,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<L>,
        safety: Arc<dyn SafetyVerifier>,
        hasher: Arc<dyn PasswordHasher>,
        mut settings: LinkSettings,
    ) -> Self {
        settings.base_url = settings.base_url.trim_end_matches('/').to_string();
        Self {
            repository,
            safety,
            hasher,
            settings,
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.settings.base_url, code)
    }

    /// Checks a creation request without touching storage.
    ///
    /// The destination is sanitized before it is validated. `expires_in` is
    /// parsed into a lifetime; the expiry instant is fixed at insertion.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unacceptable destination, a
    /// malformed code, a password outside the length bounds, a non-positive
    /// `max_clicks` or an unparseable `expires_in`.
    pub fn validate_input(&self, input: CreateLinkInput) -> Result<LinkDraft, AppError> {
        let destination = sanitize_destination(&input.destination);
        if !self.settings.policy.is_valid(&destination) {
            return Err(AppError::bad_request(
                "Invalid destination URL",
                json!({ "field": "destination", "reason": "Must be a public http(s) URL" }),
            ));
        }

        if let Some(code) = &input.code
            && !is_valid_code(code)
        {
            return Err(AppError::bad_request(
                "Invalid short code",
                json!({ "code": code, "reason": "Must be exactly 6 characters from [A-Za-z0-9]" }),
            ));
        }

        if let Some(password) = &input.password
            && !is_valid_password(password)
        {
            return Err(AppError::bad_request(
                "Invalid password",
                json!({ "min_length": PASSWORD_MIN_LENGTH, "max_length": PASSWORD_MAX_LENGTH }),
            ));
        }

        if let Some(max_clicks) = input.max_clicks
            && max_clicks < 1
        {
            return Err(AppError::bad_request(
                "Invalid click limit",
                json!({ "maxClicks": max_clicks, "reason": "Must be at least 1" }),
            ));
        }

        let lifetime = match input.expires_in.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(expires_in) => Some(parse_expires_in(expires_in).map_err(|e| {
                AppError::bad_request("Invalid expiry", json!({ "reason": e.to_string() }))
            })?),
        };

        Ok(LinkDraft {
            code: input.code,
            destination,
            lifetime,
            max_clicks: input.max_clicks,
            password: input.password,
        })
    }

    /// Creates a link from a validated draft.
    ///
    /// Callers run admission control between [`Self::validate_input`] and
    /// this method.
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] if the safety verdict flags the destination
    /// - [`AppError::Conflict`] if the requested code is taken
    /// - [`AppError::Unavailable`] if no free code was found within
    ///   [`MAX_GENERATION_ATTEMPTS`]
    /// - [`AppError::Internal`] on storage or hashing errors
    pub async fn create_link(&self, draft: LinkDraft) -> Result<ShortLink, AppError> {
        let verdict = self.check_safety(&draft.destination).await;
        if !verdict.is_safe() {
            info!(
                malicious = verdict.malicious,
                suspicious = verdict.suspicious,
                "Rejected unsafe destination"
            );
            return Err(AppError::forbidden(
                "Destination URL was flagged as unsafe",
                json!({ "malicious": verdict.malicious, "suspicious": verdict.suspicious }),
            ));
        }

        let password_hash = match draft.password.clone() {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let created_at = Utc::now();
        let expires_at = draft.lifetime.map(|lifetime| created_at + lifetime);
        let build = |code: String| NewShortLink {
            code,
            destination: draft.destination.clone(),
            created_at,
            expires_at,
            max_clicks: draft.max_clicks,
            password_hash: password_hash.clone(),
            safety_verdict: verdict,
        };

        let link = match draft.code.clone() {
            Some(code) => self.insert_custom(build(code)).await?,
            None => self.insert_generated(build).await?,
        };

        metrics::counter!("linkgate_links_created_total").increment(1);
        info!(
            code = %link.code,
            has_password = link.has_password(),
            malicious = verdict.malicious,
            suspicious = verdict.suspicious,
            "Link created"
        );

        Ok(link)
    }

    /// Reports whether a code is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code.
    pub async fn check_code(&self, code: &str) -> Result<bool, AppError> {
        ensure_valid_code(code)?;
        self.repository.exists(code).await
    }

    /// Classifies a code and counts the click when the link is active.
    ///
    /// Malformed codes resolve to [`Resolution::NotFound`] without a lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the lookup fails. A failed click
    /// increment is logged and does not fail the resolution.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        let resolution = if is_valid_code(code) {
            let link = self.repository.find_by_code(code).await?;
            match (LinkState::classify(link.as_ref(), Utc::now()), link) {
                (LinkState::Expired, Some(link)) => Resolution::Expired(link),
                (LinkState::QuotaExceeded, Some(link)) => Resolution::QuotaExceeded(link),
                (LinkState::Active, Some(link)) => self.count_click(link).await,
                _ => Resolution::NotFound,
            }
        } else {
            Resolution::NotFound
        };

        metrics::counter!("linkgate_redirects_total", "outcome" => resolution.outcome())
            .increment(1);
        debug!(code, outcome = resolution.outcome(), "Resolved short code");

        Ok(resolution)
    }

    /// Loads a link for the statistics view. Does not count a click.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed code
    /// - [`AppError::NotFound`] if no link has this code
    pub async fn stats(&self, code: &str) -> Result<ShortLink, AppError> {
        ensure_valid_code(code)?;
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Ranks the usable links pointing at `destination`.
    ///
    /// Stale links found on the way are deleted; a failed deletion is logged
    /// and does not affect the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unacceptable destination and
    /// [`AppError::Internal`] if the lookup fails.
    pub async fn list_variants(&self, destination: &str) -> Result<Vec<RankedVariant>, AppError> {
        let destination = sanitize_destination(destination);
        if !self.settings.policy.is_valid(&destination) {
            return Err(AppError::bad_request(
                "Invalid destination URL",
                json!({ "field": "destination" }),
            ));
        }

        let links = self.repository.find_by_destination(&destination).await?;
        let now = Utc::now();
        let RankedVariants {
            ranked,
            stale_codes,
        } = rank_variants(links, now);

        if !stale_codes.is_empty() {
            self.prune(&stale_codes, now).await;
        }

        Ok(ranked)
    }

    /// Checks a password against a link and returns the link on success.
    ///
    /// Terminal links are reported before the password is looked at. Links
    /// without a password accept any candidate. Does not count a click.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed code
    /// - [`AppError::NotFound`] if no link has this code
    /// - [`AppError::Gone`] if the link is expired or used up
    /// - [`AppError::Forbidden`] if the password does not match
    pub async fn verify_password(&self, code: &str, password: &str) -> Result<ShortLink, AppError> {
        ensure_valid_code(code)?;

        let link = self.repository.find_by_code(code).await?;
        let state = LinkState::classify(link.as_ref(), Utc::now());
        let link = match link {
            Some(link) if !state.is_terminal() => link,
            _ => return Err(terminal_error(code, state)),
        };

        let Some(hash) = link.password_hash.clone() else {
            return Ok(link);
        };

        if self.check_password(hash, password.to_string()).await? {
            Ok(link)
        } else {
            Err(AppError::forbidden(
                "Invalid password",
                json!({ "reason": "invalid_password" }),
            ))
        }
    }

    /// Deletes a link. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code.
    pub async fn delete_link(&self, code: &str) -> Result<bool, AppError> {
        ensure_valid_code(code)?;
        let deleted = self.repository.delete(code).await?;
        if deleted {
            info!(code, "Link deleted");
        }
        Ok(deleted)
    }

    /// Deletes every stale link. Safe to run repeatedly.
    pub async fn purge_stale(&self) -> Result<u64, AppError> {
        let removed = self.repository.delete_stale(Utc::now()).await?;
        info!(removed, "Purged stale links");
        Ok(removed)
    }

    /// Checks that the link store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn check_safety(&self, destination: &str) -> SafetyVerdict {
        match tokio::time::timeout(self.settings.safety_timeout, self.safety.verify(destination))
            .await
        {
            Ok(Ok(verdict)) => verdict,
            Ok(Err(e)) => {
                warn!(error = %e, "Safety check failed, treating destination as clean");
                metrics::counter!("linkgate_safety_fail_open_total", "reason" => "error")
                    .increment(1);
                SafetyVerdict::clean()
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.settings.safety_timeout.as_millis() as u64,
                    "Safety check timed out, treating destination as clean"
                );
                metrics::counter!("linkgate_safety_fail_open_total", "reason" => "timeout")
                    .increment(1);
                SafetyVerdict::clean()
            }
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                error!(error = %e, "Password hashing task failed");
                AppError::internal("Password hashing failed", json!({}))
            })?
            .map_err(|e| {
                error!(error = %e, "Password hashing failed");
                AppError::internal("Password hashing failed", json!({}))
            })
    }

    async fn check_password(&self, hash: String, password: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &password))
            .await
            .map_err(|e| {
                error!(error = %e, "Password verification task failed");
                AppError::internal("Password verification failed", json!({}))
            })?
            .map_err(|e| {
                error!(error = %e, "Stored password hash is unreadable");
                AppError::internal("Password verification failed", json!({}))
            })
    }

    async fn insert_custom(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let code = new_link.code.clone();
        let taken = || {
            AppError::conflict(
                "Short code is already taken",
                json!({ "code": code.as_str() }),
            )
        };

        if self.repository.exists(&code).await? {
            return Err(taken());
        }

        match self.repository.insert(new_link).await {
            Err(AppError::Conflict { .. }) => Err(taken()),
            result => result,
        }
    }

    async fn insert_generated<F>(&self, build: F) -> Result<ShortLink, AppError>
    where
        F: Fn(String) -> NewShortLink,
    {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code();

            if self.repository.exists(&code).await? {
                debug!(attempt, "Generated code collided");
                continue;
            }

            match self.repository.insert(build(code)).await {
                Err(AppError::Conflict { .. }) => {
                    debug!(attempt, "Generated code lost an insert race");
                }
                result => return result,
            }
        }

        error!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Could not allocate a unique short code"
        );
        Err(AppError::unavailable(
            "Could not allocate a short code, please retry",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    async fn count_click(&self, mut link: ShortLink) -> Resolution {
        match self.repository.increment_clicks(&link.code).await {
            Ok(true) => {
                link.click_count += 1;
                Resolution::Redirect(link)
            }
            Ok(false) => match link.max_clicks {
                Some(max_clicks) => {
                    link.click_count = link.click_count.max(max_clicks);
                    Resolution::QuotaExceeded(link)
                }
                None => Resolution::NotFound,
            },
            Err(e) => {
                error!(code = %link.code, error = %e, "Click increment failed");
                metrics::counter!("linkgate_click_increment_failures_total").increment(1);
                Resolution::Redirect(link)
            }
        }
    }

    /// Removes the listed codes that are still stale at `now`. A code that was
    /// re-created in the meantime is left alone.
    async fn prune(&self, codes: &[String], now: DateTime<Utc>) {
        match self.repository.delete_stale_codes(codes, now).await {
            Ok(removed) => {
                info!(removed, "Pruned stale variants");
                metrics::counter!("linkgate_variants_pruned_total").increment(removed);
            }
            Err(e) => warn!(error = %e, count = codes.len(), "Failed to prune stale variants"),
        }
    }
}

/// Error reported for a code that cannot be used.
fn terminal_error(code: &str, state: LinkState) -> AppError {
    match state {
        LinkState::Expired => AppError::gone(
            "Short link has expired",
            json!({ "code": code, "state": state.as_str() }),
        ),
        LinkState::QuotaExceeded => AppError::gone(
            "Short link has reached its click limit",
            json!({ "code": code, "state": state.as_str() }),
        ),
        LinkState::NotFound | LinkState::Active => {
            AppError::not_found("Short link not found", json!({ "code": code }))
        }
    }
}

fn ensure_valid_code(code: &str) -> Result<(), AppError> {
    if is_valid_code(code) {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Invalid short code",
            json!({ "code": code, "reason": "Must be exactly 6 characters from [A-Za-z0-9]" }),
        ))
    }
}
