use async_trait::async_trait;
use cookie::Cookie;
use ferrous_doh_application::ports::CookieJar;
use ferrous_doh_domain::DomainError;
use std::path::{Path, PathBuf};
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Cookie jar persisted as one `Set-Cookie` line per cookie.
///
/// Every cookie is written with `Path=/`, `Max-Age` and an absolute
/// `Expires`; the latter decides expiry on read since `Max-Age` is relative
/// to the moment it was written.
pub struct FileCookieJar {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCookieJar {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_lines(&self) -> Result<Vec<String>, DomainError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(raw
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(DomainError::Cookie(format!("{}: {e}", self.path.display()))),
        }
    }
}

fn is_expired(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    cookie.expires_datetime().is_some_and(|at| at <= now)
}

#[async_trait]
impl CookieJar for FileCookieJar {
    async fn get(&self, name: &str) -> Result<Option<String>, DomainError> {
        let _guard = self.lock.lock().await;
        let now = OffsetDateTime::now_utc();

        for line in self.read_lines().await? {
            let Ok(cookie) = Cookie::parse(line.as_str()) else {
                warn!(line = %line, "Skipping unparsable cookie line");
                continue;
            };
            if cookie.name() != name {
                continue;
            }
            if is_expired(&cookie, now) {
                debug!(name, "Cookie expired");
                return Ok(None);
            }
            return Ok(Some(cookie.value().to_string()));
        }
        Ok(None)
    }

    async fn set(&self, name: &str, value: &str, max_age_secs: i64) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;

        let cookie = Cookie::build((name.to_string(), value.to_string()))
            .path("/")
            .max_age(Duration::seconds(max_age_secs))
            .expires(OffsetDateTime::now_utc() + Duration::seconds(max_age_secs))
            .build();

        let mut lines: Vec<String> = self
            .read_lines()
            .await?
            .into_iter()
            .filter(|l| {
                Cookie::parse(l.as_str())
                    .map(|c| c.name() != name)
                    .unwrap_or(true)
            })
            .collect();
        lines.push(cookie.to_string());

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Cookie(format!("{}: {e}", parent.display())))?;
        }

        let mut raw = lines.join("\n");
        raw.push('\n');
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| DomainError::Cookie(format!("{}: {e}", self.path.display())))
    }
}
