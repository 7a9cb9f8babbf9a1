use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, SecondsFormat};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::cache::token::CachedToken;
use crate::observability::metrics::get_metrics;

/// Single-record token store.
///
/// The record is two lines: the token value, then the expiry as RFC 3339
/// with offset. Anything else found at `path` is treated as corruption and removed.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. Never fails: a missing, unreadable or corrupt
    /// record is reported as `None`, and a corrupt one is purged.
    pub async fn load(&self) -> Option<CachedToken> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no cached token at '{}'", self.path.display());
                return None;
            }
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                warn!("cached token at '{}' is not valid UTF-8, purging", self.path.display());
                self.purge_corrupt().await;
                return None;
            }
            Err(err) => {
                warn!("cannot read cached token at '{}': {}", self.path.display(), err);
                return None;
            }
        };

        match decode_record(&content) {
            Ok(token) => Some(token),
            Err(err) => {
                warn!("cached token at '{}' is corrupt ({}), purging", self.path.display(), err);
                self.purge_corrupt().await;
                None
            }
        }
    }

    /// Persist `token`, replacing any previous record.
    ///
    /// Writes a sibling `.tmp` file (mode 0600 on unix) and renames it over
    /// the target, so readers see either the old or the new record.
    pub async fn save(&self, token: &CachedToken) -> Result<()> {
        let record = encode_record(token)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }

        let tmp = tmp_path(&self.path);
        if let Err(e) = write_and_replace(&tmp, &self.path, &record).await {
            // nothing should be left next to the record after a failed save
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!("failed to remove '{}': {}", tmp.display(), cleanup);
                }
            }
            return Err(e);
        }

        info!("token stored at '{}', expires at {}", self.path.display(), token.expires_at);
        Ok(())
    }

    /// Remove the record. A missing file is not an error.
    pub async fn purge(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(_) => {
                info!("deleted cached token '{}'", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow!("failed to delete '{}': {}", self.path.display(), e)),
        }
    }

    async fn purge_corrupt(&self) {
        get_metrics().await.token_cache_purges.inc();
        if let Err(err) = self.purge().await {
            warn!("{}", err);
        }
    }
}

async fn write_and_replace(tmp: &Path, target: &Path, record: &str) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(tmp)
        .await
        .with_context(|| format!("failed to open '{}'", tmp.display()))?;
    file.write_all(record.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(tmp, target)
        .await
        .with_context(|| format!("failed to move token into '{}'", target.display()))
}

fn encode_record(token: &CachedToken) -> Result<String> {
    if token.value.is_empty() {
        return Err(anyhow!("refusing to store an empty token"));
    }
    if token.value.contains(['\n', '\r']) {
        return Err(anyhow!("refusing to store a token containing a line break"));
    }
    Ok(format!(
        "{}\n{}\n",
        token.value,
        token.expires_at.to_rfc3339_opts(SecondsFormat::Secs, false)
    ))
}

fn decode_record(content: &str) -> Result<CachedToken> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() != 2 {
        return Err(anyhow!("expected 2 lines, found {}", lines.len()));
    }

    let value = lines[0];
    if value.is_empty() {
        return Err(anyhow!("token value is empty"));
    }

    let expires_at = DateTime::parse_from_rfc3339(lines[1].trim())
        .map_err(|e| anyhow!("expiry '{}' is not RFC 3339: {}", lines[1], e))?
        .with_timezone(&Local);

    Ok(CachedToken::new(value.to_owned(), expires_at))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
