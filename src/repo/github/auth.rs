use std::process::Command;

use anyhow::{Result, anyhow};

const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// First non-blank line of tool output, so diagnostics stay on one line.
fn first_line(raw: &str) -> &str {
    raw.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
}

fn fallback_env_token() -> Result<Option<String>> {
    let raw = match std::env::var(TOKEN_ENV) {
        Ok(raw) => raw,
        Err(std::env::VarError::NotPresent) => return Ok(None),
        Err(e) => {
            return Err(anyhow!("config has no token and {TOKEN_ENV} is unreadable: {e}"));
        }
    };
    let token = raw.trim();
    if token.is_empty() {
        return Err(anyhow!(
            "config has no token and {TOKEN_ENV} is set but empty; please re-export"
        ));
    }
    Ok(Some(token.to_string()))
}

fn fallback_gh_token() -> Result<String> {
    let mut cmd = Command::new("gh");
    cmd.args(["auth", "token"]);
    if let Some(host) = std::env::var("GH_HOST")
        .ok()
        .filter(|h| !h.trim().is_empty())
    {
        cmd.args(["--hostname", host.trim()]);
    }

    let output = cmd.output().map_err(|e| {
        anyhow!("config has no token, {TOKEN_ENV} is unset, and `gh auth token` could not run: {e}")
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "config has no token and `gh auth token` failed ({}): {}",
            output.status,
            first_line(&stderr)
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match first_line(&stdout) {
        "" => Err(anyhow!(
            "config has no token and `gh auth token` printed nothing; run `gh auth login`"
        )),
        token => Ok(token.to_string()),
    }
}

/// Resolve the access token used for the GraphQL client.
///
/// Priority:
/// 1) `token` from the config file
/// 2) `GITHUB_TOKEN`
/// 3) `gh auth token` (optionally with `GH_HOST`)
pub fn resolve_token(configured: &str) -> Result<String> {
    let configured = configured.trim();
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }
    if let Some(token) = fallback_env_token()? {
        log::info!("config has no token, using {TOKEN_ENV}");
        return Ok(token);
    }
    log::info!("config has no token and {TOKEN_ENV} is unset, asking `gh auth token`");
    fallback_gh_token()
}
