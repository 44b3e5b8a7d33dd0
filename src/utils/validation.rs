use crate::utils::error::{Result, SavepageError};
use std::net::IpAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Eligibility check for a page the user asked to archive. Only publicly
/// reachable http/https pages qualify; pages served by the archive host
/// itself are rejected to avoid archiving captures.
pub fn validate_page_url(url_str: &str, archive_host: &str) -> Result<()> {
    let ineligible = |reason: &str| SavepageError::IneligibleUrlError {
        url: url_str.to_string(),
        reason: reason.to_string(),
    };

    if url_str.trim().is_empty() {
        return Err(ineligible("URL is empty"));
    }

    let url = Url::parse(url_str).map_err(|e| ineligible(&format!("not a valid URL: {}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(ineligible(&format!("unsupported scheme: {}", scheme))),
    }

    let host = url.host_str().ok_or_else(|| ineligible("URL has no host"))?;

    if host.eq_ignore_ascii_case("localhost") {
        return Err(ineligible("local pages cannot be archived"));
    }
    if let Ok(ip) = host.parse::<IpAddr>() {
        if ip.is_loopback() {
            return Err(ineligible("local pages cannot be archived"));
        }
    }

    if let Ok(archive) = Url::parse(archive_host) {
        if archive.host_str() == Some(host) {
            return Err(ineligible("page is already on the archive host"));
        }
    }

    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SavepageError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SavepageError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SavepageError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SavepageError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SavepageError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SavepageError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
