use crate::utils::error::{CatchError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CatchError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CatchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Every id in a keyword table must be unique and carry at least one
/// non-blank alias.
pub fn validate_keyword_table<'a>(
    field_name: &str,
    table: impl IntoIterator<Item = (&'a str, &'a [String])>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for (id, aliases) in table {
        validate_non_empty_string(field_name, id)?;
        if !seen.insert(id) {
            return Err(CatchError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: id.to_string(),
                reason: "Duplicate identifier".to_string(),
            });
        }
        if aliases.is_empty() {
            return Err(CatchError::InvalidConfigValueError {
                field: format!("{}.aliases", field_name),
                value: id.to_string(),
                reason: "At least one alias is required".to_string(),
            });
        }
        for alias in aliases {
            validate_non_empty_string(&format!("{}.aliases", field_name), alias)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("sources.fishingmax.urls", "https://example.com").is_ok());
        assert!(validate_url("sources.fishingmax.urls", "http://example.com").is_ok());
        assert!(validate_url("sources.fishingmax.urls", "").is_err());
        assert!(validate_url("sources.fishingmax.urls", "invalid-url").is_err());
        assert!(validate_url("sources.fishingmax.urls", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("report.max_records", 15, 1).is_ok());
        assert!(validate_positive_number("report.max_records", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("site.latitude", 34.69, -90.0, 90.0).is_ok());
        assert!(validate_range("site.latitude", 134.69, -90.0, 90.0).is_err());
    }

    #[test]
    fn test_validate_keyword_table() {
        let suma = vec!["須磨".to_string()];
        let empty: Vec<String> = vec![];
        let blank = vec!["  ".to_string()];

        assert!(validate_keyword_table("locations", [("須磨海釣り公園", suma.as_slice())]).is_ok());
        assert!(validate_keyword_table(
            "locations",
            [("須磨海釣り公園", suma.as_slice()), ("須磨海釣り公園", suma.as_slice())]
        )
        .is_err());
        assert!(validate_keyword_table("locations", [("明石港", empty.as_slice())]).is_err());
        assert!(validate_keyword_table("locations", [("明石港", blank.as_slice())]).is_err());
    }
}
