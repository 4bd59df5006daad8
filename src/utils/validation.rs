use anyhow::{anyhow, Result};

/// Parses the optional page argument of /pending. An absent argument means
/// the first page; anything that is not a non-negative integer is rejected
/// with a usage message instead of being silently coerced.
pub fn parse_page_argument(arg: &str) -> Result<i64> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Ok(0);
    }

    let page: i64 = arg
        .parse()
        .map_err(|_| anyhow!("Page must be a number"))?;
    if page < 0 {
        return Err(anyhow!("Page cannot be negative"));
    }

    Ok(page)
}

/// Parses the appeal id argument of /approve and /reject. Only plain
/// non-negative integers are accepted.
pub fn parse_appeal_id(arg: &str) -> Result<i64> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(anyhow!("Appeal ID is required"));
    }

    let id: i64 = arg
        .parse()
        .map_err(|_| anyhow!("Appeal ID must be a number"))?;
    if id < 0 {
        return Err(anyhow!("Appeal ID must be a number"));
    }

    Ok(id)
}
