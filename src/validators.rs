use anyhow::Result;

pub(crate) const DEFAULT_PAGE_SIZE: i64 = 10;
pub(crate) const MAX_PAGE_SIZE: i64 = 100;
const MAX_TITLE_LEN: usize = 500;

pub(crate) fn validate_username(username: &str) -> Result<()> {
    if username.len() < 3 || username.len() > 32 {
        return Err(anyhow::anyhow!("username must be 3-32 characters"));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(anyhow::anyhow!(
            "username must be alphanumeric or '-', '_', '.'"
        ));
    }
    Ok(())
}

/// Itemized password policy violations, empty when the password is acceptable.
pub(crate) fn password_issues(password: &str) -> Vec<String> {
    let mut issues = Vec::new();
    if password.len() < 8 {
        issues.push("password must be at least 8 characters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push("password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        issues.push("password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push("password must contain a digit".to_string());
    }
    issues
}

pub(crate) fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(anyhow::anyhow!("title cannot be empty"));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(anyhow::anyhow!(
            "title cannot exceed {} bytes",
            MAX_TITLE_LEN
        ));
    }
    Ok(())
}

pub(crate) fn validate_page_size(page_size: i64) -> Result<i64> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(anyhow::anyhow!(
            "pageSize must be between 1 and {}",
            MAX_PAGE_SIZE
        ));
    }
    Ok(page_size)
}
