use anyhow::Result;

mod bearer;
pub(crate) mod passwords;
pub(crate) mod tokens;

pub(crate) use self::bearer::require_bearer;

/// 32 bytes of entropy, hex-encoded. Used for user ids and token ids.
pub(crate) fn random_hex() -> Result<String> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(64);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}
