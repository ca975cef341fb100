use anyhow::{Result, anyhow};

/// 32 bytes from the OS CSPRNG, hex-encoded: 64 characters, 256 bits of entropy.
pub fn generate() -> Result<String> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow!("failed to read system entropy: {e}"))?;
    Ok(hex::encode(bytes))
}
