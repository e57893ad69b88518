use anyhow::{Result, anyhow};
use ed25519_dalek::SigningKey;
use gp_api_types::AccountAddress;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Keypair backing the portal's data account.
///
/// Generated once at provisioning time and injected into the portal as
/// configuration; the portal itself never creates key material at load time.
pub struct AccountKeypair {
    signing_key: SigningKey,
}

impl AccountKeypair {
    pub fn generate() -> Self {
        let mut rng = OsRng;
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    pub fn from_secret_key_bytes(secret_key: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&secret_key),
        }
    }

    /// Restore a keypair from the hex form produced by [`secret_hex`].
    ///
    /// [`secret_hex`]: AccountKeypair::secret_hex
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self> {
        let bytes = from_hex(secret_hex.trim())?;
        let secret_key: [u8; 32] = bytes
            .try_into()
            .map_err(|_| anyhow!("secret key must be exactly 32 bytes"))?;
        Ok(Self::from_secret_key_bytes(secret_key))
    }

    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    pub fn secret_hex(&self) -> String {
        to_hex(&self.secret_key_bytes())
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn address(&self) -> AccountAddress {
        let digest = Sha256::digest(self.public_key_bytes());
        AccountAddress(format!("0x{}", to_hex(&digest[..20])))
    }
}

fn to_hex(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len() * 2);
    for byte in input {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

fn from_hex(input: &str) -> Result<Vec<u8>> {
    if input.len() % 2 != 0 {
        return Err(anyhow!("hex string must have an even length"));
    }

    let mut output = Vec::with_capacity(input.len() / 2);
    for index in (0..input.len()).step_by(2) {
        let pair = &input[index..index + 2];
        let byte =
            u8::from_str_radix(pair, 16).map_err(|_| anyhow!("invalid hex byte: {pair}"))?;
        output.push(byte);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_hex_round_trip_preserves_address() {
        let keypair = AccountKeypair::generate();
        let restored = AccountKeypair::from_secret_hex(&keypair.secret_hex()).unwrap();

        assert_eq!(restored.secret_key_bytes(), keypair.secret_key_bytes());
        assert_eq!(restored.address(), keypair.address());
    }

    #[test]
    fn address_is_prefixed_twenty_byte_hex() {
        let keypair = AccountKeypair::from_secret_key_bytes([7_u8; 32]);
        let AccountAddress(address) = keypair.address();

        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 2 + 40);
        // Same secret always derives the same address.
        let again = AccountKeypair::from_secret_key_bytes([7_u8; 32]);
        assert_eq!(again.address().0, address);
    }

    #[test]
    fn from_secret_hex_rejects_malformed_input() {
        assert!(AccountKeypair::from_secret_hex("abc").is_err());
        assert!(AccountKeypair::from_secret_hex("zz".repeat(32).as_str()).is_err());
        assert!(AccountKeypair::from_secret_hex("ff").is_err());
    }
}
