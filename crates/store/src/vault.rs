//! Settings vault — keeps the provider credential encrypted at rest.
//!
//! The agent loop and chat client only ever see decrypted, opaque strings;
//! the cipher is a capability injected here, never a process-wide global.
//! `KeystreamCipher` is deliberately simple key-derived obfuscation: it
//! keeps secrets out of plaintext config files. Swap in a real AEAD behind
//! the same trait for anything stronger.

use concierge_core::error::StoreError;
use concierge_config::AppConfig;

/// Prefix marking a config value as vault ciphertext.
const ENCRYPTED_PREFIX: &str = "enc:";

/// The abstract encrypt/decrypt(string) -> string capability.
pub trait SettingsCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> String;
    fn decrypt(&self, ciphertext: &str) -> Result<String, StoreError>;
}

/// Identity cipher for tests and unencrypted setups.
pub struct PlainCipher;

impl SettingsCipher for PlainCipher {
    fn encrypt(&self, plaintext: &str) -> String {
        plaintext.to_string()
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, StoreError> {
        Ok(ciphertext.to_string())
    }
}

/// XOR-keystream cipher with a passphrase-derived key, hex-armored.
pub struct KeystreamCipher {
    key: [u8; 32],
}

impl KeystreamCipher {
    /// Derive a 32-byte key from a passphrase.
    pub fn new(passphrase: &str) -> Self {
        Self {
            key: derive_key(passphrase),
        }
    }
}

impl SettingsCipher for KeystreamCipher {
    fn encrypt(&self, plaintext: &str) -> String {
        hex_encode(&apply_keystream(plaintext.as_bytes(), &self.key))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, StoreError> {
        let bytes = hex_decode(ciphertext)
            .ok_or_else(|| StoreError::DecryptionFailed("ciphertext is not valid hex".into()))?;
        String::from_utf8(apply_keystream(&bytes, &self.key))
            .map_err(|_| StoreError::DecryptionFailed("invalid UTF-8 after decryption".into()))
    }
}

/// Resolved, decrypted settings for the chat-completion client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub endpoint: String,
    pub credential: String,
    pub model: String,
}

/// Resolves provider settings from config, decrypting where marked.
pub struct SettingsVault {
    cipher: Box<dyn SettingsCipher>,
}

impl SettingsVault {
    pub fn new(cipher: Box<dyn SettingsCipher>) -> Self {
        Self { cipher }
    }

    /// Produce the `enc:`-prefixed form of a credential for storage.
    pub fn seal(&self, plaintext: &str) -> String {
        format!("{ENCRYPTED_PREFIX}{}", self.cipher.encrypt(plaintext))
    }

    /// Resolve endpoint, credential, and model from the loaded config.
    ///
    /// A credential carrying the `enc:` prefix is decrypted; anything else
    /// passes through untouched (environment-sourced keys are plaintext).
    pub fn resolve(&self, config: &AppConfig) -> Result<ProviderSettings, StoreError> {
        let raw = config
            .api_key
            .clone()
            .ok_or_else(|| StoreError::Storage("no API key configured".into()))?;

        let credential = match raw.strip_prefix(ENCRYPTED_PREFIX) {
            Some(ciphertext) => self.cipher.decrypt(ciphertext)?,
            None => raw,
        };

        Ok(ProviderSettings {
            endpoint: config.endpoint.clone(),
            credential,
            model: config.model.clone(),
        })
    }
}

fn derive_key(passphrase: &str) -> [u8; 32] {
    let mut key = [0u8; 32];
    for (i, &b) in passphrase.as_bytes().iter().enumerate() {
        key[i % 32] ^= b;
        key[(i + 11) % 32] = key[(i + 11) % 32]
            .wrapping_add(b.wrapping_mul((i as u8).wrapping_add(7)));
    }
    for round in 0..64u8 {
        for i in 0..32 {
            let prev = key[(i + 31) % 32];
            key[i] = key[i].wrapping_add(prev).wrapping_mul(41).wrapping_add(round);
        }
    }
    key
}

fn apply_keystream(data: &[u8], key: &[u8; 32]) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, &b)| {
            let k = key[i % 32]
                .wrapping_add((i / 32) as u8)
                .rotate_left((i % 7) as u32);
            b ^ k
        })
        .collect()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(text.get(i..i + 2)?, 16).ok())
        .collect()
}
