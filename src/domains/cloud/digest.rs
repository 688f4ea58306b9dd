//! HTTP Digest access authentication (RFC 7616).
//!
//! The KB Cloud API authenticates API keys with Digest auth: the key name is
//! the user name and the key secret is the password. Only the client side is
//! implemented: parsing a `WWW-Authenticate` challenge and producing the
//! matching `Authorization` header value.

use md5::Md5;
use rand::Rng;
use sha2::{Digest, Sha256};

use super::error::{CloudError, CloudResult};

/// Hash algorithm announced by the challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Md5,
    Md5Sess,
    Sha256,
    Sha256Sess,
}

impl Algorithm {
    fn parse(value: &str) -> CloudResult<Self> {
        match value.to_ascii_uppercase().as_str() {
            "MD5" => Ok(Self::Md5),
            "MD5-SESS" => Ok(Self::Md5Sess),
            "SHA-256" => Ok(Self::Sha256),
            "SHA-256-SESS" => Ok(Self::Sha256Sess),
            other => Err(CloudError::digest(format!("unsupported algorithm {other}"))),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Md5Sess => "MD5-sess",
            Self::Sha256 => "SHA-256",
            Self::Sha256Sess => "SHA-256-sess",
        }
    }

    fn is_session(&self) -> bool {
        matches!(self, Self::Md5Sess | Self::Sha256Sess)
    }

    fn hash(&self, data: &str) -> String {
        match self {
            Self::Md5 | Self::Md5Sess => to_hex(&Md5::digest(data.as_bytes())),
            Self::Sha256 | Self::Sha256Sess => to_hex(&Sha256::digest(data.as_bytes())),
        }
    }
}

/// A parsed `WWW-Authenticate: Digest ...` challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestChallenge {
    pub realm: String,
    pub nonce: String,
    pub opaque: Option<String>,
    /// `Some("auth")` when the server offers `qop=auth`, `None` for legacy RFC 2069 mode.
    pub qop: Option<String>,
    pub algorithm: Algorithm,
}

impl DigestChallenge {
    /// Parse the value of a `WWW-Authenticate` header.
    pub fn parse(header: &str) -> CloudResult<Self> {
        let header = header.trim();
        let params = match header.split_once(char::is_whitespace) {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("digest") => rest,
            _ => return Err(CloudError::digest("not a Digest challenge")),
        };

        let mut realm = None;
        let mut nonce = None;
        let mut opaque = None;
        let mut qop = None;
        let mut algorithm = Algorithm::Md5;

        for (key, value) in parse_params(params) {
            match key.to_ascii_lowercase().as_str() {
                "realm" => realm = Some(value),
                "nonce" => nonce = Some(value),
                "opaque" => opaque = Some(value),
                "algorithm" => algorithm = Algorithm::parse(&value)?,
                "qop" => {
                    if !value.split(',').any(|q| q.trim().eq_ignore_ascii_case("auth")) {
                        return Err(CloudError::digest(format!("unsupported qop {value}")));
                    }
                    qop = Some("auth".to_string());
                }
                _ => {}
            }
        }

        Ok(Self {
            realm: realm.ok_or_else(|| CloudError::digest("challenge without realm"))?,
            nonce: nonce.ok_or_else(|| CloudError::digest("challenge without nonce"))?,
            opaque,
            qop,
            algorithm,
        })
    }

    /// Compute the `Authorization` header value for a request.
    ///
    /// `uri` is the request target (path and query) exactly as sent.
    pub fn authorization(
        &self,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
        nc: u32,
        cnonce: &str,
    ) -> String {
        let alg = self.algorithm;
        let nc = format!("{nc:08x}");

        let mut ha1 = alg.hash(&format!("{username}:{}:{password}", self.realm));
        if alg.is_session() {
            ha1 = alg.hash(&format!("{ha1}:{}:{cnonce}", self.nonce));
        }
        let ha2 = alg.hash(&format!("{method}:{uri}"));

        let response = match &self.qop {
            Some(qop) => alg.hash(&format!("{ha1}:{}:{nc}:{cnonce}:{qop}:{ha2}", self.nonce)),
            None => alg.hash(&format!("{ha1}:{}:{ha2}", self.nonce)),
        };

        let mut header = format!(
            "Digest username=\"{username}\", realm=\"{}\", nonce=\"{}\", uri=\"{uri}\", algorithm={}, response=\"{response}\"",
            self.realm,
            self.nonce,
            alg.as_str(),
        );
        if let Some(opaque) = &self.opaque {
            header.push_str(&format!(", opaque=\"{opaque}\""));
        }
        if let Some(qop) = &self.qop {
            header.push_str(&format!(", qop={qop}, nc={nc}, cnonce=\"{cnonce}\""));
        }
        header
    }
}

/// Generate a client nonce from 16 random bytes.
pub fn generate_cnonce() -> String {
    let bytes: [u8; 16] = rand::thread_rng().r#gen();
    to_hex(&bytes)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Split `key=value, key="quoted, value"` pairs.
fn parse_params(input: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if *c == ',' || c.is_whitespace()) {
            chars.next();
        }

        let key: String = chars
            .by_ref()
            .take_while(|c| *c != '=')
            .collect::<String>()
            .trim()
            .to_string();
        if key.is_empty() {
            break;
        }

        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            value.push(escaped);
                        }
                    }
                    '"' => break,
                    _ => value.push(c),
                }
            }
        } else {
            while let Some(c) = chars.peek() {
                if *c == ',' {
                    break;
                }
                value.push(*c);
                chars.next();
            }
            value = value.trim().to_string();
        }

        params.push((key, value));
    }

    params
}
