// src/sheets/credentials.rs
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use ring::signature::RsaKeyPair;
use serde::{Deserialize, Serialize};

use crate::config::consts::TOKEN_LIFETIME;
use crate::error::{CredentialsError, PublishError};

/// Service-account key file, as downloaded from the cloud console.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServiceAccount {
    #[serde(rename = "type")]
    pub kind: String,
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub auth_provider_x509_cert_url: String,
    pub client_x509_cert_url: String,
    #[serde(default)]
    pub universe_domain: Option<String>,
}

#[derive(Serialize)]
struct JwtHeader<'a> {
    alg: &'static str,
    typ: &'static str,
    kid: &'a str,
}

#[derive(Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

impl ServiceAccount {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// `header.claims` half of the token request assertion, base64url encoded.
    pub fn signing_input(&self, scope: &str, now: DateTime<Utc>) -> Result<String, PublishError> {
        let iat = now.timestamp();
        let exp = iat + TOKEN_LIFETIME.as_secs() as i64;

        let header = JwtHeader { alg: "RS256", typ: "JWT", kid: &self.private_key_id };
        let claims = JwtClaims { iss: &self.client_email, scope, aud: &self.token_uri, exp, iat };

        let header = serde_json::to_vec(&header)
            .map_err(|e| PublishError::Signing(format!("jwt header: {e}")))?;
        let claims = serde_json::to_vec(&claims)
            .map_err(|e| PublishError::Signing(format!("jwt claims: {e}")))?;

        Ok(join!(
            &BASE64_URL_SAFE_NO_PAD.encode(header),
            ".",
            &BASE64_URL_SAFE_NO_PAD.encode(claims)
        ))
    }

    /// Signed RS256 assertion for the JWT-bearer grant.
    pub fn assertion(&self, scope: &str, now: DateTime<Utc>) -> Result<String, PublishError> {
        let signing_input = self.signing_input(scope, now)?;
        let key_pair = self.key_pair()?;

        let mut signature = vec![0; key_pair.public().modulus_len()];
        key_pair
            .sign(
                &ring::signature::RSA_PKCS1_SHA256,
                &ring::rand::SystemRandom::new(),
                signing_input.as_bytes(),
                &mut signature,
            )
            .map_err(|_| PublishError::Signing(s!("rsa signing failed")))?;

        Ok(join!(&signing_input, ".", &BASE64_URL_SAFE_NO_PAD.encode(&signature)))
    }

    fn key_pair(&self) -> Result<RsaKeyPair, PublishError> {
        let mut reader = std::io::Cursor::new(self.private_key.as_bytes());
        let item = rustls_pemfile::read_one(&mut reader)
            .map_err(|e| PublishError::Signing(format!("invalid PEM private key: {e}")))?;

        match item {
            Some(rustls_pemfile::Item::Pkcs8Key(der)) => RsaKeyPair::from_pkcs8(der.secret_pkcs8_der())
                .map_err(|e| PublishError::Signing(format!("rejected pkcs8 key: {e}"))),
            Some(rustls_pemfile::Item::Pkcs1Key(der)) => RsaKeyPair::from_der(der.secret_pkcs1_der())
                .map_err(|e| PublishError::Signing(format!("rejected pkcs1 key: {e}"))),
            _ => Err(PublishError::Signing(s!("no RSA private key in credentials"))),
        }
    }
}

/// Loads the key file on first use and keeps it in memory afterwards.
/// A failed load is not remembered; the next call reads the file again.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    account: Option<ServiceAccount>,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), account: None }
    }

    /// Store that starts out loaded; the path is kept for reporting only.
    pub fn preloaded(path: impl Into<PathBuf>, account: ServiceAccount) -> Self {
        Self { path: path.into(), account: Some(account) }
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn is_loaded(&self) -> bool { self.account.is_some() }

    pub fn get(&mut self) -> Result<&ServiceAccount, CredentialsError> {
        let account = match self.account.take() {
            Some(account) => account,
            None => {
                let account = load(&self.path)?;
                logf!("Loaded credentials for {}", account.client_email);
                account
            }
        };
        Ok(self.account.insert(account))
    }
}

pub fn load(path: &Path) -> Result<ServiceAccount, CredentialsError> {
    let text = fs::read_to_string(path)
        .map_err(|source| CredentialsError::Read { path: path.to_path_buf(), source })?;
    ServiceAccount::from_json(&text)
        .map_err(|source| CredentialsError::Parse { path: path.to_path_buf(), source })
}
