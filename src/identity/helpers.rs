use rand::Rng;
use sha2::{Digest, Sha256};

use crate::internal_error::Rejection;

use super::data::*;

fn digest_secret(salt: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn new_credential(secret: &str) -> Credential {
    let salt = hex::encode(rand::thread_rng().gen::<[u8; 16]>());
    let digest = digest_secret(&salt, secret);

    Credential { salt, digest }
}

pub fn credential_matches(credential: &Credential, secret: &str) -> bool {
    digest_secret(&credential.salt, secret) == credential.digest
}

pub fn require_field(value: &str, name: &'static str) -> Result<(), Rejection> {
    if value.is_empty() {
        Err(Rejection::MissingField(name))
    } else {
        Ok(())
    }
}

impl UserDirectory {
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), Rejection> {
        require_field(username, "username")?;
        require_field(password, "password")?;

        if self.users.contains_key(username) {
            return Err(Rejection::UserExists);
        }

        self.users
            .insert(username.to_string(), new_credential(password));

        Ok(())
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), Rejection> {
        require_field(username, "username")?;
        require_field(password, "password")?;

        match self.users.get(username) {
            Some(credential) if credential_matches(credential, password) => Ok(()),
            _ => Err(Rejection::InvalidCredentials),
        }
    }
}

impl Session {
    pub fn start(&mut self, username: &str) {
        self.user = Some(username.to_string());
    }

    pub fn end(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Result<&str, Rejection> {
        self.user.as_deref().ok_or(Rejection::NotLoggedIn)
    }
}
