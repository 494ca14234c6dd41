//! Seed data for the three collections.
//!
//! The bundled set is compiled in; a directory holding `users.json`,
//! `apps.json` and `ai_logs.json` can replace it at startup.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::core::{ConsoleError, Result};
use crate::models::{AiLog, App, User};

const USERS_JSON: &str = include_str!("../../fixtures/users.json");
const APPS_JSON: &str = include_str!("../../fixtures/apps.json");
const AI_LOGS_JSON: &str = include_str!("../../fixtures/ai_logs.json");

pub const USERS_FILE: &str = "users.json";
pub const APPS_FILE: &str = "apps.json";
pub const AI_LOGS_FILE: &str = "ai_logs.json";

#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    pub users: Vec<User>,
    pub apps: Vec<App>,
    pub ai_logs: Vec<AiLog>,
}

impl FixtureSet {
    /// The fixture set shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            users: parse(USERS_JSON, USERS_FILE)?,
            apps: parse(APPS_JSON, APPS_FILE)?,
            ai_logs: parse(AI_LOGS_JSON, AI_LOGS_FILE)?,
        })
    }

    /// Load all three files from `dir`. Every file must be present.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            users: read(dir, USERS_FILE)?,
            apps: read(dir, APPS_FILE)?,
            ai_logs: read(dir, AI_LOGS_FILE)?,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

fn read<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>> {
    let path = dir.join(file);
    let body = fs::read_to_string(&path)
        .map_err(|e| ConsoleError::Fixture(format!("{}: {}", path.display(), e)))?;
    parse(&body, file)
}

fn parse<T: DeserializeOwned>(body: &str, file: &str) -> Result<Vec<T>> {
    serde_json::from_str(body).map_err(|e| ConsoleError::Fixture(format!("{file}: {e}")))
}
