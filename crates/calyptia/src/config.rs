//! Stored CLI configuration
//!
//! The project token and cloud URL live as plain files under the user
//! config directory so they don't have to be passed on every command.
//! `CALYPTIA_CONFIG_DIR` overrides the location (used by tests).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

const TOKEN_FILE: &str = "project_token";
const URL_FILE: &str = "cloud_url";

fn config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("CALYPTIA_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|d| d.join("calyptia"))
        .context("could not determine the user config directory")
}

fn read_entry(dir: &Path, name: &str) -> anyhow::Result<Option<String>> {
    match fs::read_to_string(dir.join(name)) {
        Ok(s) => Ok(Some(s.trim().to_string()).filter(|s| !s.is_empty())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("could not read stored {name}")),
    }
}

fn write_entry(dir: &Path, name: &str, value: &str) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("could not create config directory {}", dir.display()))?;
    fs::write(dir.join(name), value).with_context(|| format!("could not store {name}"))
}

fn delete_entry(dir: &Path, name: &str) -> anyhow::Result<()> {
    match fs::remove_file(dir.join(name)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("could not delete stored {name}")),
    }
}

pub fn stored_token() -> anyhow::Result<Option<String>> {
    read_entry(&config_dir()?, TOKEN_FILE)
}

pub fn save_token(token: &str) -> anyhow::Result<()> {
    write_entry(&config_dir()?, TOKEN_FILE, token)
}

pub fn delete_token() -> anyhow::Result<()> {
    delete_entry(&config_dir()?, TOKEN_FILE)
}

pub fn stored_url() -> anyhow::Result<Option<String>> {
    read_entry(&config_dir()?, URL_FILE)
}

pub fn save_url(url: &str) -> anyhow::Result<()> {
    write_entry(&config_dir()?, URL_FILE, url)
}

pub fn delete_url() -> anyhow::Result<()> {
    delete_entry(&config_dir()?, URL_FILE)
}
