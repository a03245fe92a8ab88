//! Environment Variable Helpers
//!
//! Thin helpers for building configuration from the process environment.
//! An empty variable is treated the same as an unset one.
//!
//! [`Env::from_pairs`] builds a fixed source so configuration loaders can
//! be tested without touching the process environment.

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

/// Configuration value could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct EnvError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

/// Where configuration values are read from
#[derive(Debug, Clone, Default)]
pub struct Env {
    fixed: Option<HashMap<String, String>>,
}

impl Env {
    /// Read from the process environment
    pub fn process() -> Self {
        Self { fixed: None }
    }

    /// Read only from the given pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fixed: Some(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Read a variable, returning `None` when unset or empty
    pub fn var(&self, key: &str) -> Option<String> {
        let value = match &self.fixed {
            Some(map) => map.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Read a variable or fall back to `default`
    pub fn var_or(&self, key: &str, default: &str) -> String {
        self.var(key).unwrap_or_else(|| default.to_string())
    }

    /// Read and parse a variable, falling back to `default` when unset
    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T, EnvError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.var(key) {
            None => Ok(default),
            Some(raw) => parse_value(key, &raw),
        }
    }

    /// Read a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`)
    pub fn flag_or(&self, key: &str, default: bool) -> Result<bool, EnvError> {
        match self.var(key) {
            None => Ok(default),
            Some(raw) => parse_flag(key, &raw),
        }
    }
}

/// Read a process variable, returning `None` when unset or empty
pub fn var(key: &str) -> Option<String> {
    Env::process().var(key)
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| EnvError {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, EnvError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(EnvError {
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
