// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static CONFIG: OnceLock<GneissConfig> = OnceLock::new();

fn default_log_level() -> String {
    "info".to_string()
}

fn default_chunk_capacity() -> usize {
    4096
}

fn default_pretty_chunk_rows() -> usize {
    16
}

pub fn init_from_path(path: impl AsRef<Path>) -> Result<&'static GneissConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let path = path.as_ref().to_path_buf();
    let cfg = GneissConfig::load_from_file(&path)?;
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

pub fn init_from_env_or_default() -> Result<&'static GneissConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let path = config_path_from_env_or_default()?;
    let cfg = GneissConfig::load_from_file(&path)?;
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

pub fn config() -> Result<&'static GneissConfig> {
    init_from_env_or_default()
}

fn config_path_from_env_or_default() -> Result<PathBuf> {
    if let Ok(p) = std::env::var("GNEISS_CONFIG") {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p));
        }
    }

    let candidates = [PathBuf::from("gneiss.toml")];
    for p in candidates {
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "missing config file: set $GNEISS_CONFIG or create ./gneiss.toml"
    ))
}

#[derive(Clone, Deserialize)]
pub struct GneissConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional full tracing EnvFilter expression.
    /// If set, this takes precedence over `log_level`.
    /// Example: "gneiss=debug"
    #[serde(default)]
    pub log_filter: Option<String>,

    #[serde(default)]
    pub exec: ExecConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

impl GneissConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let cfg: GneissConfig =
            toml::from_str(&s).with_context(|| format!("parse toml: {}", path.display()))?;
        Ok(cfg)
    }
}

impl Default for GneissConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_filter: None,
            exec: ExecConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct ExecConfig {
    /// Default row capacity for newly created chunks. Values above the
    /// engine-wide maximum chunk size are clamped when consumed.
    #[serde(default = "default_chunk_capacity")]
    pub default_chunk_capacity: usize,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            default_chunk_capacity: default_chunk_capacity(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct DebugConfig {
    /// Maximum rows rendered by chunk pretty-printing.
    #[serde(default = "default_pretty_chunk_rows")]
    pub pretty_chunk_rows: usize,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            pretty_chunk_rows: default_pretty_chunk_rows(),
        }
    }
}
