use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URI: &str = "https://api.soundcloud.com";
pub const DEFAULT_CLIENT_ID: &str = "398e83f17ec3c5cf945f04772de9f400";

/// 테스트 환경에서 API 루트를 바꿀 때 사용하는 환경 변수.
pub const APIROOT_ENV: &str = "NETWORK_SCOPE_APIROOT";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub soundcloud: SoundCloudConfig,
}

/// SoundCloud API 접속 설정. 시작 시 한 번 읽고 이후에는 바꾸지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SoundCloudConfig {
    pub base_uri: String,
    pub client_id: String,
    pub user_agent: String,
}

impl Default for SoundCloudConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            user_agent: format!("soundcloud-scope/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SoundCloudConfig {
    /// 환경 변수에 API 루트가 지정되어 있으면 덮어쓴다.
    fn apply_env(&mut self, apiroot: Option<String>) {
        if let Some(root) = apiroot.filter(|r| !r.is_empty()) {
            self.base_uri = root;
        }
        while self.base_uri.ends_with('/') {
            self.base_uri.pop();
        }
    }
}

/// `$XDG_CONFIG_HOME`이 있으면 그 아래, 없으면 `$HOME/.config` 아래에 둔다.
fn config_dir(xdg_config_home: Option<String>, home: Option<String>) -> PathBuf {
    match xdg_config_home.filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.unwrap_or_else(|| ".".to_string())).join(".config"),
    }
    .join("soundcloud-scope")
}

fn config_path() -> PathBuf {
    config_dir(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
    .join("config.toml")
}

/// 설정 파일 내용을 해석한다. 형식이 잘못되었으면 경고를 남기고 기본값을 쓴다.
fn parse_config(content: &str, path: &Path) -> Config {
    toml::from_str(content).unwrap_or_else(|e| {
        log::warn!("설정 파일 형식이 잘못되어 기본값을 사용합니다 ({}): {}", path.display(), e);
        Config::default()
    })
}

fn read_config() -> Config {
    let path = config_path();
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content, &path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(e) => {
            log::warn!("설정 파일을 읽을 수 없어 기본값을 사용합니다 ({}): {}", path.display(), e);
            Config::default()
        }
    }
}

/// 설정 파일을 읽고 환경 변수 오버라이드를 적용한다.
pub fn load_config() -> Config {
    let mut config = read_config();
    config
        .soundcloud
        .apply_env(std::env::var(APIROOT_ENV).ok());
    config
}

/// 환경 변수 오버라이드 없이 파일에 저장된 설정만 읽는다.
pub fn load_stored_config() -> Config {
    read_config()
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("설정 디렉토리를 만들 수 없습니다: {}", dir.display()))?;
    }
    std::fs::write(&path, toml::to_string_pretty(config)?)
        .with_context(|| format!("설정 파일을 쓸 수 없습니다: {}", path.display()))?;
    log::debug!("설정 저장: {}", path.display());
    Ok(())
}
