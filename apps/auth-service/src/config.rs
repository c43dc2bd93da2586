//! # Auth Service 設定
//!
//! 環境変数から Auth Service サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | デフォルト |
//! |--------|------|-----------|
//! | `HOST` | No | `0.0.0.0` |
//! | `PORT` | No | `3000` |
//! | `DATABASE_URL` | **Yes** | - |
//! | `DATABASE_MAX_CONNECTIONS` | No | `10`（1 以上） |

use std::{env, str::FromStr};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Auth Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// バインドアドレス
    pub host:                     String,
    /// ポート番号
    pub port:                     u16,
    /// データベース接続 URL
    pub database_url:             String,
    /// 接続プールの最大接続数
    pub database_max_connections: u32,
}

impl AuthConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host:                     lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:                     parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database_url:             lookup("DATABASE_URL")
                .filter(|url| !url.is_empty())
                .ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: parse_max_connections(&lookup)?,
        })
    }
}

/// 最大接続数を読み込む（1 以上）
fn parse_max_connections(lookup: &impl Fn(&str) -> Option<String>) -> Result<u32, ConfigError> {
    const NAME: &str = "DATABASE_MAX_CONNECTIONS";

    match parse_or(lookup, NAME, DEFAULT_MAX_CONNECTIONS)? {
        0 => Err(ConfigError::Invalid {
            name:  NAME,
            value: "0".to_string(),
        }),
        n => Ok(n),
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AuthConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_未設定の項目はデフォルト値になる() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/userdesk")]).unwrap();

        assert_eq!(
            config,
            AuthConfig {
                host:                     "0.0.0.0".to_string(),
                port:                     3000,
                database_url:             "postgres://localhost/userdesk".to_string(),
                database_max_connections: 10,
            }
        );
    }

    #[test]
    fn test_設定値で上書きできる() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://db/userdesk"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_max_connections, 4);
    }

    #[test]
    fn test_database_urlがなければエラー() {
        assert_eq!(load(&[]), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_不正なポート番号はエラー() {
        let result = load(&[("DATABASE_URL", "postgres://db"), ("PORT", "http")]);

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                name:  "PORT",
                value: "http".to_string(),
            })
        );
    }

    #[test]
    fn test_最大接続数が0ならエラー() {
        let result = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]);

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                name:  "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            })
        );
    }
}
