//! Configuration management
//!
//! 設定は環境変数から読み込む。未設定の項目はデフォルト値を使う。
//!
//! - `BOOKING_API_URL`: バックエンドのベースURL（デフォルト `http://localhost:8080/api/v1`）
//! - `BOOKING_API_TOKEN`: Bearerトークン（予約送信に必要）
//! - `BOOKING_USER_ID` / `BOOKING_USER_ROLE`: サインイン中の利用者
//! - `PORT`: 待ち受けポート（デフォルト 3000）
//! - `BOOKING_USE_MOCK`: `true`ならバックエンドの代わりにインメモリのモックを使う

use thiserror::Error;

use crate::domain::{Role, UserId, UserIdentity};

const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
const DEFAULT_PORT: u16 = 3000;

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("BOOKING_USER_ID is set but BOOKING_API_TOKEN is missing")]
    MissingToken,
}

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    /// サインイン中の利用者（未設定なら予約送信は`Unauthenticated`）
    pub user: Option<UserIdentity>,
    pub port: u16,
    pub use_mock: bool,
}

impl AppConfig {
    /// 環境変数から読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から読み込む（テスト用に環境変数を差し替えられる）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_base_url = get("BOOKING_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_token = get("BOOKING_API_TOKEN");

        let port = match get("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                expected: "port number",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let use_mock = match get("BOOKING_USE_MOCK") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidValue {
                name: "BOOKING_USE_MOCK",
                expected: "boolean",
                value,
            })?,
            None => false,
        };

        let user = match get("BOOKING_USER_ID") {
            Some(value) => {
                let id: i64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    name: "BOOKING_USER_ID",
                    expected: "integer",
                    value,
                })?;
                let role = match get("BOOKING_USER_ROLE") {
                    Some(value) => value.parse::<Role>().map_err(|_| ConfigError::InvalidValue {
                        name: "BOOKING_USER_ROLE",
                        expected: "role",
                        value,
                    })?,
                    None => Role::Client,
                };
                Some(UserIdentity {
                    id: UserId::new(id),
                    role,
                })
            }
            None => None,
        };

        // 実バックエンドへの送信にはトークンが要る
        if user.is_some() && api_token.is_none() && !use_mock {
            return Err(ConfigError::MissingToken);
        }

        Ok(Self {
            api_base_url,
            api_token,
            user,
            port,
            use_mock,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
