use config::{Config, ConfigError};
use serde::Deserialize;

/// 默认配置文件名，可通过环境变量 `APP_CONFIG_FILE` 覆盖
pub const DEFAULT_CONFIG_FILE: &str = "api-config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    pub redis: Option<RedisConfig>,
    pub sys: Option<SysConfig>,
    pub auth: Option<AuthConfig>,
    pub upstream: Option<UpstreamConfig>,
    pub profile: Option<ProfileConfig>,
}

impl AppConfig {
    /// 读取配置文件，并叠加 `APP_` 前缀的环境变量（如 `APP_REDIS__URL`）
    pub fn new(file: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("APP").prefix_separator("_").separator("__"))
            .build()?;
        config.try_deserialize::<AppConfig>()
    }

    pub fn get_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
    pub fn get_redis(&self) -> RedisConfig {
        self.redis.clone().unwrap_or_default()
    }
    pub fn get_sys(&self) -> SysConfig {
        self.sys.clone().unwrap_or_default()
    }
    pub fn get_auth(&self) -> AuthConfig {
        self.auth.clone().unwrap_or_default()
    }
    pub fn get_upstream(&self) -> UpstreamConfig {
        self.upstream.clone().unwrap_or_default()
    }
    pub fn get_profile(&self) -> ProfileConfig {
        self.profile.clone().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}
impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
    /// 最大连接数
    pub pool_size: usize,
    /// 单次 Redis 调用超时（毫秒）
    pub timeout_ms: u64,
}
impl Default for RedisConfig {
    fn default() -> Self {
        Self { url: "redis://127.0.0.1:6379".to_string(), pool_size: 16, timeout_ms: 2000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SysConfig {
    //全局日志级别
    pub log_leve: String,
}
impl Default for SysConfig {
    fn default() -> Self {
        Self { log_leve: "info".to_string() }
    }
}

/// 身份解析方式
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Bearer token / Cookie 到 Redis 会话中查找
    #[default]
    Session,
    /// 信任上游认证代理写入的请求头
    Header,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub header_name: String,
    pub session_cookie: String,
    pub session_prefix: String,
}
impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::Session,
            header_name: "x-auth-email".to_string(),
            session_cookie: "session".to_string(),
            session_prefix: "session:".to_string(),
        }
    }
}

/// 外部搜索 / 解释服务
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}
impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8000".to_string(), timeout_ms: 10_000 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProfileConfig {
    /// 员工资料 JSON（`{"employees": [...]}`）
    pub data_path: String,
}
impl Default for ProfileConfig {
    fn default() -> Self {
        Self { data_path: "data/keyman_profiles.json".to_string() }
    }
}
