use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub bench: BenchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Run the bench tasks once right after migrations.
    #[serde(default)]
    pub run_on_startup: bool,
    /// Re-run the bench tasks periodically; `None` disables the loop.
    #[serde(default)]
    pub interval_secs: Option<u64>,
    /// Include tasks that drop and recreate the schema.
    #[serde(default)]
    pub allow_destructive: bool,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_data_source_id")]
    pub data_source_id: String,
}

fn default_iterations() -> u32 {
    100
}

fn default_data_source_id() -> String {
    "primary".to_string()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            run_on_startup: false,
            interval_secs: None,
            allow_destructive: false,
            iterations: default_iterations(),
            data_source_id: default_data_source_id(),
        }
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用环境变量与默认值构建
                let database_url = env::var("DATABASE_URL").map_err(|_| {
                    AppError::ConfigError(format!(
                        "DATABASE_URL is not set and {config_path} was not found"
                    ))
                })?;

                Config {
                    server: ServerConfig {
                        host: "0.0.0.0".to_string(),
                        port: 8080,
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: 10,
                    },
                    bench: BenchConfig::default(),
                }
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Failed to read config file {config_path}: {e}"
                )));
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_overrides(|key| env::var(key).ok());

        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {e}")))
    }

    /// Applies `SERVER_*`, `DATABASE_URL`, `DB_MAX_CONNECTIONS` and
    /// `BENCH_*` values returned by `lookup`. Values that do not parse are
    /// logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("Ignoring {key}={raw:?}: not a valid value");
                    None
                }
            }
        }

        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(p) = parsed(&lookup, "SERVER_PORT") {
            self.server.port = p;
        }
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(mc) = parsed(&lookup, "DB_MAX_CONNECTIONS") {
            self.database.max_connections = mc;
        }
        if let Some(b) = parsed(&lookup, "BENCH_RUN_ON_STARTUP") {
            self.bench.run_on_startup = b;
        }
        if let Some(n) = parsed(&lookup, "BENCH_INTERVAL_SECS") {
            self.bench.interval_secs = Some(n);
        }
        if let Some(b) = parsed(&lookup, "BENCH_ALLOW_DESTRUCTIVE") {
            self.bench.allow_destructive = b;
        }
        if let Some(n) = parsed(&lookup, "BENCH_ITERATIONS") {
            self.bench.iterations = n;
        }
        if let Some(v) = lookup("BENCH_DATA_SOURCE_ID") {
            self.bench.data_source_id = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[test]
    fn test_parse_without_bench_section() {
        let config = Config::parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "sqlite::memory:"
            max_connections = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert!(!config.bench.run_on_startup);
        assert_eq!(config.bench.interval_secs, None);
        assert!(!config.bench.allow_destructive);
        assert_eq!(config.bench.iterations, 100);
        assert_eq!(config.bench.data_source_id, "primary");
    }

    #[test]
    fn test_parse_bench_section() {
        let config = Config::parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "postgres://localhost/registry"
            max_connections = 5

            [bench]
            run_on_startup = true
            interval_secs = 600
            data_source_id = "replica"
            "#,
        )
        .unwrap();

        assert!(config.bench.run_on_startup);
        assert_eq!(config.bench.interval_secs, Some(600));
        assert_eq!(config.bench.iterations, 100);
        assert_eq!(config.bench.data_source_id, "replica");
    }

    #[test]
    fn test_parse_rejects_missing_database() {
        let err = Config::parse("[server]\nhost = \"x\"\nport = 1\n").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    const BASE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 9000

        [database]
        url = "sqlite::memory:"
        max_connections = 1
    "#;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = Config::parse(BASE).unwrap();
        config.apply_overrides(lookup_from(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "8181"),
            ("DATABASE_URL", "postgres://db/registry"),
            ("DB_MAX_CONNECTIONS", "32"),
            ("BENCH_RUN_ON_STARTUP", "true"),
            ("BENCH_INTERVAL_SECS", "300"),
            ("BENCH_ALLOW_DESTRUCTIVE", "true"),
            ("BENCH_ITERATIONS", "7"),
            ("BENCH_DATA_SOURCE_ID", "replica"),
        ]));

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8181);
        assert_eq!(config.database.url, "postgres://db/registry");
        assert_eq!(config.database.max_connections, 32);
        assert!(config.bench.run_on_startup);
        assert_eq!(config.bench.interval_secs, Some(300));
        assert!(config.bench.allow_destructive);
        assert_eq!(config.bench.iterations, 7);
        assert_eq!(config.bench.data_source_id, "replica");
    }

    #[test]
    fn test_unparsable_overrides_are_ignored() {
        let mut config = Config::parse(BASE).unwrap();
        config.apply_overrides(lookup_from(&[
            ("SERVER_PORT", "http"),
            ("DB_MAX_CONNECTIONS", "-1"),
            ("BENCH_RUN_ON_STARTUP", "yes"),
            ("BENCH_INTERVAL_SECS", "soon"),
            ("BENCH_ITERATIONS", "99999999999"),
        ]));

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.max_connections, 1);
        assert!(!config.bench.run_on_startup);
        assert_eq!(config.bench.interval_secs, None);
        assert_eq!(config.bench.iterations, 100);
    }

    // 环境变量是进程级的, 读写环境的测试需要串行
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn set_env(vars: &[(&str, Option<&str>)]) {
        for (key, value) in vars {
            // SAFETY: ENV_LOCK is held by every test touching the environment.
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    const ENV_KEYS: [&str; 4] = ["CONFIG_PATH", "DATABASE_URL", "SERVER_PORT", "BENCH_ITERATIONS"];

    fn clear_env() {
        let cleared: Vec<(&str, Option<&str>)> = ENV_KEYS.iter().map(|k| (*k, None)).collect();
        set_env(&cleared);
    }

    #[test]
    fn test_from_toml_falls_back_to_env_without_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        clear_env();
        set_env(&[
            ("CONFIG_PATH", missing.to_str()),
            ("DATABASE_URL", Some("sqlite::memory:")),
            ("SERVER_PORT", Some("7000")),
        ]);
        let config = Config::from_toml();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.bench.iterations, 100);
    }

    #[test]
    fn test_from_toml_requires_database_url_without_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        clear_env();
        set_env(&[("CONFIG_PATH", missing.to_str())]);
        let result = Config::from_toml();
        clear_env();

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_from_toml_applies_env_over_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, BASE).unwrap();

        clear_env();
        set_env(&[
            ("CONFIG_PATH", path.to_str()),
            ("BENCH_ITERATIONS", Some("12")),
            ("SERVER_PORT", Some("not-a-port")),
        ]);
        let config = Config::from_toml();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.bench.iterations, 12);
        assert_eq!(config.database.url, "sqlite::memory:");
    }
}
