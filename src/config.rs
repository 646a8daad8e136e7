use crate::model::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Политика при совпадении слагов двух разных городов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Поздняя запись молча заменяет раннюю (поведение исходных данных).
    #[default]
    Overwrite,
    /// Совпадение прерывает сборку с ошибкой.
    Error,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub regions_path: String,
    pub tariffs_path: String,
    pub output_dir: String,
    /// Часовой пояс, записываемый в каждый документ.
    pub timezone: String,
    /// Переопределения часового пояса по слагу города.
    pub timezone_overrides: HashMap<String, String>,
    pub on_collision: CollisionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            regions_path: "data/regions.json".to_string(),
            tariffs_path: "data/tariffs.json".to_string(),
            output_dir: "data/cities".to_string(),
            timezone: "Europe/Moscow".to_string(),
            timezone_overrides: HashMap::new(),
            on_collision: CollisionPolicy::Overwrite,
        }
    }
}

/// Читает конфигурацию из JSON-файла; отсутствующий файл — не ошибка,
/// используются значения по умолчанию.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
