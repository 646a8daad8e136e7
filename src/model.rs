// Core structs: Region, Tariff, Service, CityDocument
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Регион верхнего уровня (например, "Поволжье").
#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub name: String,
    pub areas: Vec<Area>,
}

/// Область внутри региона со списком «сырых» названий городов
/// (возможны префиксы вроде "г. Самара" и лишние пробелы).
#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    pub name: String,
    pub cities: Vec<String>,
}

/// Запись каталога тарифов. Обязателен только `type`; все остальные поля
/// непрозрачны для сборщика и проходят в выходной документ без изменений.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tariff {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceMeta {
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(rename = "ogImage")]
    pub og_image: String,
}

/// Услуга: группа тарифов одного типа с каноническим идентификатором.
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub meta: ServiceMeta,
    pub tariffs: Vec<Tariff>,
}

/// Отображение `id услуги → услуга`. Порядок — порядок первого появления
/// типа в каталоге; сериализуется как JSON-объект с ключами-идентификаторами.
#[derive(Debug, Clone, Default)]
pub struct Services(pub Vec<Service>);

impl Services {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Service> {
        self.0.iter().find(|service| service.id == id)
    }
}

impl Serialize for Services {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for service in &self.0 {
            map.serialize_entry(&service.id, service)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CityMeta {
    pub name: String,
    pub region: String,
    pub timezone: String,
}

/// Выходной документ города: метаданные плюс полный каталог услуг.
/// Каталог один и тот же для всех городов — дублирование намеренное,
/// каждый документ самодостаточен.
#[derive(Debug, Serialize)]
pub struct CityDocument<'a> {
    pub meta: CityMeta,
    pub services: &'a Services,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("slug collision: '{slug}' produced by both '{first}' and '{second}'")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },
}
