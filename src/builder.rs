// Сборка и запись per-city JSON-документов.
use crate::catalog::group_services;
use crate::config::{AppConfig, CollisionPolicy};
use crate::model::{BuildError, CityDocument, CityMeta, Region, Services, Tariff};
use crate::translit::{slugify, strip_admin_prefix};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Итог прогона: количество записанных файлов. Совпавшие слаги невидимы
/// для счётчика — каждая запись учитывается.
pub struct BuildReport {
    pub written: usize,
}

pub struct CityDataBuilder<'a> {
    config: &'a AppConfig,
    services: Services,
}

impl<'a> CityDataBuilder<'a> {
    /// Каталог услуг не зависит от города, поэтому группируется один раз
    /// и переиспользуется для каждого документа.
    pub fn new(config: &'a AppConfig, tariffs: &[Tariff]) -> Self {
        Self {
            config,
            services: group_services(tariffs),
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Обходит иерархию регион → область → город в порядке входных данных
    /// и пишет по одному документу на город. Любая ошибка ввода-вывода
    /// прерывает весь прогон; уже записанные файлы остаются на месте.
    pub fn run(&self, regions: &[Region]) -> Result<BuildReport, BuildError> {
        let out_dir = Path::new(&self.config.output_dir);
        fs::create_dir_all(out_dir)?;

        let mut written = 0usize;
        let mut seen: HashMap<String, String> = HashMap::new();

        for region in regions {
            info!("Processing region: {}", region.name);
            for area in &region.areas {
                for raw_name in &area.cities {
                    // в документ идёт название без префикса, в исходном регистре
                    let name = strip_admin_prefix(raw_name.trim());
                    let slug = slugify(name);
                    if slug.is_empty() {
                        warn!("Skipping city with empty slug: {:?}", raw_name);
                        continue;
                    }

                    if let Some(previous) = seen.insert(slug.clone(), name.to_string()) {
                        if previous != name {
                            match self.config.on_collision {
                                CollisionPolicy::Error => {
                                    return Err(BuildError::SlugCollision {
                                        slug,
                                        first: previous,
                                        second: name.to_string(),
                                    });
                                }
                                CollisionPolicy::Overwrite => {
                                    debug!(
                                        "Slug {} overwritten: {} -> {}",
                                        slug, previous, name
                                    );
                                }
                            }
                        }
                    }

                    let document = CityDocument {
                        meta: CityMeta {
                            name: name.to_string(),
                            region: area.name.clone(),
                            timezone: self.timezone_for(&slug),
                        },
                        services: &self.services,
                    };

                    let json = serde_json::to_string_pretty(&document)?;
                    fs::write(out_dir.join(format!("{slug}.json")), json)?;
                    written += 1;
                }
            }
        }

        Ok(BuildReport { written })
    }

    fn timezone_for(&self, slug: &str) -> String {
        self.config
            .timezone_overrides
            .get(slug)
            .cloned()
            .unwrap_or_else(|| self.config.timezone.clone())
    }
}

/// Читает иерархию регионов из JSON-файла.
pub fn load_regions(path: &str) -> Result<Vec<Region>, BuildError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Читает каталог тарифов из JSON-файла.
pub fn load_tariffs(path: &str) -> Result<Vec<Tariff>, BuildError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Area;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn tariff(kind: &str, name: &str) -> Tariff {
        serde_json::from_value(json!({ "type": kind, "name": name })).unwrap()
    }

    fn hierarchy(cities: &[&str]) -> Vec<Region> {
        vec![Region {
            name: "Поволжье".to_string(),
            areas: vec![Area {
                name: "Самарская область".to_string(),
                cities: cities.iter().map(|c| (*c).to_string()).collect(),
            }],
        }]
    }

    fn config_for(dir: &TempDir) -> AppConfig {
        AppConfig {
            output_dir: dir.path().join("cities").to_string_lossy().into_owned(),
            ..AppConfig::default()
        }
    }

    fn read_doc(config: &AppConfig, slug: &str) -> Value {
        let path = Path::new(&config.output_dir).join(format!("{slug}.json"));
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn end_to_end_samara() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let catalog = vec![
            tariff("Интернет", "Базовый"),
            tariff("Интернет", "Турбо"),
            tariff("ТВ", "Кино"),
        ];
        let builder = CityDataBuilder::new(&config, &catalog);
        let report = builder.run(&hierarchy(&[" г. Самара "])).unwrap();
        assert_eq!(report.written, 1);

        let doc = read_doc(&config, "samara");
        assert_eq!(doc["meta"]["name"], "Самара");
        assert_eq!(doc["meta"]["region"], "Самарская область");
        assert_eq!(doc["meta"]["timezone"], "Europe/Moscow");
        assert_eq!(doc["services"]["internet"]["tariffs"].as_array().unwrap().len(), 2);
        assert_eq!(doc["services"]["tv"]["tariffs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn display_name_drops_admin_prefix() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let builder = CityDataBuilder::new(&config, &[tariff("ТВ", "Кино")]);
        builder
            .run(&hierarchy(&["пгт Безенчук", "ст-ца Каневская", "Москва"]))
            .unwrap();

        assert_eq!(read_doc(&config, "bezenchuk")["meta"]["name"], "Безенчук");
        assert_eq!(read_doc(&config, "kanevskaya")["meta"]["name"], "Каневская");
        assert_eq!(read_doc(&config, "moskva")["meta"]["name"], "Москва");
    }

    #[test]
    fn same_city_with_and_without_prefix_is_not_a_collision() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            on_collision: CollisionPolicy::Error,
            ..config_for(&dir)
        };
        let builder = CityDataBuilder::new(&config, &[tariff("ТВ", "Кино")]);
        // после среза префикса названия совпадают — это не конфликт
        let report = builder.run(&hierarchy(&["г. Самара", "Самара"])).unwrap();
        assert_eq!(report.written, 2);
    }

    #[test]
    fn one_document_per_city_with_full_catalog() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let catalog = vec![tariff("Интернет", "Базовый"), tariff("ТВ", "Кино")];
        let builder = CityDataBuilder::new(&config, &catalog);
        let cities = ["Москва", "г. Самара", "Ростов-на-Дону"];
        let report = builder.run(&hierarchy(&cities)).unwrap();
        assert_eq!(report.written, 3);

        for slug in ["moskva", "samara", "rostov-na-donu"] {
            let doc = read_doc(&config, slug);
            let services = doc["services"].as_object().unwrap();
            assert_eq!(services.len(), 2, "missing service in {slug}");
        }
    }

    #[test]
    fn rerun_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let catalog = vec![tariff("Интернет", "Базовый")];
        let regions = hierarchy(&["Москва"]);
        let builder = CityDataBuilder::new(&config, &catalog);

        builder.run(&regions).unwrap();
        let path = Path::new(&config.output_dir).join("moskva.json");
        let first = fs::read(&path).unwrap();
        builder.run(&regions).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn collision_overwrite_keeps_later_city() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let builder = CityDataBuilder::new(&config, &[tariff("ТВ", "Кино")]);
        // оба названия дают слаг "orel"
        let report = builder.run(&hierarchy(&["Орел", "Орёл"])).unwrap();
        assert_eq!(report.written, 2);

        let doc = read_doc(&config, "orel");
        assert_eq!(doc["meta"]["name"], "Орёл");
    }

    #[test]
    fn collision_error_policy_aborts() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            on_collision: CollisionPolicy::Error,
            ..config_for(&dir)
        };
        let builder = CityDataBuilder::new(&config, &[tariff("ТВ", "Кино")]);
        let result = builder.run(&hierarchy(&["Орел", "Орёл"]));
        assert!(matches!(result, Err(BuildError::SlugCollision { .. })));
    }

    #[test]
    fn timezone_override_applies_by_slug() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir);
        config
            .timezone_overrides
            .insert("samara".to_string(), "Europe/Samara".to_string());
        let builder = CityDataBuilder::new(&config, &[tariff("ТВ", "Кино")]);
        builder.run(&hierarchy(&["г. Самара", "Москва"])).unwrap();

        assert_eq!(read_doc(&config, "samara")["meta"]["timezone"], "Europe/Samara");
        assert_eq!(read_doc(&config, "moskva")["meta"]["timezone"], "Europe/Moscow");
    }

    #[test]
    fn empty_slug_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let builder = CityDataBuilder::new(&config, &[tariff("ТВ", "Кино")]);
        let report = builder.run(&hierarchy(&["г. ", "Москва"])).unwrap();
        assert_eq!(report.written, 1);
    }

    #[test]
    fn output_dir_created_when_absent() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            output_dir: dir
                .path()
                .join("nested/deep/cities")
                .to_string_lossy()
                .into_owned(),
            ..AppConfig::default()
        };
        let builder = CityDataBuilder::new(&config, &[tariff("ТВ", "Кино")]);
        let report = builder.run(&hierarchy(&["Москва"])).unwrap();
        assert_eq!(report.written, 1);
    }

    #[test]
    fn loaders_read_json_files() {
        let dir = TempDir::new().unwrap();
        let regions_path = dir.path().join("regions.json");
        let tariffs_path = dir.path().join("tariffs.json");
        fs::write(
            &regions_path,
            r#"[{ "name": "Юг", "areas": [{ "name": "Кубань", "cities": ["Краснодар"] }] }]"#,
        )
        .unwrap();
        fs::write(
            &tariffs_path,
            r#"[{ "type": "Интернет", "name": "Базовый", "price": 500 }]"#,
        )
        .unwrap();

        let regions = load_regions(regions_path.to_str().unwrap()).unwrap();
        assert_eq!(regions[0].areas[0].cities, vec!["Краснодар"]);

        let tariffs = load_tariffs(tariffs_path.to_str().unwrap()).unwrap();
        assert_eq!(tariffs[0].kind, "Интернет");
        assert_eq!(tariffs[0].extra["price"], 500);
    }
}
