// Группировка каталога тарифов по каноническим услугам.
use crate::model::{Service, ServiceMeta, Services, Tariff};
use crate::translit::slugify;

/// Пять известных типов тарифов и их канонические идентификаторы.
const SERVICE_KEYS: &[(&str, &str)] = &[
    ("Интернет", "internet"),
    ("ТВ", "tv"),
    ("Интернет + ТВ", "internet-tv"),
    ("Интернет + Моб. связь", "internet-mobile"),
    ("Интернет + ТВ + Моб. связь", "internet-tv-mobile"),
];

/// Разрешает ключ услуги для типа тарифа: сначала таблица известных типов,
/// для незнакомых — слаг от самой строки типа. Результат стабилен между
/// запусками.
pub fn service_key(kind: &str) -> String {
    SERVICE_KEYS
        .iter()
        .find(|(label, _)| *label == kind)
        .map(|(_, id)| (*id).to_string())
        .unwrap_or_else(|| slugify(kind))
}

/// Разбивает плоский каталог на услуги. Каждый тариф попадает ровно в одну
/// услугу; порядок тарифов внутри услуги — порядок каталога, порядок услуг —
/// порядок первого появления типа.
pub fn group_services(tariffs: &[Tariff]) -> Services {
    let mut services: Vec<Service> = Vec::new();

    for tariff in tariffs {
        let key = service_key(&tariff.kind);
        let index = match services.iter().position(|service| service.id == key) {
            Some(index) => index,
            None => {
                services.push(new_service(key, &tariff.kind));
                services.len() - 1
            }
        };
        services[index].tariffs.push(tariff.clone());
    }

    Services(services)
}

fn new_service(id: String, kind: &str) -> Service {
    let description = format!("Тарифы на {}", kind.to_lowercase());
    Service {
        title: kind.to_string(),
        description: description.clone(),
        meta: ServiceMeta {
            description,
            keywords: vec![kind.to_string()],
            og_image: format!("/og/{id}.png"),
        },
        tariffs: Vec::new(),
        id,
    }
}
