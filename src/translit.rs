// Транслитерация названий городов в URL-слаги.

/// Сокращения типов населённых пунктов, отбрасываемые перед транслитерацией.
/// Срезается только одно ведущее вхождение.
const ADMIN_PREFIXES: &[&str] = &[
    "г.", "пгт", "ст-ца", "с.", "рп", "п.", "мкр.", "д.", "аул", "тер.", "кп", "пос.", "п/ст",
    "арбан", "село", "поселок", "п-ст",
];

/// Таблица транслитерации: покрывает весь русский алфавит в нижнем регистре.
/// Твёрдый и мягкий знаки отображаются в пустую строку.
const TRANSLIT: &[(char, &str)] = &[
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "e"),
    ('ж', "zh"),
    ('з', "z"),
    ('и', "i"),
    ('й', "y"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "sch"),
    ('ъ', ""),
    ('ы', "y"),
    ('ь', ""),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
];

fn translit_char(letter: char) -> Option<&'static str> {
    TRANSLIT
        .iter()
        .find(|(cyr, _)| *cyr == letter)
        .map(|(_, lat)| *lat)
}

/// Срезает ведущее сокращение типа населённого пункта вместе с пробелами
/// после него. Сравнение без учёта регистра; при пересечении сокращений
/// побеждает самое длинное совпадение.
pub fn strip_admin_prefix(name: &str) -> &str {
    let mut best = 0usize;
    for prefix in ADMIN_PREFIXES {
        if let Some(end) = match_prefix(name, prefix) {
            best = best.max(end);
        }
    }
    name[best..].trim_start()
}

/// Возвращает байтовое смещение конца префикса в `name`, если `name`
/// начинается с `prefix` (без учёта регистра).
fn match_prefix(name: &str, prefix: &str) -> Option<usize> {
    let mut name_chars = name.char_indices();
    let mut prefix_chars = prefix.chars();
    loop {
        let Some(expected) = prefix_chars.next() else {
            return match name_chars.next() {
                Some((offset, _)) => Some(offset),
                None => Some(name.len()),
            };
        };
        let (_, actual) = name_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
}

/// Преобразует название города в слаг: срез префикса, транслитерация в
/// нижнем регистре, схлопывание всего вне `[a-z0-9]` в одиночные дефисы,
/// обрезка дефисов по краям. Чистая функция от входной строки.
pub fn slugify(name: &str) -> String {
    let stripped = strip_admin_prefix(name.trim());

    let mut latin = String::with_capacity(stripped.len());
    for letter in stripped.chars().flat_map(char::to_lowercase) {
        match translit_char(letter) {
            Some(mapped) => latin.push_str(mapped),
            None => latin.push(letter),
        }
    }

    let mut slug = String::with_capacity(latin.len());
    for letter in latin.chars() {
        if letter.is_ascii_lowercase() || letter.is_ascii_digit() {
            slug.push(letter);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}
