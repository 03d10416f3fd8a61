//! Code derivation and static lookup tables.
//!
//! Unique responsibility: derive stable human-readable codes from entity
//! attributes, so declarative configs can reference a datacenter or an OS
//! image without knowing its numeric ID.
//!
//! Everything here is pure. Tables are ordered slices, so lookups that can
//! match more than one entry resolve to the first entry in table order.

use crate::vds_models::{Datacenter, OperatingSystem};

/// Currency ID of the Russian rouble.
pub const CURRENCY_RUB: i32 = 1;
/// Currency ID of the US dollar.
pub const CURRENCY_USD: i32 = 3;
/// Currency ID of the euro.
pub const CURRENCY_EUR: i32 = 4;

/// Currency ID to ISO code.
pub const CURRENCIES: &[(i32, &str)] = &[
    (CURRENCY_RUB, "RUB"),
    (CURRENCY_USD, "USD"),
    (CURRENCY_EUR, "EUR"),
];

/// Country ISO code to English display name.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("RU", "Russia"),
    ("KZ", "Kazakhstan"),
    ("CH", "Switzerland"),
    ("NL", "Netherlands"),
    ("DE", "Germany"),
    ("GB", "Great Britain"),
    ("TR", "Turkiye"),
];

/// Russian country name to ISO code. Matched as a substring of datacenter names.
pub const RU_COUNTRY_TO_CODE: &[(&str, &str)] = &[
    ("Россия", "RU"),
    ("Казахстан", "KZ"),
    ("Швейцария", "CH"),
    ("Нидерланды", "NL"),
    ("Германия", "DE"),
    ("Великобритания", "GB"),
    ("Турция", "TR"),
];

/// ISO code for a currency ID.
#[must_use]
pub fn currency_code(id: i32) -> Option<&'static str> {
    CURRENCIES.iter().find(|(cid, _)| *cid == id).map(|(_, code)| *code)
}

/// English display name for a country ISO code.
#[must_use]
pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRIES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// Datacenter code: the part of the name before the first `:`, transliterated
/// and uppercased. `"Москва: Rucloud"` becomes `"MOSKVA"`.
#[must_use]
pub fn datacenter_code(dc: &Datacenter) -> String {
    let head = dc.name.split_once(':').map_or(dc.name.as_str(), |(head, _)| head);
    transliterate(head).to_uppercase()
}

/// ISO country code of the first country whose Russian name occurs in the
/// datacenter name, or an empty string.
#[must_use]
pub fn datacenter_country_code(dc: &Datacenter) -> &'static str {
    RU_COUNTRY_TO_CODE
        .iter()
        .find(|(country, _)| dc.name.contains(country))
        .map_or("", |(_, code)| *code)
}

/// OS code: `"<id>-<name>"` (no prefix when the ID is not positive),
/// lowercased, spaces turned into hyphens, parentheses removed.
#[must_use]
pub fn os_code(os: &OperatingSystem) -> String {
    let code = if os.id > 0 {
        format!("{}-{}", os.id, os.name)
    } else {
        os.name.clone()
    };
    code.to_lowercase()
        .replace(' ', "-")
        .replace(['(', ')'], "")
}

/// Transliterate Cyrillic letters to Latin. Other characters pass through.
#[must_use]
pub fn transliterate(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match latin_for(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

const fn latin_for(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'А' => "A",
        'б' => "b",
        'Б' => "B",
        'в' => "v",
        'В' => "V",
        'г' => "g",
        'Г' => "G",
        'д' => "d",
        'Д' => "D",
        'е' => "e",
        'Е' => "E",
        'ё' => "yo",
        'Ё' => "YO",
        'ж' => "zh",
        'Ж' => "ZH",
        'з' => "z",
        'З' => "Z",
        'и' => "i",
        'И' => "I",
        'й' => "j",
        'Й' => "J",
        'к' => "k",
        'К' => "K",
        'л' => "l",
        'Л' => "L",
        'м' => "m",
        'М' => "M",
        'н' => "n",
        'Н' => "N",
        'о' => "o",
        'О' => "O",
        'п' => "p",
        'П' => "P",
        'р' => "r",
        'Р' => "R",
        'с' => "s",
        'С' => "S",
        'т' => "t",
        'Т' => "T",
        'у' => "u",
        'У' => "U",
        'ф' => "f",
        'Ф' => "F",
        'х' => "h",
        'Х' => "H",
        'ц' => "c",
        'Ц' => "C",
        'ч' => "ch",
        'Ч' => "CH",
        'ш' => "sh",
        'Ш' => "SH",
        'щ' => "sch",
        'Щ' => "SCH",
        'ъ' | 'Ъ' | 'ь' | 'Ь' => "",
        'ы' => "y",
        'Ы' => "Y",
        'э' => "e",
        'Э' => "E",
        'ю' => "ju",
        'Ю' => "JU",
        'я' => "ja",
        'Я' => "JA",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dc(name: &str) -> Datacenter {
        Datacenter {
            id: 1,
            name: name.to_string(),
            vps_tariffs: vec![],
            drive_tariffs: vec![],
            additional_drive_tariffs: vec![],
            additional_service_tariffs: vec![],
        }
    }

    fn os(id: i32, name: &str) -> OperatingSystem {
        OperatingSystem {
            id,
            name: name.to_string(),
            is_active: true,
            os_type: "linux".to_string(),
            ssh_keys_supported: true,
            requirements: crate::vds_models::OsRequirements::default(),
        }
    }

    #[test]
    fn transliterates_city_names() {
        assert_eq!(transliterate("Москва"), "Moskva");
        assert_eq!(transliterate("Санкт-Петербург"), "Sankt-Peterburg");
        assert_eq!(transliterate("Екатеринбург"), "Ekaterinburg");
        assert_eq!(transliterate("Жуковский"), "ZHukovskij");
    }

    #[test]
    fn soft_and_hard_signs_vanish() {
        assert_eq!(transliterate("Тверь"), "Tver");
        assert_eq!(transliterate("объём"), "obyom");
    }

    #[test]
    fn latin_input_is_unchanged() {
        for s in ["", "LDN1", "Zurich-2", "a:b c", "Frankfurt am Main"] {
            assert_eq!(transliterate(s), s);
        }
    }

    #[test]
    fn datacenter_code_uses_text_before_first_colon() {
        let cases = [
            ("Москва:RU-1", "MOSKVA"),
            ("LDN1:UK-1", "LDN1"),
            ("Казань: Tier III: A", "KAZAN"),
            ("Цюрих", "CJURIH"),
            ("ams", "AMS"),
        ];
        for (name, expected) in cases {
            assert_eq!(datacenter_code(&dc(name)), expected, "name={name}");
        }
    }

    #[test]
    fn datacenter_code_matches_transliterated_head() {
        let names = ["Москва:RU-1", "Санкт-Петербург", "Новосибирск:x:y", "Almaty"];
        for name in names {
            let head = name.split(':').next().unwrap_or_default();
            assert_eq!(datacenter_code(&dc(name)), transliterate(head).to_uppercase());
        }
    }

    #[test]
    fn country_code_by_russian_substring() {
        assert_eq!(datacenter_country_code(&dc("Франкфурт (Германия)")), "DE");
        assert_eq!(datacenter_country_code(&dc("Москва, Россия: Rucloud")), "RU");
        assert_eq!(datacenter_country_code(&dc("Алматы, Казахстан")), "KZ");
        assert_eq!(datacenter_country_code(&dc("LDN1:UK-1")), "");
    }

    #[test]
    fn country_code_ties_resolve_in_table_order() {
        assert_eq!(datacenter_country_code(&dc("Германия / Россия")), "RU");
    }

    #[test]
    fn os_code_examples() {
        assert_eq!(os_code(&os(42, "Ubuntu 20.04 (LTS)")), "42-ubuntu-20.04-lts");
        assert_eq!(os_code(&os(0, "CentOS 7")), "centos-7");
        assert_eq!(os_code(&os(-3, "Debian 12")), "debian-12");
    }

    #[test]
    fn os_code_distinguishes_same_name_by_id() {
        assert_ne!(os_code(&os(1, "Windows Server")), os_code(&os(2, "Windows Server")));
    }

    #[test]
    fn lookup_tables() {
        assert_eq!(currency_code(CURRENCY_RUB), Some("RUB"));
        assert_eq!(currency_code(CURRENCY_EUR), Some("EUR"));
        assert_eq!(currency_code(2), None);
        assert_eq!(country_name("GB"), Some("Great Britain"));
        assert_eq!(country_name("US"), None);
        for (_, code) in RU_COUNTRY_TO_CODE {
            assert!(country_name(code).is_some(), "no display name for {code}");
        }
    }
}
