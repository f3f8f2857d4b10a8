//! Built-in species and fishing-method vocabularies. Both can be replaced
//! from the config file.

use crate::domain::model::{MethodEntry, SpeciesEntry, DEFAULT_COUNTER, DEFAULT_ICON};

fn species(name: &str, aliases: &[&str], icon: &str, evening: bool) -> SpeciesEntry {
    SpeciesEntry {
        name: name.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        icon: icon.to_string(),
        counter: DEFAULT_COUNTER.to_string(),
        evening,
    }
}

pub fn default_species() -> Vec<SpeciesEntry> {
    let mut squid = species("アオリイカ", &["アオリイカ"], "🦑", true);
    squid.counter = "杯".to_string();

    vec![
        species("アジ", &["アジ"], DEFAULT_ICON, false),
        species("サバ", &["サバ"], DEFAULT_ICON, false),
        species("チヌ", &["チヌ", "クロダイ"], "🐡", false),
        species("ハネ(シーバス)", &["ハネ", "シーバス"], "🎣", false),
        species("タチウオ", &["タチウオ"], "🗡️", true),
        species("メバル", &["メバル"], DEFAULT_ICON, true),
        species("ガシラ", &["ガシラ", "カサゴ"], "🐡", true),
        species("タコ", &["タコ"], "🐙", false),
        species("キス", &["キス"], DEFAULT_ICON, false),
        species("カレイ", &["カレイ"], DEFAULT_ICON, false),
        species("イワシ", &["イワシ"], DEFAULT_ICON, false),
        squid,
        species("サヨリ", &["サヨリ"], DEFAULT_ICON, false),
    ]
}

fn method(name: &str, aliases: &[&str]) -> MethodEntry {
    MethodEntry {
        name: name.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
    }
}

/// First match wins, so compound names come before their parts.
pub fn default_methods() -> Vec<MethodEntry> {
    vec![
        method("タコテンヤ", &["タコテンヤ"]),
        method("タコエギ", &["タコエギ"]),
        method("サビキ", &["サビキ"]),
        method("フカセ釣り", &["フカセ"]),
        method("エビ撒き", &["エビ撒き", "エビまき"]),
        method("穴釣り", &["穴釣り"]),
        method("ワインド", &["ワインド"]),
        method("テンヤ", &["テンヤ"]),
        method("メバリング", &["メバリング"]),
        method("アジング", &["アジング"]),
        method("エギング", &["エギング"]),
        method("投げ釣り", &["投げ釣り", "ちょい投げ"]),
        method("ブラクリ", &["ブラクリ"]),
        method("落とし込み", &["落とし込み"]),
        method("胴突き", &["胴突き"]),
        method("のませ", &["のませ"]),
        method("プラグ", &["プラグ"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locations::alias_conflicts;

    #[test]
    fn test_default_methods_have_no_shadowed_aliases() {
        let methods = default_methods();
        let conflicts =
            alias_conflicts(methods.iter().map(|m| (m.name.as_str(), m.aliases.as_slice())));
        assert!(conflicts.is_empty(), "{:?}", conflicts);
    }

    #[test]
    fn test_default_species_are_named() {
        let species = default_species();
        assert_eq!(species.len(), 13);
        assert!(species.iter().all(|s| !s.name.is_empty() && !s.aliases.is_empty()));
        let squid = species.iter().find(|s| s.name == "アオリイカ").unwrap();
        assert_eq!(squid.counter, "杯");
    }
}
