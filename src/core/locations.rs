//! Location resolution: the join key between free-text fragments and the
//! fixed list of spots.

use crate::domain::model::LocationEntry;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    entries: Vec<LocationEntry>,
}

impl LocationResolver {
    pub fn new(entries: Vec<LocationEntry>) -> Self {
        Self { entries }
    }

    /// Id of the first location whose alias (in configured order) occurs in
    /// `text`.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.aliases.iter().any(|alias| text.contains(alias.as_str())))
            .map(|entry| entry.id.as_str())
    }

    pub fn entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&LocationEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn conflicts(&self) -> Vec<AliasConflict> {
        alias_conflicts(
            self.entries
                .iter()
                .map(|e| (e.id.as_str(), e.aliases.as_slice())),
        )
    }
}

/// An alias that can never be the first hit because an alias listed earlier
/// for a different id is contained in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConflict {
    pub earlier_id: String,
    pub earlier_alias: String,
    pub shadowed_id: String,
    pub shadowed_alias: String,
}

impl fmt::Display for AliasConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alias '{}' ({}) is unreachable: earlier alias '{}' ({}) matches first",
            self.shadowed_alias, self.shadowed_id, self.earlier_alias, self.earlier_id
        )
    }
}

/// Scan an ordered first-match-wins keyword table for shadowed aliases.
pub fn alias_conflicts<'a>(
    table: impl IntoIterator<Item = (&'a str, &'a [String])>,
) -> Vec<AliasConflict> {
    let mut earlier: Vec<(&str, &str)> = Vec::new();
    let mut conflicts = Vec::new();

    for (id, aliases) in table {
        for alias in aliases {
            for (earlier_id, earlier_alias) in &earlier {
                if *earlier_id != id && alias.contains(earlier_alias) {
                    conflicts.push(AliasConflict {
                        earlier_id: earlier_id.to_string(),
                        earlier_alias: earlier_alias.to_string(),
                        shadowed_id: id.to_string(),
                        shadowed_alias: alias.clone(),
                    });
                }
            }
        }
        // Same-id aliases never shadow each other, so they join the
        // "earlier" set only after the whole entry is scanned.
        earlier.extend(aliases.iter().map(|a| (id, a.as_str())));
    }

    conflicts
}

fn spot(id: &str, area: &str, distance_km: f64, info: &str, aliases: &[&str]) -> LocationEntry {
    LocationEntry {
        id: id.to_string(),
        area: area.to_string(),
        distance_km,
        info: info.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
    }
}

/// Built-in spots around Kobe, ordered so that no alias is shadowed.
pub fn default_locations() -> Vec<LocationEntry> {
    vec![
        spot("須磨海釣り公園", "神戸", 2.3, "ファミリー向け・設備充実", &["須磨海釣り", "須磨"]),
        spot("南芦屋浜", "尼崎", 5.8, "関西最大級・ハネダービー開催中", &["南芦屋浜", "南芦屋"]),
        spot("神戸空港ベランダ", "神戸", 4.1, "アジ好調・24時間", &["神戸空港"]),
        spot("アジュール舞子", "神戸", 6.8, "サビキ大人気・初心者OK", &["アジュール舞子", "舞子"]),
        spot("六甲アイランド", "神戸", 3.5, "タチウオの聖地", &["六甲アイランド", "六アイ"]),
        spot("明石港", "明石", 18.5, "タコ・メバルの名所", &["明石港", "明石"]),
        spot("芦屋浜", "尼崎", 5.2, "投げ釣りの名所", &["芦屋浜"]),
        spot("ポートアイランド北公園", "神戸", 4.5, "メバル好ポイント", &["ポートアイランド"]),
        spot("林崎漁港", "明石", 20.0, "穴場スポット", &["林崎"]),
        spot("岩屋港(淡路島)", "淡路島", 25.0, "多魚種・車必須", &["岩屋", "淡路島"]),
        spot("赤穂港", "赤穂", 75.0, "穴場・のんびり", &["赤穂"]),
        spot("姫路港", "姫路", 80.0, "大型港・多魚種", &["姫路"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_no_conflicts() {
        let resolver = LocationResolver::new(default_locations());
        assert!(resolver.conflicts().is_empty(), "{:?}", resolver.conflicts());
    }

    #[test]
    fn test_resolve_first_alias_in_order() {
        let resolver = LocationResolver::new(default_locations());
        assert_eq!(resolver.resolve("本日須磨でアジ20匹"), Some("須磨海釣り公園"));
        assert_eq!(resolver.resolve("南芦屋浜でチヌ"), Some("南芦屋浜"));
        assert_eq!(resolver.resolve("芦屋浜で投げ釣り"), Some("芦屋浜"));
        assert_eq!(resolver.resolve("六アイでタチウオ"), Some("六甲アイランド"));
        assert_eq!(resolver.resolve("大阪南港でアジ"), None);
    }

    #[test]
    fn test_short_alias_listed_first_is_flagged() {
        let entries = vec![
            spot("芦屋浜", "尼崎", 5.2, "", &["芦屋浜"]),
            spot("南芦屋浜", "尼崎", 5.8, "", &["南芦屋浜"]),
        ];
        let resolver = LocationResolver::new(entries);

        // the longer spot can never win
        assert_eq!(resolver.resolve("南芦屋浜でチヌ"), Some("芦屋浜"));

        let conflicts = resolver.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].earlier_alias, "芦屋浜");
        assert_eq!(conflicts[0].shadowed_id, "南芦屋浜");
        assert!(conflicts[0].to_string().contains("unreachable"));
    }

    #[test]
    fn test_same_id_aliases_do_not_conflict() {
        let entries = vec![spot("須磨海釣り公園", "神戸", 2.3, "", &["須磨", "須磨海釣り"])];
        assert!(LocationResolver::new(entries).conflicts().is_empty());
    }

    #[test]
    fn test_duplicate_alias_across_ids_conflicts() {
        let entries = vec![
            spot("明石港", "明石", 18.5, "", &["明石"]),
            spot("林崎漁港", "明石", 20.0, "", &["林崎", "明石"]),
        ];
        assert_eq!(LocationResolver::new(entries).conflicts().len(), 1);
    }
}
