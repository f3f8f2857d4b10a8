//! Ranking spots for a target day from merged results and that day's tides.

use crate::domain::model::{
    CatchCount, CatchRecord, LocationEntry, MergedLocationResult, Recommendation, SpeciesEntry,
    TideSnapshot, TideType, DEFAULT_COUNTER, DEFAULT_ICON, UNKNOWN_COUNT,
};
use crate::utils::error::{CatchError, Result};
use regex::Regex;

const MIN_CONFIDENCE: i64 = 55;
const MAX_CONFIDENCE: i64 = 95;
const UNKNOWN_SIZE: &str = "サイズ不明";

fn tide_bonus(tide: TideType) -> usize {
    match tide {
        TideType::Spring => 6,
        TideType::Moderate => 4,
        TideType::Neap => 1,
        TideType::Long => 0,
        TideType::Young => 1,
    }
}

pub struct Ranker {
    limit: usize,
    number_re: Regex,
}

impl Ranker {
    pub fn new(limit: usize) -> Result<Self> {
        let number_re = Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*(cm|CM|ｃｍ|センチ|kg|g)?").map_err(|e| {
            CatchError::ConfigError {
                message: format!("invalid size pattern: {}", e),
            }
        })?;
        Ok(Self { limit, number_re })
    }

    /// Top picks for the day described by `snapshot`. Empty spots never rank;
    /// equal scores keep `merged` order.
    pub fn rank(
        &self,
        merged: &[MergedLocationResult],
        locations: &[LocationEntry],
        species: &[SpeciesEntry],
        snapshot: &TideSnapshot,
    ) -> Vec<Recommendation> {
        let bonus = tide_bonus(snapshot.tide_type);

        let mut scored: Vec<(usize, &MergedLocationResult)> = merged
            .iter()
            .filter(|m| !m.records.is_empty())
            .map(|m| {
                let seasonal = m.records.len() - m.live_count;
                (2 * m.live_count + seasonal + bonus, m)
            })
            .collect();
        // stable, so ties stay in location order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(self.limit)
            .enumerate()
            .filter_map(|(i, (score, m))| {
                let location = locations.iter().find(|l| l.id == m.location_id)?;
                Some(self.build(i + 1, score, m, location, species, snapshot))
            })
            .collect()
    }

    fn build(
        &self,
        rank: usize,
        score: usize,
        merged: &MergedLocationResult,
        location: &LocationEntry,
        species: &[SpeciesEntry],
        snapshot: &TideSnapshot,
    ) -> Recommendation {
        let target = dominant_species(&merged.records);
        let entry = species.iter().find(|s| s.name == target);
        let of_target: Vec<&CatchRecord> = merged.records.iter().filter(|r| r.species == target).collect();

        let size_hint = self.size_hint(&of_target);
        let count_hint = count_hint(&of_target);
        let best_time = if entry.map(|e| e.evening).unwrap_or(false) {
            format!("夕まずめ {}", snapshot.dusk)
        } else {
            format!("朝まずめ {}", snapshot.dawn)
        };
        let confidence = (MIN_CONFIDENCE + score as i64 * 3).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8;

        let description = if location.info.is_empty() {
            format!("{}。{}の釣果{}件。", snapshot.tide_type, target, of_target.len())
        } else {
            format!(
                "{}。{}の釣果{}件。{}",
                snapshot.tide_type,
                target,
                of_target.len(),
                location.info
            )
        };

        Recommendation {
            rank,
            location_id: location.id.clone(),
            area: location.area.clone(),
            icon: entry
                .map(|e| e.icon.clone())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            species: target.to_string(),
            size_hint,
            count_hint,
            best_time,
            tide_type: snapshot.tide_type,
            confidence,
            description,
        }
    }

    /// `18-25cm` style range over every number in the sizes. The unit comes
    /// from the first size that carries one.
    fn size_hint(&self, records: &[&CatchRecord]) -> String {
        let mut values: Vec<f64> = Vec::new();
        let mut unit: Option<String> = None;

        for record in records {
            for caps in self.number_re.captures_iter(&record.size_description) {
                if let Ok(v) = caps[1].parse::<f64>() {
                    values.push(v);
                }
                if unit.is_none() {
                    unit = caps.get(2).map(|u| normalize_unit(u.as_str()).to_string());
                }
            }
        }

        let unit = unit.unwrap_or_default();
        match min_max(&values) {
            Some((lo, hi)) if lo == hi => format!("{}{}", lo, unit),
            Some((lo, hi)) => format!("{}-{}{}", lo, hi, unit),
            None => UNKNOWN_SIZE.to_string(),
        }
    }
}

fn normalize_unit(unit: &str) -> &str {
    match unit {
        "CM" | "ｃｍ" | "センチ" => "cm",
        other => other,
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))))
}

/// Most frequent species; ties go to the one seen first.
fn dominant_species(records: &[CatchRecord]) -> &str {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match tally.iter_mut().find(|(name, _)| *name == record.species) {
            Some((_, n)) => *n += 1,
            None => tally.push((record.species.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, n) in tally {
        if best.map(|(_, top)| n > top).unwrap_or(true) {
            best = Some((name, n));
        }
    }
    best.map(|(name, _)| name).unwrap_or_default()
}

fn count_hint(records: &[&CatchRecord]) -> String {
    let mut counter: Option<&str> = None;
    let mut values = Vec::new();
    let mut open_ended = false;

    for record in records {
        match &record.count {
            CatchCount::Known { count, counter: c } => {
                values.push(*count);
                counter.get_or_insert(c.as_str());
            }
            CatchCount::AtLeast { count, counter: c } => {
                values.push(*count);
                counter.get_or_insert(c.as_str());
                open_ended = true;
            }
            CatchCount::Unknown => {}
        }
    }

    let (Some(lo), Some(hi)) = (values.iter().min(), values.iter().max()) else {
        return UNKNOWN_COUNT.to_string();
    };
    let counter = counter.unwrap_or(DEFAULT_COUNTER);
    let suffix = if open_ended { "超" } else { "" };

    if lo == hi {
        format!("{}{}{}", lo, counter, suffix)
    } else {
        format!("{}-{}{}{}", lo, hi, counter, suffix)
    }
}
