//! Keyword and pattern extraction over raw report text.
//!
//! Aliases are plain substrings (case-sensitive, no regex escaping); only the
//! size, count and date tokens use patterns.

use crate::core::locations::LocationResolver;
use crate::domain::model::{
    CatchCount, CatchRecord, LocationEntry, MethodEntry, SpeciesEntry, DEFAULT_ICON,
};
use crate::utils::error::{CatchError, Result};
use regex::Regex;

const SIZE_PATTERN: &str = r"([0-9]+(?:\.[0-9]+)?)\s*(?:cm|CM|ｃｍ|センチ)";
const COUNT_PATTERN: &str = r"([0-9]+)\s*(?:匹|尾|枚|杯|本)";
const DATE_PATTERN: &str = r"(?:^|[^0-9])([0-9]{1,2})/([0-9]{1,2})(?:[^0-9]|$)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesMatch {
    pub species: String,
    pub size_description: String,
    pub count: CatchCount,
}

/// Attribution carried onto every record built from one fragment.
#[derive(Debug, Clone, Copy)]
pub struct FragmentOrigin<'a> {
    pub source_tag: &'a str,
    pub reporter_label: &'a str,
    pub default_date: &'a str,
}

pub struct Extractor {
    species: Vec<SpeciesEntry>,
    methods: Vec<MethodEntry>,
    locations: LocationResolver,
    size_re: Regex,
    count_re: Regex,
    date_re: Regex,
}

impl Extractor {
    pub fn new(
        species: Vec<SpeciesEntry>,
        methods: Vec<MethodEntry>,
        locations: Vec<LocationEntry>,
    ) -> Result<Self> {
        Ok(Self {
            species,
            methods,
            locations: LocationResolver::new(locations),
            size_re: compile(SIZE_PATTERN)?,
            count_re: compile(COUNT_PATTERN)?,
            date_re: compile(DATE_PATTERN)?,
        })
    }

    pub fn locations(&self) -> &LocationResolver {
        &self.locations
    }

    pub fn species(&self) -> &[SpeciesEntry] {
        &self.species
    }

    pub fn species_entry(&self, name: &str) -> Option<&SpeciesEntry> {
        self.species.iter().find(|s| s.name == name)
    }

    pub fn icon_for(&self, species: &str) -> &str {
        self.species_entry(species)
            .map(|s| s.icon.as_str())
            .unwrap_or(DEFAULT_ICON)
    }

    /// At most one match per vocabulary species, in vocabulary order.
    pub fn find_species(&self, text: &str) -> Vec<SpeciesMatch> {
        let count_token = self
            .count_re
            .captures(text)
            .and_then(|caps| caps[1].parse::<u32>().ok());

        self.species
            .iter()
            .filter_map(|entry| {
                let (position, alias) = entry
                    .aliases
                    .iter()
                    .find_map(|alias| text.find(alias.as_str()).map(|pos| (pos, alias)))?;

                let remainder = &text[position + alias.len()..];
                let size_description = self
                    .size_re
                    .captures(remainder)
                    .map(|caps| format!("{}cm", &caps[1]))
                    .unwrap_or_default();

                let count = match count_token {
                    Some(n) => CatchCount::known(n, &entry.counter),
                    None => CatchCount::Unknown,
                };

                Some(SpeciesMatch {
                    species: entry.name.clone(),
                    size_description,
                    count,
                })
            })
            .collect()
    }

    pub fn find_location(&self, text: &str) -> Option<&str> {
        self.locations.resolve(text)
    }

    /// First plausible `M/D` token, normalized without zero padding.
    pub fn find_date_token(&self, text: &str) -> Option<String> {
        self.date_re.captures_iter(text).find_map(|caps| {
            let month: u32 = caps[1].parse().ok()?;
            let day: u32 = caps[2].parse().ok()?;
            ((1..=12).contains(&month) && (1..=31).contains(&day))
                .then(|| format!("{}/{}", month, day))
        })
    }

    pub fn find_method(&self, text: &str) -> Option<&str> {
        self.methods
            .iter()
            .find(|m| m.aliases.iter().any(|alias| text.contains(alias.as_str())))
            .map(|m| m.name.as_str())
    }

    /// Turn one report fragment into records: `None` when the fragment names
    /// no known location, otherwise one record per species found.
    pub fn records_from_fragment(
        &self,
        text: &str,
        origin: FragmentOrigin<'_>,
    ) -> Option<(String, Vec<CatchRecord>)> {
        let location_id = self.find_location(text)?.to_string();
        let timestamp = self
            .find_date_token(text)
            .unwrap_or_else(|| origin.default_date.to_string());
        let method = self.find_method(text).unwrap_or_default().to_string();

        let records = self
            .find_species(text)
            .into_iter()
            .map(|m| CatchRecord {
                icon: self.icon_for(&m.species).to_string(),
                species: m.species,
                size_description: m.size_description,
                count: m.count,
                timestamp: timestamp.clone(),
                reporter_label: origin.reporter_label.to_string(),
                method: method.clone(),
                source_tag: origin.source_tag.to_string(),
            })
            .collect();

        Some((location_id, records))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| CatchError::ConfigError {
        message: format!("invalid extraction pattern {}: {}", pattern, e),
    })
}
