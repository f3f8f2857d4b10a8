use crate::utils::error::CatchError;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Source tag carried by records that come from the seasonal pattern table.
pub const SEASONAL_TAG: &str = "seasonal";
pub const DEFAULT_ICON: &str = "🐟";
pub const DEFAULT_COUNTER: &str = "匹";
/// Display text for a catch whose size was reported but not counted.
pub const UNKNOWN_COUNT: &str = "数匹";

/// How many fish a record reports.
///
/// `Unknown` means "some, but no number was given" and is distinct from a
/// zero catch. It renders as `数匹`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatchCount {
    Known { count: u32, counter: String },
    /// "50匹超" style lower bounds.
    AtLeast { count: u32, counter: String },
    Unknown,
}

impl CatchCount {
    pub fn known(count: u32, counter: &str) -> Self {
        CatchCount::Known {
            count,
            counter: counter.to_string(),
        }
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            CatchCount::Known { count, .. } | CatchCount::AtLeast { count, .. } => Some(*count),
            CatchCount::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CatchCount::Unknown)
    }
}

impl fmt::Display for CatchCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatchCount::Known { count, counter } => write!(f, "{}{}", count, counter),
            CatchCount::AtLeast { count, counter } => write!(f, "{}{}超", count, counter),
            CatchCount::Unknown => f.write_str(UNKNOWN_COUNT),
        }
    }
}

impl FromStr for CatchCount {
    type Err = CatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == UNKNOWN_COUNT {
            return Ok(CatchCount::Unknown);
        }

        let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let count: u32 = s[..digits_end].parse().map_err(|_| CatchError::ParseError {
            what: "catch count".to_string(),
            value: s.to_string(),
        })?;

        let rest = &s[digits_end..];
        let (counter, at_least) = match rest.strip_suffix('超') {
            Some(counter) => (counter, true),
            None => (rest, false),
        };
        let counter = if counter.is_empty() {
            DEFAULT_COUNTER.to_string()
        } else {
            counter.to_string()
        };

        Ok(if at_least {
            CatchCount::AtLeast { count, counter }
        } else {
            CatchCount::Known { count, counter }
        })
    }
}

impl Serialize for CatchCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CatchCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One observed or inferred fishing event.
///
/// `species` is always a vocabulary name and never empty; every other field
/// is present, possibly as an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchRecord {
    pub species: String,
    pub size_description: String,
    #[serde(rename = "countDescription")]
    pub count: CatchCount,
    /// Opaque date/time token as the source wrote it, e.g. `10/15 06:30`.
    pub timestamp: String,
    pub reporter_label: String,
    pub method: String,
    pub icon: String,
    pub source_tag: String,
}

impl CatchRecord {
    pub fn is_well_formed(&self) -> bool {
        !self.species.trim().is_empty()
    }

    pub fn is_seasonal(&self) -> bool {
        self.source_tag == SEASONAL_TAG
    }
}

/// A record emitted by a source, keyed by the location it mentions.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedCatch {
    pub location_id: String,
    pub record: CatchRecord,
}

/// Fixed configuration for one fishing spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub id: String,
    pub area: String,
    pub distance_km: f64,
    #[serde(default)]
    pub info: String,
    /// Matched in order; list longer aliases before their substrings.
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub name: String,
    pub aliases: Vec<String>,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_counter")]
    pub counter: String,
    /// Best targeted around dusk rather than dawn.
    #[serde(default)]
    pub evening: bool,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_counter() -> String {
    DEFAULT_COUNTER.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodEntry {
    pub name: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedLocationResult {
    pub location_id: String,
    pub records: Vec<CatchRecord>,
    /// How many of `records` came from live sources (they always lead).
    pub live_count: usize,
}

/// Per-source result of one collection pass. Diagnostics are human-readable
/// reasons for anything that was skipped.
#[derive(Debug, Clone, Default)]
pub struct SourceOutcome {
    pub tag: String,
    pub records: Vec<SourcedCatch>,
    pub diagnostics: Vec<String>,
}

impl SourceOutcome {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }
}

/// Clock time rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(pub NaiveTime);

impl ClockTime {
    /// Wall-clock time for fractional hours after midnight, wrapped to one day
    /// and truncated to the minute.
    pub fn from_hours(hours: f64) -> Self {
        Self::from_minutes(hours * 60.0)
    }

    pub fn from_minutes(minutes: f64) -> Self {
        // nudge so 671.9999999 (float noise for 11:12) truncates to 672
        let minutes = (minutes + 1e-6).rem_euclid(24.0 * 60.0).floor() as i64;
        ClockTime(NaiveTime::default() + chrono::Duration::minutes(minutes))
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    pub fn offset_minutes(&self, minutes: i64) -> Self {
        ClockTime(self.0 + chrono::Duration::minutes(minutes))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A dawn or dusk fishing window, rendered `HH:MM - HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeWindow {
    pub fn around(center: ClockTime, half_width_minutes: i64) -> Self {
        Self {
            start: center.offset_minutes(-half_width_minutes),
            end: center.offset_minutes(half_width_minutes),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

impl Serialize for TimeWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Tide classes used by Japanese tide tables, largest range first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TideType {
    #[serde(rename = "大潮")]
    Spring,
    #[serde(rename = "中潮")]
    Moderate,
    #[serde(rename = "小潮")]
    Neap,
    #[serde(rename = "長潮")]
    Long,
    #[serde(rename = "若潮")]
    Young,
}

impl TideType {
    pub const ALL: [TideType; 5] = [
        TideType::Spring,
        TideType::Moderate,
        TideType::Neap,
        TideType::Long,
        TideType::Young,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TideType::Spring => "大潮",
            TideType::Moderate => "中潮",
            TideType::Neap => "小潮",
            TideType::Long => "長潮",
            TideType::Young => "若潮",
        }
    }
}

impl fmt::Display for TideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::New => "新月",
            MoonPhase::WaxingCrescent => "三日月",
            MoonPhase::FirstQuarter => "上弦の月",
            MoonPhase::WaxingGibbous => "十三夜",
            MoonPhase::Full => "満月",
            MoonPhase::WaningGibbous => "寝待月",
            MoonPhase::LastQuarter => "下弦の月",
            MoonPhase::WaningCrescent => "有明月",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            MoonPhase::New => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::Full => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }
}

impl Serialize for MoonPhase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("MoonPhase", 2)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("glyph", self.glyph())?;
        state.end()
    }
}

/// Tide, moon and sun estimates for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TideSnapshot {
    pub date: NaiveDate,
    pub date_label: String,
    /// Days since new moon, one decimal place.
    pub lunar_age: f64,
    pub moon_phase: MoonPhase,
    pub tide_type: TideType,
    pub high_tides: Vec<ClockTime>,
    pub low_tides: Vec<ClockTime>,
    pub sunrise: ClockTime,
    pub sunset: ClockTime,
    pub dawn: TimeWindow,
    pub dusk: TimeWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub rank: usize,
    pub location_id: String,
    pub area: String,
    pub species: String,
    pub icon: String,
    pub size_hint: String,
    pub count_hint: String,
    pub best_time: String,
    pub tide_type: TideType,
    /// Percentage, 55 to 95.
    pub confidence: u8,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekendOutlook {
    pub label: String,
    pub saturday: TideSnapshot,
    pub picks: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotReport {
    pub id: String,
    pub area: String,
    pub distance_km: f64,
    pub info: String,
    pub live_count: usize,
    pub catches: Vec<CatchRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    pub tag: String,
    pub records: usize,
    pub diagnostics: Vec<String>,
}

/// The single artifact a run produces; handed to persistence and rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub last_updated: String,
    pub date_label: String,
    pub spots: Vec<SpotReport>,
    pub today: TideSnapshot,
    pub tomorrow: TideSnapshot,
    pub recommendations: Vec<Recommendation>,
    pub weekend: WeekendOutlook,
    pub sources: Vec<SourceSummary>,
}

impl Report {
    pub fn spot(&self, id: &str) -> Option<&SpotReport> {
        self.spots.iter().find(|s| s.id == id)
    }

    pub fn total_catches(&self) -> usize {
        self.spots.iter().map(|s| s.catches.len()).sum()
    }

    pub fn live_catches(&self) -> usize {
        self.spots.iter().map(|s| s.live_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_count_display() {
        assert_eq!(CatchCount::known(20, "匹").to_string(), "20匹");
        assert_eq!(CatchCount::Unknown.to_string(), "数匹");
        assert_eq!(
            CatchCount::AtLeast {
                count: 50,
                counter: "匹".to_string()
            }
            .to_string(),
            "50匹超"
        );
    }

    #[test]
    fn test_catch_count_parse() {
        assert_eq!("3杯".parse::<CatchCount>().unwrap(), CatchCount::known(3, "杯"));
        assert_eq!(
            "50匹超".parse::<CatchCount>().unwrap(),
            CatchCount::AtLeast {
                count: 50,
                counter: "匹".to_string()
            }
        );
        assert_eq!("数匹".parse::<CatchCount>().unwrap(), CatchCount::Unknown);
        assert_eq!("".parse::<CatchCount>().unwrap(), CatchCount::Unknown);
        assert_eq!("7".parse::<CatchCount>().unwrap(), CatchCount::known(7, "匹"));
        assert!("たくさん".parse::<CatchCount>().is_err());
    }

    #[test]
    fn test_unknown_is_not_zero() {
        assert_eq!(CatchCount::Unknown.value(), None);
        assert_eq!(CatchCount::known(0, "匹").value(), Some(0));
        assert!(!CatchCount::Unknown.is_known());
    }

    #[test]
    fn test_catch_record_serializes_every_field_as_string() {
        let record = CatchRecord {
            species: "アジ".to_string(),
            size_description: String::new(),
            count: CatchCount::Unknown,
            timestamp: "10/16".to_string(),
            reporter_label: String::new(),
            method: String::new(),
            icon: DEFAULT_ICON.to_string(),
            source_tag: "fishingmax".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "species",
            "sizeDescription",
            "countDescription",
            "timestamp",
            "reporterLabel",
            "method",
            "icon",
            "sourceTag",
        ] {
            assert!(obj[key].is_string(), "{} should be a string", key);
        }
        assert_eq!(obj["countDescription"], "数匹");

        let back: CatchRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_clock_time_wraps_and_truncates() {
        assert_eq!(ClockTime::from_hours(5.5).to_string(), "05:30");
        assert_eq!(ClockTime::from_hours(24.25).to_string(), "00:15");
        assert_eq!(ClockTime::from_minutes(-30.0).to_string(), "23:30");
        assert_eq!(ClockTime::from_hours(6.999).to_string(), "06:59");
    }

    #[test]
    fn test_time_window_display() {
        let window = TimeWindow::around(ClockTime::from_hours(6.0), 30);
        assert_eq!(window.to_string(), "05:30 - 06:30");
        assert_eq!(serde_json::to_value(window).unwrap(), "05:30 - 06:30");
    }
}
