use crate::core::astronomy::Site;
use crate::core::locations::{alias_conflicts, default_locations};
use crate::core::vocabulary::{default_methods, default_species};
use crate::domain::model::{LocationEntry, MethodEntry, SpeciesEntry};
use crate::utils::error::{CatchError, Result};
use crate::utils::validation::{
    validate_keyword_table, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a run needs. Every section is optional in the file; missing
/// sections and keys fall back to the built-in Kobe setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub site: Site,
    pub http: HttpConfig,
    pub sources: SourcesConfig,
    /// Ordered: the first location whose alias occurs in a fragment wins.
    pub locations: Vec<LocationEntry>,
    pub species: Vec<SpeciesEntry>,
    /// Ordered like `locations`.
    pub methods: Vec<MethodEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report: ReportConfig::default(),
            site: Site::default(),
            http: HttpConfig::default(),
            sources: SourcesConfig::default(),
            locations: default_locations(),
            species: default_species(),
            methods: default_methods(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: String,
    /// Skip every source and build the report from seasonal data alone.
    pub offline: bool,
    pub min_evidence: usize,
    pub max_records: usize,
    pub recommendation_count: usize,
    pub history_limit: usize,
    pub json_file: String,
    pub html_file: String,
    pub history_file: String,
    pub title: String,
    pub footer: String,
    pub data_credit: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: "./public".to_string(),
            offline: false,
            min_evidence: 3,
            max_records: 15,
            recommendation_count: 3,
            history_limit: 30,
            json_file: "fishing-data.json".to_string(),
            html_file: "index.html".to_string(),
            history_file: "history.csv".to_string(),
            title: "🎣 神戸釣り情報".to_string(),
            footer: "© 2026 Kobe Fishing Info".to_string(),
            data_credit: "データ元: フィッシングマックス・アングラーズ・ポイント + 季節パターン"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// Shorter bodies are treated as error or placeholder pages.
    pub min_body_length: usize,
    /// Pause between consecutive requests to the same source.
    pub politeness_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/126.0 Safari/537.36"
                .to_string(),
            accept_language: "ja,en-US;q=0.7,en;q=0.3".to_string(),
            min_body_length: 200,
            politeness_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub fishingmax: SourceConfig,
    pub anglers: SourceConfig,
    pub point: SourceConfig,
}

impl SourcesConfig {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SourceConfig)> {
        [
            ("fishingmax", &self.fishingmax),
            ("anglers", &self.anglers),
            ("point", &self.point),
        ]
        .into_iter()
    }
}

/// Per-source overrides. Empty lists and `None` keep the adapter's built-in
/// value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub enabled: bool,
    pub urls: Vec<String>,
    pub selectors: Vec<String>,
    pub whole_text_fallback: Option<bool>,
    pub max_fragments: Option<usize>,
    pub reporter_label: Option<String>,
    /// Detail-page sources only.
    pub detail_limit: Option<usize>,
    pub detail_selectors: Vec<String>,
    pub reporter_selectors: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            urls: Vec::new(),
            selectors: Vec::new(),
            whole_text_fallback: None,
            max_fragments: None,
            reporter_label: None,
            detail_limit: None,
            detail_selectors: Vec::new(),
            reporter_selectors: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatchError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_dir(&self) -> &str {
        &self.report.output_dir
    }

    fn validate_report(&self) -> Result<()> {
        let report = &self.report;
        validate_path("report.output_dir", &report.output_dir)?;
        validate_positive_number("report.max_records", report.max_records, 1)?;
        validate_range("report.recommendation_count", report.recommendation_count, 1, 10)?;
        validate_positive_number("report.history_limit", report.history_limit, 1)?;
        validate_non_empty_string("report.json_file", &report.json_file)?;
        validate_non_empty_string("report.html_file", &report.html_file)?;
        validate_non_empty_string("report.history_file", &report.history_file)?;
        Ok(())
    }

    fn validate_http(&self) -> Result<()> {
        validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 60)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;
        validate_range("http.politeness_delay_ms", self.http.politeness_delay_ms, 0, 60_000)?;
        Ok(())
    }

    fn validate_site(&self) -> Result<()> {
        validate_range("site.latitude", self.site.latitude, -90.0, 90.0)?;
        validate_range("site.longitude", self.site.longitude, -180.0, 180.0)?;
        validate_range("site.utc_offset_hours", self.site.utc_offset_hours, -12.0, 14.0)?;
        Ok(())
    }

    fn validate_sources(&self) -> Result<()> {
        for (tag, source) in self.sources.iter() {
            for url in &source.urls {
                validate_url(&format!("sources.{}.urls", tag), url)?;
            }
            if let Some(max) = source.max_fragments {
                validate_positive_number(&format!("sources.{}.max_fragments", tag), max, 1)?;
            }
        }
        Ok(())
    }

    fn validate_vocabularies(&self) -> Result<()> {
        validate_keyword_table(
            "locations",
            self.locations.iter().map(|l| (l.id.as_str(), l.aliases.as_slice())),
        )?;
        validate_keyword_table(
            "species",
            self.species.iter().map(|s| (s.name.as_str(), s.aliases.as_slice())),
        )?;
        validate_keyword_table(
            "methods",
            self.methods.iter().map(|m| (m.name.as_str(), m.aliases.as_slice())),
        )?;

        if self.locations.is_empty() {
            return Err(CatchError::MissingConfigError {
                field: "locations".to_string(),
            });
        }

        let ordered_tables = [
            (
                "locations",
                alias_conflicts(self.locations.iter().map(|l| (l.id.as_str(), l.aliases.as_slice()))),
            ),
            (
                "methods",
                alias_conflicts(self.methods.iter().map(|m| (m.name.as_str(), m.aliases.as_slice()))),
            ),
        ];
        for (field, conflicts) in ordered_tables {
            if !conflicts.is_empty() {
                let details: Vec<String> = conflicts.iter().map(|c| c.to_string()).collect();
                return Err(CatchError::ConfigValidationError {
                    field: field.to_string(),
                    message: details.join("; "),
                });
            }
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_report()?;
        self.validate_http()?;
        self.validate_site()?;
        self.validate_sources()?;
        self.validate_vocabularies()
    }
}
