//! Catalogue store: the technology records loaded once per session.
//! Records come from a single JSON array (local file or http URL) and are
//! read-only afterwards.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::CatalogueError;

/// Broad grouping used by the filter buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Category {
    #[serde(rename = "Programming Language")]
    ProgrammingLanguage,
    #[serde(rename = "Framework/Library")]
    FrameworkLibrary,
    #[serde(rename = "Database")]
    Database,
    #[serde(rename = "Tool/Platform")]
    ToolPlatform,
    #[serde(other)]
    Other,
}

impl Category {
    /// Categories that get a filter button, in display order.
    pub const FILTERABLE: [Category; 4] = [
        Category::ProgrammingLanguage,
        Category::FrameworkLibrary,
        Category::Database,
        Category::ToolPlatform,
    ];

    /// Short label shown on the filter button.
    pub fn label(self) -> &'static str {
        match self {
            Category::ProgrammingLanguage => "Technologies",
            Category::FrameworkLibrary => "Frameworks",
            Category::Database => "Databases",
            Category::ToolPlatform => "Tools",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::ProgrammingLanguage => "Programming Language",
            Category::FrameworkLibrary => "Framework/Library",
            Category::Database => "Database",
            Category::ToolPlatform => "Tool/Platform",
            Category::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Abstraction level of a technology. Read from the document in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Level {
    High,
    Intermediate,
    Low,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::High => write!(f, "high level"),
            Level::Intermediate => write!(f, "intermediate level"),
            Level::Low => write!(f, "low level"),
        }
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Level::High),
            "intermediate" => Ok(Level::Intermediate),
            "low" => Ok(Level::Low),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineEntry {
    pub year: u16,
    pub event: String,
}

/// One catalogue entry. Field names follow the document format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyRecord {
    pub name: String,
    pub category: Category,
    pub year: u16,
    pub level: Level,
    pub execution_type: String,
    pub description: String,
    pub trivia: String,
    #[serde(default)]
    pub differentiator: Option<String>,
    pub tags: Vec<String>,
    pub link: String,
    pub logo_url: String,
    /// `None` means no timeline is known, which the evolution reply relies on.
    #[serde(default)]
    pub evolution_timeline: Option<Vec<TimelineEntry>>,
}

impl TechnologyRecord {
    /// Timeline entries, if any are on file.
    pub fn timeline(&self) -> Option<&[TimelineEntry]> {
        self.evolution_timeline
            .as_deref()
            .filter(|entries| !entries.is_empty())
    }

    /// Differentiator text, treating a blank string as absent.
    pub fn differentiator(&self) -> Option<&str> {
        self.differentiator
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Where the catalogue document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueSource {
    File(std::path::PathBuf),
    Url(String),
}

impl CatalogueSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            CatalogueSource::Url(location.to_string())
        } else {
            CatalogueSource::File(location.into())
        }
    }
}

impl fmt::Display for CatalogueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogueSource::File(path) => write!(f, "{}", path.display()),
            CatalogueSource::Url(url) => f.write_str(url),
        }
    }
}

/// Loaded catalogue. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    records: Vec<TechnologyRecord>,
}

impl Catalogue {
    pub fn new(records: Vec<TechnologyRecord>) -> Self {
        Self { records }
    }

    /// Load the catalogue from its source. This is the only await point
    /// before the chat becomes interactive.
    pub async fn load(source: &CatalogueSource) -> Result<Self, CatalogueError> {
        let catalogue = match source {
            CatalogueSource::File(path) => Self::load_from_file(path).await?,
            CatalogueSource::Url(url) => Self::fetch(url).await?,
        };
        info!(source = %source, records = catalogue.len(), "catalogue_loaded");
        Ok(catalogue)
    }

    /// Load from a JSON file on disk.
    pub async fn load_from_file(path: &Path) -> Result<Self, CatalogueError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    async fn fetch(url: &str) -> Result<Self, CatalogueError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let response = http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogueError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        debug!(url, bytes = body.len(), "catalogue_fetched");
        Self::from_json(&body)
    }

    /// Parse a catalogue document (a JSON array of records).
    pub fn from_json(content: &str) -> Result<Self, CatalogueError> {
        let records: Vec<TechnologyRecord> = serde_json::from_str(content)?;
        Ok(Self { records })
    }

    /// Read-only view of every record, in document order.
    pub fn all(&self) -> &[TechnologyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TechnologyRecord> {
        self.records.get(index)
    }

    /// Case-insensitive exact name lookup. Duplicates are kept; the first wins.
    pub fn find_by_exact_name(&self, name: &str) -> Option<&TechnologyRecord> {
        self.position_by_exact_name(name).map(|i| &self.records[i])
    }

    /// Index form of [`Catalogue::find_by_exact_name`].
    pub fn position_by_exact_name(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.records
            .iter()
            .position(|r| r.name.to_lowercase() == wanted)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    const DOCUMENT: &str = r#"[
        {
            "name": "Python",
            "category": "Programming Language",
            "year": 1991,
            "level": "high",
            "executionType": "Interpreted",
            "description": "General purpose language.",
            "trivia": "Named after Monty Python.",
            "differentiator": "Readability first.",
            "tags": ["data", "web"],
            "link": "https://python.org",
            "logoUrl": "https://python.org/logo.svg",
            "evolutionTimeline": [
                {"year": 1991, "event": "Initial release"},
                {"year": 2008, "event": "Python 3.0"}
            ]
        },
        {
            "name": "Redis",
            "category": "Database",
            "year": 2009,
            "level": "high",
            "executionType": "Compiled",
            "description": "In-memory store.",
            "trivia": "Started as a log analyser backend.",
            "tags": ["cache"],
            "link": "https://redis.io",
            "logoUrl": "https://redis.io/logo.svg"
        }
    ]"#;

    mod parsing {
        use super::*;

        #[test]
        fn parses_fixed_field_names() {
            let catalogue = Catalogue::from_json(DOCUMENT).unwrap();
            assert_eq!(catalogue.len(), 2);

            let python = &catalogue.all()[0];
            assert_eq!(python.category, Category::ProgrammingLanguage);
            assert_eq!(python.level, Level::High);
            assert_eq!(python.execution_type, "Interpreted");
            assert_eq!(python.logo_url, "https://python.org/logo.svg");
            assert_eq!(python.timeline().map(<[_]>::len), Some(2));
        }

        #[test]
        fn optional_fields_may_be_absent() {
            let catalogue = Catalogue::from_json(DOCUMENT).unwrap();
            let redis = &catalogue.all()[1];
            assert!(redis.differentiator().is_none());
            assert!(redis.evolution_timeline.is_none());
            assert!(redis.timeline().is_none());
        }

        #[test]
        fn unknown_category_maps_to_other() {
            let doc = DOCUMENT.replace("\"Database\"", "\"Operating System\"");
            let catalogue = Catalogue::from_json(&doc).unwrap();
            assert_eq!(catalogue.all()[1].category, Category::Other);
        }

        #[test]
        fn malformed_document_is_a_parse_error() {
            let err = Catalogue::from_json("{\"name\": \"Python\"}").unwrap_err();
            assert!(matches!(err, CatalogueError::Parse(_)));
        }

        #[test]
        fn level_is_read_in_any_case() {
            let doc = DOCUMENT
                .replacen("\"level\": \"high\"", "\"level\": \"High\"", 1)
                .replacen("\"level\": \"high\"", "\"level\": \"LOW\"", 1);
            let catalogue = Catalogue::from_json(&doc).unwrap();
            assert_eq!(catalogue.all()[0].level, Level::High);
            assert_eq!(catalogue.all()[1].level, Level::Low);
        }

        #[test]
        fn unknown_level_is_a_parse_error() {
            let doc = DOCUMENT.replacen("\"level\": \"high\"", "\"level\": \"medium\"", 1);
            let err = Catalogue::from_json(&doc).unwrap_err();
            assert!(matches!(err, CatalogueError::Parse(_)));
        }

        #[test]
        fn level_parses_from_text() {
            assert_eq!(" Low ".parse::<Level>(), Ok(Level::Low));
            assert!("medium".parse::<Level>().is_err());
        }

        #[test]
        fn empty_timeline_counts_as_absent() {
            let mut r = record("Go", Category::ProgrammingLanguage);
            r.evolution_timeline = Some(Vec::new());
            assert!(r.timeline().is_none());
        }
    }

    mod lookup {
        use super::*;

        #[test]
        fn exact_name_is_case_insensitive() {
            let catalogue = sample();
            for r in catalogue.all() {
                assert_eq!(catalogue.find_by_exact_name(&r.name.to_lowercase()), Some(r));
                assert_eq!(catalogue.find_by_exact_name(&r.name.to_uppercase()), Some(r));
            }
        }

        #[test]
        fn prefix_is_not_an_exact_match() {
            let catalogue = sample();
            assert!(catalogue.find_by_exact_name("Pyth").is_none());
            assert!(catalogue.find_by_exact_name("").is_none());
        }

        #[test]
        fn first_duplicate_wins() {
            let mut first = record("Go", Category::ProgrammingLanguage);
            first.year = 2009;
            let mut second = record("go", Category::ProgrammingLanguage);
            second.year = 2012;
            let catalogue = Catalogue::new(vec![first, second]);
            assert_eq!(catalogue.find_by_exact_name("GO").map(|r| r.year), Some(2009));
        }
    }

    mod sources {
        use super::*;
        use std::io::Write;

        #[test]
        fn http_locations_are_urls() {
            assert_eq!(
                CatalogueSource::parse("https://example.com/data.json"),
                CatalogueSource::Url("https://example.com/data.json".into())
            );
            assert_eq!(
                CatalogueSource::parse("data.json"),
                CatalogueSource::File("data.json".into())
            );
        }

        #[tokio::test]
        async fn loads_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(DOCUMENT.as_bytes()).unwrap();

            let source = CatalogueSource::File(file.path().to_path_buf());
            let catalogue = Catalogue::load(&source).await.unwrap();
            assert_eq!(catalogue.len(), 2);
        }

        #[tokio::test]
        async fn missing_file_is_an_io_error() {
            let dir = tempfile::TempDir::new().unwrap();
            let source = CatalogueSource::File(dir.path().join("missing.json"));
            let err = Catalogue::load(&source).await.unwrap_err();
            assert!(matches!(err, CatalogueError::Io(_)));
        }
    }
}
