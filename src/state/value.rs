use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed set of column value types. A cell never carries its own type; it
/// inherits the type of its column, which drives coercion on commit and the
/// display rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    Url,
    Status,
    Custom,
}

impl ColumnType {
    pub fn all() -> &'static [Self] {
        &[
            Self::Text,
            Self::Number,
            Self::Date,
            Self::Url,
            Self::Status,
            Self::Custom,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Url => "url",
            Self::Status => "status",
            Self::Custom => "custom",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            "url" => Some(Self::Url),
            "status" => Some(Self::Status),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Fixed enumeration for status columns. Any raw value outside this set is
/// rejected on commit; the editing affordance is a constrained choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    NotSet,
    InProcess,
    NeedToStart,
    Complete,
    Blocked,
}

impl Status {
    pub fn all() -> &'static [Self] {
        &[
            Self::NotSet,
            Self::InProcess,
            Self::NeedToStart,
            Self::Complete,
            Self::Blocked,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotSet => "not-set",
            Self::InProcess => "in-process",
            Self::NeedToStart => "need-to-start",
            Self::Complete => "complete",
            Self::Blocked => "blocked",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotSet => "Not set",
            Self::InProcess => "In-process",
            Self::NeedToStart => "Need to start",
            Self::Complete => "Complete",
            Self::Blocked => "Blocked",
        }
    }

    /// Accepts the canonical kebab token plus the spaced/cased variants seen
    /// in imported data ("In-process", "Need to start").
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|ch| if ch == ' ' || ch == '_' { '-' } else { ch })
            .collect();
        match normalized.as_str() {
            "not-set" => Some(Self::NotSet),
            "in-process" => Some(Self::InProcess),
            "need-to-start" => Some(Self::NeedToStart),
            "complete" => Some(Self::Complete),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

/// Canonical stored value of a cell. Absence of a cell entry is equivalent
/// to `Null`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Status(Status),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Raw string form: what an editor draft starts from and what export
    /// writes for non-numeric values.
    pub fn raw_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Status(s) => s.as_str().to_string(),
        }
    }
}

/// Commit-time coercion: maps a raw edited string plus the column type to
/// the canonical stored value. `None` means the write is rejected and the
/// prior value must be retained.
pub fn coerce_commit(ty: ColumnType, raw: &str) -> Option<CellValue> {
    if raw.is_empty() {
        return Some(CellValue::Null);
    }
    match ty {
        ColumnType::Text | ColumnType::Custom => Some(CellValue::Text(raw.to_string())),
        ColumnType::Number => match raw.trim().parse::<f64>() {
            // Unparseable input degrades to stored text, mirroring the
            // date fallback; only status rejects.
            Ok(n) if n.is_finite() => Some(CellValue::Number(n)),
            _ => Some(CellValue::Text(raw.to_string())),
        },
        ColumnType::Date => Some(CellValue::Text(raw.to_string())),
        ColumnType::Url => Some(CellValue::Text(ensure_url_protocol(raw))),
        ColumnType::Status => Status::parse(raw).map(CellValue::Status),
    }
}

/// Maps a stored value back to its display form under the column type.
pub fn display_value(ty: ColumnType, value: &CellValue) -> String {
    match (ty, value) {
        (ColumnType::Date, CellValue::Text(raw)) => format_date(raw),
        _ => value.raw_string(),
    }
}

pub fn has_url_protocol(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Prepends `https://` to values lacking a recognized scheme. Idempotent:
/// already-prefixed values pass through unchanged.
pub fn ensure_url_protocol(raw: &str) -> String {
    if raw.trim().is_empty() || has_url_protocol(raw) {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Editing affordance: the scheme is hidden while a url cell is edited and
/// restored by `ensure_url_protocol` on commit.
pub fn strip_url_protocol(raw: &str) -> &str {
    let lower = raw.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("https://") {
        &raw[raw.len() - rest.len()..]
    } else if let Some(rest) = lower.strip_prefix("http://") {
        &raw[raw.len() - rest.len()..]
    } else {
        raw
    }
}

/// Dates that parse as ISO render as a locale-style date; anything else is
/// shown unchanged as raw text.
fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%m/%d/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    format!("{value}")
}
