//! List rendering.
//!
//! # Responsibility
//! - Project the ordered collection into item views with tagged controls.
//! - Format timestamps for display.
//!
//! # Invariants
//! - Item order equals collection order.
//! - Every control carries the id of the record it was rendered for.
//! - The update timestamp is shown only for edited records.

use crate::model::content::{ContentId, ContentRecord, ContentType};
use chrono::{DateTime, FixedOffset, Local, Locale, Offset, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const EMPTY_PLACEHOLDER: &str = "No content available. Add some content!";

// Year, abbreviated month, day, hour and minute; no seconds. Only the field
// order differs between locales, month names come from the locale data.
const MONTH_FIRST: &str = "%b %-d, %Y, %H:%M";
const DAY_FIRST: &str = "%-d %b %Y, %H:%M";
const DAY_FIRST_DOTTED: &str = "%-d. %b %Y, %H:%M";
const YEAR_FIRST_CJ: &str = "%Y年%-m月%-d日 %H:%M";
const YEAR_FIRST_KO: &str = "%Y년 %-m월 %-d일 %H:%M";

/// Locale name that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocaleError(pub String);

impl Display for UnknownLocaleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown locale `{}`", self.0)
    }
}

impl Error for UnknownLocaleError {}

/// Locale and offset used to display timestamps.
#[derive(Debug, Clone, Copy)]
pub struct TimestampFormat {
    locale: Locale,
    offset: FixedOffset,
    pattern: &'static str,
}

impl TimestampFormat {
    pub fn new(locale: Locale, offset: FixedOffset) -> Self {
        Self {
            locale,
            offset,
            pattern: pattern_for(locale),
        }
    }

    /// Resolves a POSIX-style locale name (`en_US`, `de_DE`) and uses the
    /// host's current UTC offset.
    ///
    /// Field order is picked per locale: month first for `en_US`/`en_PH`,
    /// year first for Chinese, Japanese and Korean, day first elsewhere.
    /// Clock time is always 24-hour.
    pub fn for_locale_name(name: &str) -> Result<Self, UnknownLocaleError> {
        let normalized = name.trim().replace('-', "_");
        let locale = Locale::try_from(normalized.as_str())
            .map_err(|_| UnknownLocaleError(name.trim().to_string()))?;
        Ok(Self::new(locale, Local::now().offset().fix()))
    }

    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.offset)
            .format_localized(self.pattern, self.locale)
            .to_string()
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self::new(Locale::en_US, Utc.fix())
    }
}

fn pattern_for(locale: Locale) -> &'static str {
    let name = locale.to_string();
    let (language, region) = name.split_once('_').unwrap_or((name.as_str(), ""));
    match (language, region) {
        ("en", "US" | "PH") => MONTH_FIRST,
        ("zh" | "ja", _) => YEAR_FIRST_CJ,
        ("ko", _) => YEAR_FIRST_KO,
        ("de" | "da" | "nb" | "nn" | "fi" | "cs" | "sk", _) => DAY_FIRST_DOTTED,
        _ => DAY_FIRST,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Edit,
    Delete,
}

/// One clickable per-item control, tagged with its record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionControl {
    pub action: ListAction,
    pub target: ContentId,
}

/// Display projection of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: ContentId,
    pub title: String,
    pub kind: ContentType,
    pub body: String,
    pub created: String,
    /// Present only when the record was edited.
    pub updated: Option<String>,
    pub edit: ActionControl,
    pub delete: ActionControl,
}

impl ItemView {
    /// `Created: <ts>` plus `, Updated: <ts>` for edited records.
    pub fn meta_line(&self) -> String {
        match &self.updated {
            Some(updated) => format!("Created: {}, Updated: {}", self.created, updated),
            None => format!("Created: {}", self.created),
        }
    }
}

/// Rendered list region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Placeholder(&'static str),
    Items(Vec<ItemView>),
}

impl ListView {
    pub fn items(&self) -> &[ItemView] {
        match self {
            Self::Placeholder(_) => &[],
            Self::Items(items) => items,
        }
    }

    /// Looks up the control for the item at `position` (0-based).
    pub fn control_at(&self, position: usize, action: ListAction) -> Option<&ActionControl> {
        self.items().get(position).map(|item| match action {
            ListAction::Edit => &item.edit,
            ListAction::Delete => &item.delete,
        })
    }
}

impl Display for ListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placeholder(message) => writeln!(f, "{message}"),
            Self::Items(items) => {
                for (index, item) in items.iter().enumerate() {
                    let number = index + 1;
                    writeln!(f, "#{number} {} [{}]", item.title, item.kind)?;
                    for line in item.body.lines() {
                        writeln!(f, "    {line}")?;
                    }
                    writeln!(f, "    {}", item.meta_line())?;
                    writeln!(f, "    id={}  (edit #{number} | delete #{number})", item.id)?;
                }
                Ok(())
            }
        }
    }
}

/// Projects the collection into a `ListView`.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    format: TimestampFormat,
}

impl Renderer {
    pub fn new(format: TimestampFormat) -> Self {
        Self { format }
    }

    pub fn render(&self, records: &[ContentRecord]) -> ListView {
        if records.is_empty() {
            return ListView::Placeholder(EMPTY_PLACEHOLDER);
        }

        ListView::Items(records.iter().map(|record| self.render_item(record)).collect())
    }

    fn render_item(&self, record: &ContentRecord) -> ItemView {
        ItemView {
            id: record.id.clone(),
            title: record.title.clone(),
            kind: record.kind,
            body: record.body.clone(),
            created: self.format.format(&record.created_at),
            updated: record
                .is_edited()
                .then(|| self.format.format(&record.updated_at)),
            edit: ActionControl {
                action: ListAction::Edit,
                target: record.id.clone(),
            },
            delete: ActionControl {
                action: ListAction::Delete,
                target: record.id.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TimestampFormat, UnknownLocaleError};
    use chrono::{FixedOffset, Locale, Offset, TimeZone, Utc};

    #[test]
    fn format_drops_seconds_and_abbreviates_month() {
        let format = TimestampFormat::default();
        let instant = Utc.with_ymd_and_hms(2026, 3, 5, 14, 7, 59).unwrap();
        assert_eq!(format.format(&instant), "Mar 5, 2026, 14:07");
    }

    #[test]
    fn format_applies_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let format = TimestampFormat::new(Locale::en_US, offset);
        let instant = Utc.with_ymd_and_hms(2026, 12, 31, 23, 30, 0).unwrap();
        assert_eq!(format.format(&instant), "Jan 1, 2027, 01:30");
    }

    #[test]
    fn field_order_follows_locale() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let utc = Utc.fix();
        let cases = [
            (Locale::de_DE, "19. Okt 2026, 08:30"),
            (Locale::fr_FR, "19 oct. 2026, 08:30"),
            (Locale::en_GB, "19 Oct 2026, 08:30"),
            (Locale::ja_JP, "2026年10月19日 08:30"),
            (Locale::en_US, "Oct 19, 2026, 08:30"),
        ];
        for (locale, expected) in cases {
            assert_eq!(TimestampFormat::new(locale, utc).format(&instant), expected);
        }
    }

    #[test]
    fn unknown_locale_name_is_rejected() {
        let err = TimestampFormat::for_locale_name("xx_NOPE").unwrap_err();
        assert_eq!(err, UnknownLocaleError("xx_NOPE".to_string()));
    }

    #[test]
    fn dashed_locale_name_is_accepted() {
        assert!(TimestampFormat::for_locale_name("en-US").is_ok());
    }
}
