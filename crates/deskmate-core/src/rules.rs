//! Declarative extraction rules used by the task parser.
//!
//! Keyword tables are matched in list order: the first rule whose keyword is
//! contained anywhere in the lower-cased text wins, regardless of where in
//! the text it occurs. Containment is literal, so "reporting" matches
//! "report". The time matcher uses the first match in the text.

use deskmate_protocol::TaskTime;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Keyword to label mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: &'static str,
    pub label: &'static str,
}

/// Ordered keyword rules with a fallback label.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub rules: &'static [KeywordRule],
    pub fallback: &'static str,
}

impl RuleTable {
    /// Label of the first rule (in list order) contained in `lower`, or the fallback.
    ///
    /// `lower` must already be lower-cased.
    pub fn resolve(&self, lower: &str) -> &'static str {
        self.rules
            .iter()
            .find(|rule| lower.contains(rule.keyword))
            .map_or(self.fallback, |rule| rule.label)
    }
}

/// Location rules, default "Office".
pub const LOCATION_RULES: RuleTable = RuleTable {
    rules: &[
        KeywordRule {
            keyword: "conference",
            label: "Conference Room",
        },
        KeywordRule {
            keyword: "cabin",
            label: "Cabin",
        },
        KeywordRule {
            keyword: "desk",
            label: "Desk",
        },
        KeywordRule {
            keyword: "reception",
            label: "Reception",
        },
        KeywordRule {
            keyword: "cafeteria",
            label: "Cafeteria",
        },
    ],
    fallback: "Office",
};

/// Category rules, default "General".
pub const CATEGORY_RULES: RuleTable = RuleTable {
    rules: &[
        KeywordRule {
            keyword: "meeting",
            label: "Meeting",
        },
        KeywordRule {
            keyword: "call",
            label: "Call",
        },
        KeywordRule {
            keyword: "follow",
            label: "Follow-up",
        },
        KeywordRule {
            keyword: "report",
            label: "Report",
        },
        KeywordRule {
            keyword: "break",
            label: "Break",
        },
    ],
    fallback: "General",
};

/// `H[:MM][ ][am|pm]`, hour one or two digits starting at a word boundary.
///
/// Digits and the boundary are ASCII-only: digits from other scripts never
/// match and a non-ASCII letter is not a word character.
const TIME_PATTERN: &str = r"(?i)(?-u:\b)([0-9]{1,2})(?::([0-9]{2}))?\s?(am|pm)?";

static DEFAULT_TIME_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(TIME_PATTERN).ok());

/// First time-like substring found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeMatch {
    /// Byte range of the matched substring.
    pub range: Range<usize>,
    /// Converted time; None when the digits are out of range.
    pub time: Option<TaskTime>,
}

/// Finds and converts the first time expression in a text.
#[derive(Debug, Clone, Default)]
pub struct TimeMatcher;

impl TimeMatcher {
    /// Locate the first match and convert it to 24-hour form.
    pub fn find(&self, text: &str) -> Option<TimeMatch> {
        let regex = DEFAULT_TIME_REGEX.as_ref()?;
        let caps = regex.captures(text)?;
        let whole = caps.get(0)?;
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = match caps.get(2) {
            Some(minute) => minute.as_str().parse().ok()?,
            None => 0,
        };
        let meridiem = caps.get(3).map(|m| m.as_str().to_ascii_lowercase());
        let hour = match meridiem.as_deref() {
            Some("pm") if (1..=11).contains(&hour) => hour + 12,
            Some("am") if hour == 12 => 0,
            _ => hour,
        };
        let time = match (u8::try_from(hour), u8::try_from(minute)) {
            (Ok(hour), Ok(minute)) => TaskTime::new(hour, minute),
            _ => None,
        };
        Some(TimeMatch {
            range: whole.range(),
            time,
        })
    }
}
