use chrono::NaiveDate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

lazy_static::lazy_static! {
    // D/M/YYYY (slash or dash) or "Month D, YYYY" with full or abbreviated month
    static ref DATE_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:(?P<d>\d{1,2})[/-](?P<m>\d{1,2})[/-](?P<y>\d{4})|(?P<month>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(?P<day>\d{1,2})(?:st|nd|rd|th)?,?\s+(?P<year>\d{4}))\b"
    )
    .unwrap();
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// A date as written in the text, with its calendar value when it names a real day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMention {
    pub text: String,
    pub date: Option<NaiveDate>,
}

/// First and last date mentions in text order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timespan {
    pub earliest: DateMention,
    pub latest: DateMention,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub dates_found: Vec<String>,
    pub has_inconsistencies: bool,
    pub timespan: Option<Timespan>,
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

fn parse_mention(caps: &Captures) -> Option<NaiveDate> {
    let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());

    if let (Some(day), Some(month), Some(year)) = (number("d"), number("m"), number("y")) {
        return NaiveDate::from_ymd_opt(year as i32, month, day);
    }

    let month = caps.name("month").and_then(|m| month_number(m.as_str()))?;
    let day = number("day")?;
    let year = number("year")?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Dates mentioned in `text`, in order of appearance
pub fn date_mentions(text: &str) -> Vec<DateMention> {
    DATE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(DateMention {
                text: whole.as_str().to_string(),
                date: parse_mention(&caps),
            })
        })
        .collect()
}

/// Find dates in `text`.
///
/// A timeline is flagged inconsistent when the same date string appears more
/// than once. This only catches verbatim repeats, not chronological conflicts.
pub fn extract_timeline(text: &str) -> Timeline {
    let mentions = date_mentions(text);

    let mut seen = HashSet::new();
    let has_duplicate = mentions.iter().any(|m| !seen.insert(m.text.as_str()));

    let timespan = match (mentions.first(), mentions.last()) {
        (Some(first), Some(last)) => Some(Timespan {
            earliest: first.clone(),
            latest: last.clone(),
        }),
        _ => None,
    };

    Timeline {
        has_inconsistencies: mentions.len() > 1 && has_duplicate,
        dates_found: mentions.into_iter().map(|m| m.text).collect(),
        timespan,
    }
}
