use crate::analysis::Analysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Score changes strictly larger than this between consecutive analyses are reported
pub const SIGNIFICANT_CHANGE_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificantChange {
    pub timestamp: DateTime<Utc>,
    pub score_delta: i32,
    pub reason_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringWarning {
    pub warning: String,
    pub occurrences: usize,
}

/// Trend signals across a time-ordered run of analyses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub common_keywords: Vec<String>,
    pub significant_changes: Vec<SignificantChange>,
    pub recurring_warnings: Vec<RecurringWarning>,
}

/// Keywords present in every analysis, in the order the first analysis lists them
fn common_keywords(analyses: &[Analysis]) -> Vec<String> {
    let Some((first, rest)) = analyses.split_first() else {
        return Vec::new();
    };

    let others: Vec<HashSet<&str>> = rest
        .iter()
        .map(|a| a.statistics.top_keywords.iter().map(String::as_str).collect())
        .collect();

    let mut common: Vec<String> = Vec::new();
    for keyword in &first.statistics.top_keywords {
        if common.contains(keyword) {
            continue;
        }
        if others.iter().all(|set| set.contains(keyword.as_str())) {
            common.push(keyword.clone());
        }
    }
    common
}

fn significant_changes(analyses: &[Analysis]) -> Vec<SignificantChange> {
    analyses
        .windows(2)
        .filter_map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let delta = i32::from(curr.credibility_score) - i32::from(prev.credibility_score);
            (delta.abs() > SIGNIFICANT_CHANGE_THRESHOLD).then(|| SignificantChange {
                timestamp: curr.timestamp,
                score_delta: delta,
                reason_text: curr.fact_check_explanation.clone(),
            })
        })
        .collect()
}

/// Warnings seen more than once, most frequent first; ties keep first-seen order
fn recurring_warnings(analyses: &[Analysis]) -> Vec<RecurringWarning> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for warning in analyses.iter().flat_map(|a| a.warnings.iter().map(String::as_str)) {
        match positions.get(warning) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(warning, counts.len());
                counts.push((warning, 1));
            }
        }
    }

    counts.retain(|&(_, n)| n > 1);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(warning, occurrences)| RecurringWarning {
            warning: warning.to_string(),
            occurrences,
        })
        .collect()
}

/// Detect trends across `analyses`, which must be ordered by ascending timestamp.
///
/// Returns `None` when fewer than two analyses are given.
pub fn detect_patterns(analyses: &[Analysis]) -> Option<PatternReport> {
    if analyses.len() < 2 {
        return None;
    }

    Some(PatternReport {
        common_keywords: common_keywords(analyses),
        significant_changes: significant_changes(analyses),
        recurring_warnings: recurring_warnings(analyses),
    })
}
