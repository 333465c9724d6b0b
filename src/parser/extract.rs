use regex::Regex;

use super::rules::{Source, COMPILED};
use crate::record::{Field, Record};

/// Build a record from a post body. Fields with no match stay `None`.
pub fn extract(text: &str, url: &str, category: Option<&str>) -> Record {
    let mut record = Record::new(url, category);

    for (rule, re) in COMPILED.iter() {
        let value = match rule.source {
            Source::Text => capture(re, rule.group, text),
            Source::Salary => record
                .get(Field::Salary)
                .and_then(|salary| capture(re, rule.group, salary)),
        };
        record.set(rule.field, value);
    }

    record
}

/// First match of `re` in `haystack`, group `group`, cleaned.
fn capture(re: &Regex, group: usize, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|caps| caps.get(group))
        .and_then(|m| clean(m.as_str()))
}

/// Drop line breaks and `**` emphasis, then trim. Empty results are absent.
pub fn clean(raw: &str) -> Option<String> {
    let cleaned = raw.replace(['\n', '\r'], "").replace("**", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
