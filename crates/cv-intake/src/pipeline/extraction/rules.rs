use std::sync::LazyLock;

use regex::Regex;

use super::keywords::{
    EDUCATION_CONTEXT_LIMIT, EDUCATION_KEYWORDS, EXPERIENCE_CONTEXT_LIMIT, EXPERIENCE_KEYWORDS,
    NAME_SCAN_LINES, SKILL_KEYWORDS,
};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern compiles")
});

// Deliberately loose: any run of 10+ digits, dashes, dots, or whitespace qualifies.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?[0-9\-.\s]{10,}").expect("phone pattern compiles"));

pub(crate) fn extract_email(text: &str) -> Option<String> {
    EMAIL_PATTERN
        .find(text)
        .map(|found| found.as_str().to_string())
}

pub(crate) fn extract_phone(text: &str) -> Option<String> {
    PHONE_PATTERN
        .find(text)
        .map(|found| found.as_str().to_string())
}

/// First of the leading lines whose first two tokens are capitalized.
pub(crate) fn extract_name(text: &str) -> Option<String> {
    text.split('\n').take(NAME_SCAN_LINES).find_map(|line| {
        let mut tokens = line.split_whitespace();
        let first = tokens.next()?;
        let second = tokens.next()?;
        (starts_uppercase(first) && starts_uppercase(second)).then(|| format!("{first} {second}"))
    })
}

pub(crate) fn extract_education(text: &str) -> Option<String> {
    collect_contexts(text, EDUCATION_CONTEXT_LIMIT, |line| {
        EDUCATION_KEYWORDS
            .iter()
            .any(|keyword| line.contains(keyword))
    })
}

pub(crate) fn extract_skills(text: &str) -> Option<String> {
    let haystack = text.to_lowercase();
    let present: Vec<&str> = SKILL_KEYWORDS
        .iter()
        .copied()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .collect();

    (!present.is_empty()).then(|| present.join(", "))
}

pub(crate) fn extract_experience(text: &str) -> Option<String> {
    collect_contexts(text, EXPERIENCE_CONTEXT_LIMIT, |line| {
        let line = line.to_lowercase();
        EXPERIENCE_KEYWORDS
            .iter()
            .any(|keyword| line.contains(keyword))
    })
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

/// Joins each hit line with its successor, keeping the first `limit` hits.
fn collect_contexts(text: &str, limit: usize, is_hit: impl Fn(&str) -> bool) -> Option<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let contexts: Vec<String> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_hit(line))
        .take(limit)
        .map(|(index, line)| match lines.get(index + 1) {
            Some(next) => format!("{line} {next}").trim().to_string(),
            None => line.trim().to_string(),
        })
        .collect();

    (!contexts.is_empty()).then(|| contexts.join("; "))
}
