//! Lightweight keyword and summary generation over extracted article text.

use std::collections::HashMap;

pub const MAX_KEYWORDS: usize = 10;
pub const SUMMARY_SENTENCES: usize = 5;

/// Every meaningful term with its occurrence count, most frequent first; ties keep first-seen order.
pub fn term_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for (position, word) in terms(text).into_iter().enumerate() {
        let entry = counts.entry(word).or_insert((0, position));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked.into_iter().map(|(word, (count, _))| (word, count)).collect()
}

/// The `limit` most frequent meaningful terms of `text`.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    term_frequencies(text)
        .into_iter()
        .take(limit)
        .map(|(word, _)| word)
        .collect()
}

/// Pick the `count` sentences with the highest sum of keyword frequencies, in their original order.
///
/// Frequencies are counted over the whole of `text`.
pub fn summarize(text: &str, keywords: &[String], count: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.len() <= count {
        return sentences.join(" ");
    }

    let weights: HashMap<String, usize> = term_frequencies(text)
        .into_iter()
        .filter(|(word, _)| keywords.contains(word))
        .collect();

    let mut scored: Vec<(usize, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let score = terms(sentence)
                .iter()
                .filter_map(|word| weights.get(word.as_str()))
                .sum();
            (index, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let mut chosen: Vec<usize> = scored.into_iter().take(count).map(|(index, _)| index).collect();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .map(|index| sentences[index].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c == '\n' {
            push_sentence(&mut sentences, &mut current);
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
    current.clear();
}

fn terms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|word| word.chars().count() > 3)
        .filter(|word| !is_stop_word(word))
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .collect()
}

/// Check if a word is a common stop word
pub fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "about" | "after" | "again" | "also" | "been" | "before" | "being" | "between" |
        "both" | "could" | "does" | "doing" | "down" | "during" | "each" | "from" | "further" |
        "have" | "having" | "here" | "into" | "just" | "like" | "more" | "most" | "much" |
        "only" | "other" | "over" | "said" | "same" | "says" | "should" | "some" | "such" |
        "than" | "that" | "their" | "them" | "then" | "there" | "these" | "they" | "this" |
        "those" | "through" | "under" | "until" | "very" | "were" | "what" | "when" | "where" |
        "which" | "while" | "will" | "with" | "would" | "your" | "year" | "years"
    )
}
