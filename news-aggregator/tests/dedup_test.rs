use news_aggregator::dedup::dedupe;
use news_aggregator::{Article, Category};

fn article(title: &str) -> Article {
    Article::new(title, format!("https://example.com/{}", title.len()), "Test", Category::General, "p")
}

fn titles(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.title.as_str()).collect()
}

// 25 characters, contained in the 30 character title below
const SHORTER: &str = "Stocks rally on rate news";
const LONGER: &str = "Stocks rally on rate news, too";

#[test]
fn test_fixture_lengths() {
    assert_eq!(SHORTER.chars().count(), 25);
    assert_eq!(LONGER.chars().count(), 30);
}

#[test]
fn test_first_seen_wins() {
    let kept = dedupe(vec![article(SHORTER), article(LONGER)]);
    assert_eq!(titles(&kept), vec![SHORTER]);

    let kept = dedupe(vec![article(LONGER), article(SHORTER)]);
    assert_eq!(titles(&kept), vec![LONGER]);
}

#[test]
fn test_short_titles_are_exempt() {
    let kept = dedupe(vec![article("Breaking!!"), article("Breaking!!")]);
    assert_eq!(kept.len(), 2);
}

#[test]
fn test_comparison_is_case_insensitive() {
    let kept = dedupe(vec![article(LONGER), article(&SHORTER.to_uppercase())]);
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_dedupe_is_idempotent() {
    let input = vec![
        article(LONGER),
        article("Completely different headline here"),
        article(SHORTER),
        article("Tiny"),
        article("Tiny"),
    ];
    let once = dedupe(input);
    let twice = dedupe(once.clone());
    assert_eq!(once, twice);
    assert_eq!(once.len(), 4);
}

#[test]
fn test_compares_against_kept_titles_only() {
    // B is dropped because of A; C only resembles B, so it survives
    let a = "Election results announced tonight";
    let b = "Election results announced";
    let c = "Key Election results announced by officials";
    let kept = dedupe(vec![article(a), article(b), article(c)]);
    assert_eq!(titles(&kept), vec![a, c]);
}
