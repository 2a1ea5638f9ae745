use scraper::{ElementRef, Html, Selector};

use crate::models::match_event::RawMatch;

/// Pull fixture candidates out of a team schedule page.
///
/// The selector covers the two markup variants the site has shipped.
/// A candidate missing its date or either team label is skipped;
/// partial rows are normal upstream, not an error.
pub fn extract_raw_matches(page_body: &str) -> Vec<RawMatch> {
    let document = Html::parse_document(page_body);
    let item_selector = Selector::parse("div.match-item, li.match-item").unwrap();
    let date_selector = Selector::parse("span.date").unwrap();
    let team_a_selector = Selector::parse("p.team-a span").unwrap();
    let team_b_selector = Selector::parse("p.team-b span").unwrap();

    let mut matches = Vec::new();
    for item in document.select(&item_selector) {
        let raw_date = first_text(item, &date_selector);
        let team_a = first_text(item, &team_a_selector);
        let team_b = first_text(item, &team_b_selector);
        let (Some(raw_date), Some(team_a), Some(team_b)) = (raw_date, team_a, team_b) else {
            continue;
        };
        matches.push(RawMatch {
            team_a,
            team_b,
            raw_date,
        });
    }
    matches
}

fn first_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let node = item.select(selector).next()?;
    let text = node.text().collect::<String>().trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
