use footballCal::scrape::extractor::extract_raw_matches;

const PAGE_BOTH_VARIANTS: &str = r#"
<html><body>
<div class="match-item">
  <span class="date">08-20 19:35</span>
  <p class="team-a"><span>上海申花</span></p>
  <p class="team-b"><span>山东泰山</span></p>
</div>
<li class="match-item">
  <span class="date">08-10 15:30</span>
  <p class="team-a"><span>上海申花</span></p>
  <p class="team-b"><span>北京国安</span></p>
</li>
</body></html>
"#;

#[test]
fn extracts_fixtures_from_both_markup_variants() {
    let matches = extract_raw_matches(PAGE_BOTH_VARIANTS);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].team_a, "上海申花");
    assert_eq!(matches[0].team_b, "山东泰山");
    assert_eq!(matches[1].team_b, "北京国安");
}

#[test]
fn output_follows_document_order_not_kickoff_order() {
    // The later kickoff appears first in the markup and stays first here;
    // chronological ordering is the resolver's caller's job.
    let matches = extract_raw_matches(PAGE_BOTH_VARIANTS);
    assert_eq!(matches[0].raw_date, "08-20 19:35");
    assert_eq!(matches[1].raw_date, "08-10 15:30");
}

#[test]
fn candidates_missing_any_required_field_are_skipped() {
    let page = r#"
    <div class="match-item">
      <p class="team-a"><span>无日期队</span></p>
      <p class="team-b"><span>对手</span></p>
    </div>
    <div class="match-item">
      <span class="date">08-11 19:00</span>
      <p class="team-a"><span>  </span></p>
      <p class="team-b"><span>对手</span></p>
    </div>
    <div class="match-item">
      <span class="date">08-12 19:00</span>
      <p class="team-a"><span>完整队</span></p>
      <p class="team-b"><span>对手</span></p>
    </div>
    "#;
    let matches = extract_raw_matches(page);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].team_a, "完整队");
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let page = r#"
    <div class="match-item">
      <span class="date">
        08-12 19:00
      </span>
      <p class="team-a"><span> 申花 </span></p>
      <p class="team-b"><span> 泰山 </span></p>
    </div>
    "#;
    let matches = extract_raw_matches(page);
    assert_eq!(matches[0].raw_date, "08-12 19:00");
    assert_eq!(matches[0].team_a, "申花");
}

#[test]
fn pages_without_fixture_markup_yield_nothing() {
    assert!(extract_raw_matches("<html><body><h1>404</h1></body></html>").is_empty());
    assert!(extract_raw_matches("").is_empty());
}
