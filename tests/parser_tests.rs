use paperscout::parser::parse_arxiv_feed;

fn kw(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn entry(id: &str, title: &str, summary: &str, published: &str, authors: &[&str]) -> String {
    let authors = authors
        .iter()
        .map(|name| format!("<author><name>{name}</name></author>"))
        .collect::<String>();
    format!(
        r#"<entry>
    <id>{id}</id>
    <updated>{published}</updated>
    <published>{published}</published>
    <title>{title}</title>
    <summary>{summary}</summary>
    {authors}
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
    <link href="{id}" rel="alternate" type="text/html"/>
  </entry>"#
    )
}

fn feed(entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: search_query=all:neural</title>
  <id>http://arxiv.org/api/feedid</id>
  <updated>2024-05-01T00:00:00-04:00</updated>
  {}
</feed>"#,
        entries.join("\n  ")
    )
}

fn valid_entry(n: usize) -> String {
    entry(
        &format!("http://arxiv.org/abs/2401.0000{n}v1"),
        &format!("Neural Architecture Study Number {n}"),
        "We investigate neural network architectures for classification benchmarks.",
        "2024-01-15T12:00:00Z",
        &["Alice Smith", "Bob Jones"],
    )
}

#[test]
fn test_parses_well_formed_feed() {
    let xml = feed(&[valid_entry(1), valid_entry(2)]);
    let records = parse_arxiv_feed(&xml, &kw(&["neural", "network"])).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.title, "Neural Architecture Study Number 1");
    assert_eq!(first.authors, "Alice Smith, Bob Jones");
    assert_eq!(first.year, 2024);
    assert_eq!(first.source_url, "http://arxiv.org/abs/2401.00001v1");
    assert_eq!(first.source_name, "arXiv");
    assert!(first.abstract_snippet.ends_with("..."));
}

#[test]
fn test_never_more_than_five_records() {
    let entries: Vec<String> = (0..8).map(valid_entry).collect();
    let records = parse_arxiv_feed(&feed(&entries), &kw(&["neural"])).unwrap();
    assert_eq!(records.len(), 5);
}

#[test]
fn test_entry_missing_summary_dropped_rest_kept() {
    let mut entries: Vec<String> = (0..4).map(valid_entry).collect();
    entries.insert(
        2,
        entry(
            "http://arxiv.org/abs/2401.09999v1",
            "No Summary Here",
            "",
            "2024-01-15T12:00:00Z",
            &["Carol White"],
        ),
    );
    let records = parse_arxiv_feed(&feed(&entries), &kw(&["neural"])).unwrap();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.title != "No Summary Here"));
}

#[test]
fn test_entry_with_bad_date_dropped_rest_kept() {
    let entries = vec![
        valid_entry(1),
        entry(
            "http://arxiv.org/abs/2401.08888v1",
            "Bad Date",
            "A summary that is perfectly fine otherwise.",
            "January 2024",
            &["Dan Black"],
        ),
        valid_entry(2),
    ];
    let records = parse_arxiv_feed(&feed(&entries), &kw(&["neural"])).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_every_record_has_required_fields() {
    let entries: Vec<String> = (0..5).map(valid_entry).collect();
    let records = parse_arxiv_feed(&feed(&entries), &kw(&["neural"])).unwrap();
    for record in &records {
        assert!(!record.title.is_empty());
        assert!(!record.abstract_snippet.is_empty());
        assert!(!record.source_url.is_empty());
        assert!((0.0..=1.0).contains(&record.relevance_score));
        assert!(record.citation_count < 200);
    }
}

#[test]
fn test_author_overflow_gets_et_al_marker() {
    let xml = feed(&[entry(
        "http://arxiv.org/abs/2401.00042v1",
        "Many Hands",
        "A collaboration across many institutions studying neural scaling.",
        "2023-06-01T00:00:00Z",
        &["A One", "B Two", "C Three", "D Four", "E Five"],
    )]);
    let records = parse_arxiv_feed(&xml, &kw(&["neural"])).unwrap();
    assert_eq!(records[0].authors, "A One, B Two, C Three et al.");
}

#[test]
fn test_three_or_fewer_authors_no_marker() {
    let xml = feed(&[valid_entry(1)]);
    let records = parse_arxiv_feed(&xml, &kw(&["neural"])).unwrap();
    assert!(!records[0].authors.contains("et al."));
}

#[test]
fn test_no_authors_is_unknown() {
    let xml = feed(&[entry(
        "http://arxiv.org/abs/2401.00007v1",
        "Anonymous Work",
        "A summary for an entry that lists no authors at all.",
        "2022-03-01T00:00:00Z",
        &[],
    )]);
    let records = parse_arxiv_feed(&xml, &kw(&["summary"])).unwrap();
    assert_eq!(records[0].authors, "Unknown");
}

#[test]
fn test_snippet_bounded() {
    let long_summary = "neural ".repeat(100);
    let xml = feed(&[entry(
        "http://arxiv.org/abs/2401.00011v1",
        "Long Abstract",
        &long_summary,
        "2024-02-01T00:00:00Z",
        &["E Long"],
    )]);
    let records = parse_arxiv_feed(&xml, &kw(&["neural"])).unwrap();
    // 200 chars plus the ellipsis
    assert_eq!(records[0].abstract_snippet.chars().count(), 203);
}

#[test]
fn test_citation_count_stable_across_parses() {
    let xml = feed(&[valid_entry(3)]);
    let first = parse_arxiv_feed(&xml, &kw(&["neural"])).unwrap();
    let second = parse_arxiv_feed(&xml, &kw(&["neural"])).unwrap();
    assert_eq!(first[0].citation_count, second[0].citation_count);
}

#[test]
fn test_entities_unescaped() {
    let xml = feed(&[entry(
        "http://arxiv.org/abs/2401.00021v1",
        "Bounds &amp; Limits",
        "On bounds &amp; limits of estimation under noise assumptions.",
        "2024-03-01T00:00:00Z",
        &["F Noise"],
    )]);
    let records = parse_arxiv_feed(&xml, &kw(&["bounds"])).unwrap();
    assert_eq!(records[0].title, "Bounds & Limits");
}

#[test]
fn test_non_xml_body_yields_no_records() {
    let records = parse_arxiv_feed("service unavailable", &kw(&["neural"])).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_empty_feed_yields_no_records() {
    let records = parse_arxiv_feed(&feed(&[]), &kw(&["neural"])).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_relevance_reflects_keyword_hits() {
    let xml = feed(&[
        entry(
            "http://arxiv.org/abs/2401.00031v1",
            "Unrelated Botany Fieldwork",
            "Seasonal growth observations of alpine flora over a decade.",
            "2024-04-01T00:00:00Z",
            &["G Plant"],
        ),
        valid_entry(1),
    ]);
    let records = parse_arxiv_feed(&xml, &kw(&["neural", "classification"])).unwrap();
    let botany = records
        .iter()
        .find(|r| r.title.contains("Botany"))
        .unwrap();
    let neural = records
        .iter()
        .find(|r| r.title.contains("Neural"))
        .unwrap();
    assert_eq!(botany.relevance_score, 0.0);
    assert!(neural.relevance_score > 0.0);
}
