mod common;

use common::listing_page;
use kaiheartradio::{
    marketplace::extract_listings,
    types::{ExtractMode, SongListing},
};

fn two_day_page() -> String {
    listing_page(&[
        &[("Song A", "Artist X"), ("Song B", "Artist Y")],
        &[("Song C", "Artist Z")],
    ])
}

#[test]
fn test_latest_day_reads_first_section_only() {
    let songs = extract_listings(&two_day_page(), ExtractMode::LatestDay);

    assert_eq!(
        songs,
        vec![
            SongListing::new("Song A", "Artist X"),
            SongListing::new("Song B", "Artist Y"),
        ]
    );
}

#[test]
fn test_all_days_flattens_sections_in_page_order() {
    let songs = extract_listings(&two_day_page(), ExtractMode::AllDays);

    let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Song A", "Song B", "Song C"]);
}

#[test]
fn test_latest_day_is_prefix_of_all_days() {
    let page = two_day_page();
    let latest = extract_listings(&page, ExtractMode::LatestDay);
    let all = extract_listings(&page, ExtractMode::AllDays);

    assert!(latest.len() <= all.len());
    assert_eq!(&all[..latest.len()], latest.as_slice());
}

#[test]
fn test_store_links_are_filtered_by_class() {
    let songs = extract_listings(&two_day_page(), ExtractMode::AllDays);

    // the fixture puts a "Buy on Amazon" entry with class `last` in every day
    assert_eq!(songs.len(), 3);
    assert!(songs.iter().all(|s| s.title != "Buy on Amazon"));
}

#[test]
fn test_store_link_filter_does_not_look_at_text() {
    // a real song that happens to be called "Buy on Amazon" is kept
    let page = listing_page(&[&[("Buy on Amazon", "The Band")]]);
    let songs = extract_listings(&page, ExtractMode::LatestDay);

    assert_eq!(songs, vec![SongListing::new("Buy on Amazon", "The Band")]);
}

#[test]
fn test_whitespace_is_normalized() {
    let page = listing_page(&[&[("  Take   Five ", "\n Dave Brubeck\t")]]);
    let songs = extract_listings(&page, ExtractMode::LatestDay);

    assert_eq!(songs, vec![SongListing::new("Take Five", "Dave Brubeck")]);
}

#[test]
fn test_entries_without_artist_are_skipped() {
    let page = r#"
        <div class="episode-music">
          <div class="episode-music-group">
            <a class="episode-music-title">Lonely Title</a>
          </div>
          <div class="episode-music-group">
            <a class="episode-music-title">Complete</a>
            <div class="episode-music-artist">Someone</div>
          </div>
        </div>"#;

    let songs = extract_listings(page, ExtractMode::LatestDay);

    assert_eq!(songs, vec![SongListing::new("Complete", "Someone")]);
}

#[test]
fn test_pages_without_structure_yield_nothing() {
    for page in [
        "",
        "<html><body><p>Page not found</p></body></html>",
        "<div class=\"episode-music-group\"><a class=\"episode-music-title\">X</a></div>",
        "<<<not html",
    ] {
        assert!(extract_listings(page, ExtractMode::LatestDay).is_empty());
        assert!(extract_listings(page, ExtractMode::AllDays).is_empty());
    }
}

#[test]
fn test_empty_day_section() {
    let page = listing_page(&[&[], &[("Later", "Someone")]]);

    assert!(extract_listings(&page, ExtractMode::LatestDay).is_empty());
    assert_eq!(extract_listings(&page, ExtractMode::AllDays).len(), 1);
}
