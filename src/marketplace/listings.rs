use scraper::{ElementRef, Html, Selector};

use crate::{
    debug,
    types::{ExtractMode, SongListing},
    utils,
};

const DAY_SELECTOR: &str = "div.episode-music";
const ENTRY_SELECTOR: &str = "div.episode-music-group";
const TITLE_SELECTOR: &str = "a.episode-music-title";
const ARTIST_SELECTOR: &str = "div.episode-music-artist";

// Entries carrying this class link out to a music store instead of naming a song.
const STORE_LINK_CLASS: &str = "last";

struct Selectors {
    day: Selector,
    entry: Selector,
    title: Selector,
    artist: Selector,
}

impl Selectors {
    fn new() -> Option<Self> {
        Some(Self {
            day: Selector::parse(DAY_SELECTOR).ok()?,
            entry: Selector::parse(ENTRY_SELECTOR).ok()?,
            title: Selector::parse(TITLE_SELECTOR).ok()?,
            artist: Selector::parse(ARTIST_SELECTOR).ok()?,
        })
    }
}

/// Extracts the song listings of a Marketplace page, in page order.
///
/// The page is a sequence of day-sections (`div.episode-music`), newest
/// first, each holding song entries (`div.episode-music-group`). Entries that
/// also carry the `last` class are store links and are skipped. With
/// [`ExtractMode::LatestDay`] only the first day-section is read.
///
/// Markup without day-sections yields an empty list.
pub fn extract_listings(html: &str, mode: ExtractMode) -> Vec<SongListing> {
    let Some(selectors) = Selectors::new() else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let days = document.select(&selectors.day);
    let days: Vec<ElementRef> = match mode {
        ExtractMode::LatestDay => days.take(1).collect(),
        ExtractMode::AllDays => days.collect(),
    };

    if days.is_empty() {
        debug!("No day-sections found on page");
        return Vec::new();
    }

    let mut results = Vec::new();
    for day in days {
        for entry in day.select(&selectors.entry).filter(is_song_entry) {
            match parse_entry(&entry, &selectors) {
                Some(song) => {
                    debug!("found song {} by {}", song.title, song.artist);
                    results.push(song);
                }
                None => debug!("skipping entry without title or artist"),
            }
        }
    }
    results
}

fn is_song_entry(entry: &ElementRef) -> bool {
    !entry.value().classes().any(|class| class == STORE_LINK_CLASS)
}

fn parse_entry(entry: &ElementRef, selectors: &Selectors) -> Option<SongListing> {
    let title = first_text(entry, &selectors.title)?;
    let artist = first_text(entry, &selectors.artist)?;
    Some(SongListing { title, artist })
}

fn first_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    let text = element
        .select(selector)
        .next()?
        .text()
        .collect::<String>();
    let text = utils::normalize_whitespace(&text);
    if text.is_empty() { None } else { Some(text) }
}
