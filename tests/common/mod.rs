#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use kaiheartradio::{
    Res, marketplace::PageSource, spotify::SpotifyApi, types::SongListing,
};

pub const BASE_URL: &str = "https://www.marketplace.org/latest-music";

// Builds a listing page: one day-section per slice, each song followed by a
// store link entry like the live site has.
pub fn listing_page(days: &[&[(&str, &str)]]) -> String {
    let mut html = String::from("<html><body><div class=\"content\">");
    for day in days {
        html.push_str("<div class=\"episode-music\">");
        html.push_str("<h3 class=\"episode-music-date\">Monday</h3>");
        for (title, artist) in day.iter() {
            html.push_str(&format!(
                "<div class=\"episode-music-group\">\
                   <a class=\"episode-music-title\" href=\"/song\">\n  {title}\n</a>\
                   <div class=\"episode-music-artist\">{artist}</div>\
                 </div>"
            ));
        }
        html.push_str(
            "<div class=\"episode-music-group last\">\
               <a class=\"episode-music-title\" href=\"https://amazon.com\">Buy on Amazon</a>\
               <div class=\"episode-music-artist\">Marketplace</div>\
             </div>",
        );
        html.push_str("</div>");
    }
    html.push_str("</div></body></html>");
    html
}

/// In-memory pages keyed by URL. Unknown URLs behave like a failed fetch.
pub struct FakePages {
    pub base_url: String,
    pub pages: HashMap<String, String>,
    pub requested: Mutex<Vec<String>>,
}

impl FakePages {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            pages: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageSource for FakePages {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, url: &str) -> String {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().unwrap_or_default()
    }
}

/// A playlist kept in memory, with a fixed search index.
pub struct FakeSpotify {
    pub matches: HashMap<(String, String), String>,
    pub playlist: Vec<String>,
    pub head_fails: bool,
    pub searched: Vec<SongListing>,
    pub head_requests: Vec<usize>,
    pub add_calls: Vec<(Vec<String>, usize)>,
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self {
            matches: HashMap::new(),
            playlist: Vec::new(),
            head_fails: false,
            searched: Vec::new(),
            head_requests: Vec::new(),
            add_calls: Vec::new(),
        }
    }

    pub fn with_match(mut self, title: &str, artist: &str, track_id: &str) -> Self {
        self.matches
            .insert((title.to_string(), artist.to_string()), track_id.to_string());
        self
    }

    pub fn with_playlist(mut self, track_ids: &[&str]) -> Self {
        self.playlist = track_ids.iter().map(|id| id.to_string()).collect();
        self
    }
}

impl SpotifyApi for FakeSpotify {
    async fn search_track(&mut self, song: &SongListing) -> Option<String> {
        self.searched.push(song.clone());
        self.matches
            .get(&(song.title.clone(), song.artist.clone()))
            .cloned()
    }

    async fn playlist_head(&mut self, limit: usize) -> Res<Vec<String>> {
        self.head_requests.push(limit);
        if self.head_fails {
            return Err("playlist unavailable".into());
        }
        Ok(self.playlist.iter().take(limit).cloned().collect())
    }

    async fn add_tracks(&mut self, track_ids: &[String], position: usize) -> Res<()> {
        self.add_calls.push((track_ids.to_vec(), position));
        let position = position.min(self.playlist.len());
        for (offset, id) in track_ids.iter().enumerate() {
            self.playlist.insert(position + offset, id.clone());
        }
        Ok(())
    }
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
