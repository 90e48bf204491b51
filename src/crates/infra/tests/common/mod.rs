#![allow(dead_code)]

use application::command::stage_records::RecordStager;
use infra::{JsonRecordReader, LocalSourceCatalog};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

/// One source file worth of fields.
#[derive(Debug, Clone)]
pub struct Track {
    pub artist: Option<&'static str>,
    pub location: Option<&'static str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub title: &'static str,
    pub release: Option<&'static str>,
    pub year: i64,
}

impl Track {
    pub fn by(artist: &'static str) -> Self {
        Self {
            artist: Some(artist),
            location: None,
            latitude: None,
            longitude: None,
            title: "Untitled",
            release: None,
            year: 0,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            artist: None,
            ..Self::by("")
        }
    }

    pub fn at(mut self, location: &'static str, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        self.location = Some(location);
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn song(mut self, title: &'static str, release: &'static str) -> Self {
        self.title = title;
        self.release = Some(release);
        self
    }

    /// 数据集里的字符串字段缺失时是空字节串
    pub fn to_json(&self) -> Value {
        json!({
            "artist_name": [self.artist.unwrap_or("")],
            "artist_location": [self.location.unwrap_or("")],
            "artist_latitude": [self.latitude],
            "artist_longitude": [self.longitude],
            "title": [self.title],
            "year": [self.year],
            "danceability": [0.0],
            "duration": [218.93],
            "end_of_fade_in": [0.247],
            "start_of_fade_out": [218.932],
            "loudness": [-11.197],
            "tempo": [92.198],
            "release": [self.release.unwrap_or("")],
        })
    }
}

/// Writes one file per track under `root/A/<n>/`.
pub fn write_tracks(root: &Path, tracks: &[Track]) {
    for (i, track) in tracks.iter().enumerate() {
        let dir = root.join("A").join(format!("{}", i % 3));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("TR{:04}.json", i));
        std::fs::write(path, track.to_json().to_string()).unwrap();
    }
}

pub fn write_raw(root: &Path, name: &str, content: &str) {
    std::fs::write(root.join(name), content).unwrap();
}

pub fn stager(root: &Path) -> RecordStager {
    RecordStager::new(
        Arc::new(LocalSourceCatalog::new(root, "json")),
        Arc::new(JsonRecordReader::new()),
    )
}
