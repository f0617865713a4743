use axum::{extract::Query, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    domain::voice::{Language, VoiceCatalog, VoiceDescriptor},
    error::{AppError, AppResult},
};

const INVALID_LANGUAGE_MESSAGE: &str = "Invalid or missing language parameter";

/// One row of the fixed audio lookup table
#[derive(Debug, Clone, Serialize)]
pub struct AudioEntry {
    pub language: Language,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Response for GET /api/audio
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioUrlResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioQuery {
    pub language: Option<String>,
}

/// Serves the mock audio lookup API: a lookup table mapping each supported
/// language to one hosted clip, plus the voice catalog.
pub struct AudioController {
    entries: Vec<AudioEntry>,
    catalog: VoiceCatalog,
}

impl AudioController {
    pub fn new(entries: Vec<AudioEntry>, catalog: VoiceCatalog) -> Self {
        Self { entries, catalog }
    }

    /// Build the standard table: `{base}/english-audio.mp3` and friends,
    /// one entry per supported language.
    pub fn with_base_url(base_url: &str, catalog: VoiceCatalog) -> Self {
        let base = base_url.trim_end_matches('/');
        let now = Utc::now();
        let entries = Language::all()
            .iter()
            .map(|&language| AudioEntry {
                language,
                url: format!("{}/{}-audio.mp3", base, language),
                created_at: now,
            })
            .collect();
        Self::new(entries, catalog)
    }

    pub fn entries(&self) -> &[AudioEntry] {
        &self.entries
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// GET /api/audio?language={language} - Look up the clip URL for a language
    pub async fn lookup(
        State(controller): State<Arc<AudioController>>,
        Query(query): Query<AudioQuery>,
    ) -> AppResult<Json<AudioUrlResponse>> {
        let language = query
            .language
            .as_deref()
            .and_then(|raw| Language::from_str(raw).ok())
            .ok_or_else(|| AppError::BadRequest(INVALID_LANGUAGE_MESSAGE.to_string()))?;

        let entry = controller
            .entries
            .iter()
            .find(|e| e.language == language)
            .ok_or_else(|| AppError::BadRequest(INVALID_LANGUAGE_MESSAGE.to_string()))?;

        tracing::info!(language = %language, url = %entry.url, "Audio lookup");

        Ok(Json(AudioUrlResponse {
            url: entry.url.clone(),
        }))
    }

    /// GET /api/audio/all - List every known audio file
    pub async fn list(
        State(controller): State<Arc<AudioController>>,
    ) -> Json<Vec<AudioEntry>> {
        Json(controller.entries.clone())
    }

    /// GET /api/voices - The current voice catalog
    pub async fn voices(
        State(controller): State<Arc<AudioController>>,
    ) -> Json<Vec<VoiceDescriptor>> {
        Json(controller.catalog.voices().to_vec())
    }
}
