use std::{
    path::Path,
    sync::{Arc, LazyLock},
};

use regex::Regex;
use tracing::info;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::{
    models::DocumentChunk,
    ports::outbound::{DocumentIndex, Embedder},
    DocumentError,
};

/// Sentences grouped into one stored chunk.
pub const SENTENCES_PER_CHUNK: usize = 20;

const TEXT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Splits uploaded text documents into chunks and stores them for chat context.
pub struct DocumentService {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn DocumentIndex>,
}

impl DocumentService {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn DocumentIndex>) -> Self {
        Self { embedder, index }
    }

    /// Chunk, embed and store one uploaded file. Returns the number of chunks stored.
    ///
    /// Nothing is written unless every chunk embeds successfully.
    pub async fn ingest(&self, file_name: &str, contents: &[u8]) -> Result<usize, DocumentError> {
        ensure_text_file(file_name)?;

        let text = String::from_utf8_lossy(contents);
        let chunks = chunk_sentences(&clean_text(&text), SENTENCES_PER_CHUNK);
        if chunks.is_empty() {
            return Err(DocumentError::Empty);
        }

        let mut points = Vec::with_capacity(chunks.len());
        for (chunk_id, text) in (0u32..).zip(chunks) {
            let vector = self.embedder.embed(&text).await?;
            points.push((
                DocumentChunk {
                    file_name: file_name.to_string(),
                    chunk_id,
                    text,
                },
                vector,
            ));
        }

        let inserted = self.index.upsert_chunks(points).await?;
        info!(file_name, inserted, "Stored document chunks");
        Ok(inserted)
    }
}

fn ensure_text_file(file_name: &str) -> Result<(), DocumentError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else if extension.is_empty() {
        Err(DocumentError::UnsupportedType(file_name.to_string()))
    } else {
        Err(DocumentError::UnsupportedType(format!(".{extension}")))
    }
}

static PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:\d+$|page\s+\d+)").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Drop page-number lines and `Page N` headers, and collapse runs of blanks.
pub fn clean_text(text: &str) -> String {
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !PAGE_MARKER.is_match(line))
        .map(|line| WHITESPACE.replace_all(line, " "))
        .collect::<Vec<_>>()
        .join("\n");

    BLANK_RUN.replace_all(joined.trim(), "\n\n").into_owned()
}

/// Split `text` on Unicode sentence boundaries and join every `per_chunk`
/// sentences into one chunk.
pub fn chunk_sentences(text: &str, per_chunk: usize) -> Vec<String> {
    let per_chunk = per_chunk.max(1);
    split_sentences(text)
        .chunks(per_chunk)
        .map(|sentences| sentences.join(" "))
        .collect()
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}
