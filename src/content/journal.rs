//! Journal document model.
//!
//! A journal is one long page: hero metadata plus a list of sections, each
//! holding photo cards. Cards carry either a single image or a gallery.
//! Documents are plain JSON; unknown fields are ignored so journals written
//! for newer builds still open.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_true() -> bool {
    true
}

/// One photo, by path. Relative paths are resolved against the journal
/// file's directory at load time. An empty path renders as placeholder art.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub path: PathBuf,
    #[serde(default)]
    pub alt: String,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            alt: String::new(),
        }
    }

    pub fn with_alt(path: impl Into<PathBuf>, alt: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alt: alt.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

/// What a card shows: one image, or a rotating gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Media {
    Single {
        #[serde(default)]
        image: ImageRef,
    },
    Gallery {
        #[serde(default)]
        images: Vec<ImageRef>,
        #[serde(default = "default_true")]
        arrows: bool,
        #[serde(default = "default_true")]
        dots: bool,
    },
}

impl Default for Media {
    fn default() -> Self {
        Media::Single {
            image: ImageRef::default(),
        }
    }
}

/// One photo card in a section grid.
///
/// The id is runtime-only: assigned fresh on every load, used to key
/// slideshow rotators and viewer sessions, never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media: Media,
}

impl Card {
    pub fn single(title: impl Into<String>, description: impl Into<String>, image: ImageRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            media: Media::Single { image },
        }
    }

    pub fn gallery(title: impl Into<String>, description: impl Into<String>, images: Vec<ImageRef>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            media: Media::Gallery {
                images,
                arrows: true,
                dots: true,
            },
        }
    }

    pub fn is_gallery(&self) -> bool {
        matches!(self.media, Media::Gallery { .. })
    }

    /// Images in display order. A single-image card yields one entry.
    pub fn images(&self) -> &[ImageRef] {
        match &self.media {
            Media::Single { image } => std::slice::from_ref(image),
            Media::Gallery { images, .. } => images,
        }
    }

    pub fn image_count(&self) -> usize {
        self.images().len()
    }

    pub fn image_at(&self, index: usize) -> Option<&ImageRef> {
        self.images().get(index)
    }
}

/// One themed stretch of the journal, navigable from the top bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// The whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Journal {
    /// Load a journal from a JSON file, resolving relative image paths
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Journal> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read journal: {}", path.display()))?;
        let mut journal: Journal = serde_json::from_str(&text)
            .with_context(|| format!("Invalid journal JSON: {}", path.display()))?;
        if let Some(dir) = path.parent() {
            journal.resolve_paths(dir);
        }
        Ok(journal)
    }

    /// Anchor relative, non-empty image paths to `dir`.
    pub fn resolve_paths(&mut self, dir: &Path) {
        fn resolve(image: &mut ImageRef, dir: &Path) {
            if !image.is_empty() && image.path.is_relative() {
                image.path = dir.join(&image.path);
            }
        }
        for section in &mut self.sections {
            for card in &mut section.cards {
                match &mut card.media {
                    Media::Single { image } => resolve(image, dir),
                    Media::Gallery { images, .. } => {
                        for image in images {
                            resolve(image, dir);
                        }
                    }
                }
            }
        }
    }

    pub fn card(&self, id: Uuid) -> Option<&Card> {
        self.sections
            .iter()
            .flat_map(|s| s.cards.iter())
            .find(|c| c.id == id)
    }

    /// Every image referenced by the document, for prefetching.
    pub fn all_images(&self) -> impl Iterator<Item = &ImageRef> {
        self.sections
            .iter()
            .flat_map(|s| s.cards.iter())
            .flat_map(|c| c.images().iter())
            .filter(|i| !i.is_empty())
    }

    pub fn max_cards_per_section(&self) -> usize {
        self.sections.iter().map(|s| s.cards.len()).max().unwrap_or(0)
    }

    /// Built-in demo journal, shown when no document is given.
    pub fn sample() -> Journal {
        Journal {
            title: "Chasing Islands".into(),
            subtitle: "Three weeks across the Philippine archipelago".into(),
            location: "Luzon, Philippines".into(),
            sections: vec![
                Section {
                    id: "islands".into(),
                    title: "Island Hopping".into(),
                    intro: "Bangkas, sandbars and the kind of blue that looks fake in photos."
                        .into(),
                    cards: vec![
                        Card::gallery(
                            "El Nido Lagoons",
                            "Kayaking the big lagoon at first light, before the tour boats arrive.",
                            vec![
                                ImageRef::with_alt("", "Limestone cliffs over the big lagoon"),
                                ImageRef::with_alt("", "Kayaks queued at the lagoon mouth"),
                                ImageRef::with_alt("", "Snorkelers over the coral shelf"),
                            ],
                        ),
                        Card::single(
                            "Crossing to Coron",
                            "Five hours of open water on the ferry, flying fish the whole way.",
                            ImageRef::with_alt("", "Ferry wake at sunset"),
                        ),
                        Card::gallery(
                            "Sandbar Day",
                            "A strip of white sand that only exists at low tide.",
                            vec![
                                ImageRef::with_alt("", "The sandbar from the boat"),
                                ImageRef::with_alt("", "Footprints down the spine of the bar"),
                            ],
                        ),
                    ],
                },
                Section {
                    id: "food".into(),
                    title: "Street Food".into(),
                    intro: "Everything on a stick, everything grilled, everything good.".into(),
                    cards: vec![
                        Card::gallery(
                            "Night Market Rounds",
                            "Isaw, kwek-kwek and halo-halo to finish. Repeat nightly.",
                            vec![
                                ImageRef::with_alt("", "Grill smoke over the market stalls"),
                                ImageRef::with_alt("", "Skewers stacked for the dinner rush"),
                                ImageRef::with_alt("", "Shaved ice and ube ice cream"),
                            ],
                        ),
                        Card::single(
                            "Silog Breakfasts",
                            "Garlic rice, fried egg and whichever meat the morning offers.",
                            ImageRef::with_alt("", "Tapsilog at a roadside carinderia"),
                        ),
                    ],
                },
                Section {
                    id: "tips".into(),
                    title: "Travel Notes".into(),
                    intro: "What I'd tell anyone doing this route.".into(),
                    cards: vec![
                        Card::single(
                            "Getting Around",
                            "Tricycles for towns, jeepneys for everything else. Cash only.",
                            ImageRef::with_alt("", "Jeepney in afternoon traffic"),
                        ),
                        Card::single(
                            "When to Go",
                            "December through May is dry season. Book the island ferries early.",
                            ImageRef::with_alt("", "Weather board at the pier"),
                        ),
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_fills_defaults() {
        let json = r#"{
            "title": "Trip",
            "sections": [
                {"id": "a", "title": "A", "cards": [{"title": "Card"}]}
            ]
        }"#;
        let journal: Journal = serde_json::from_str(json).unwrap();

        assert_eq!(journal.title, "Trip");
        assert_eq!(journal.subtitle, "");
        let card = &journal.sections[0].cards[0];
        assert_eq!(card.description, "");
        assert!(!card.is_gallery());
        assert_eq!(card.image_count(), 1);
        assert!(card.images()[0].is_empty());
    }

    #[test]
    fn test_gallery_flags_default_on() {
        let json = r#"{
            "sections": [{"id": "a", "title": "A", "cards": [
                {"title": "G", "media": {"type": "gallery", "images": [
                    {"path": "one.jpg"}, {"path": "two.jpg"}
                ]}}
            ]}]
        }"#;
        let journal: Journal = serde_json::from_str(json).unwrap();
        match &journal.sections[0].cards[0].media {
            Media::Gallery { images, arrows, dots } => {
                assert_eq!(images.len(), 2);
                assert!(*arrows);
                assert!(*dots);
            }
            _ => panic!("expected gallery"),
        }
    }

    #[test]
    fn test_gallery_flags_can_be_disabled() {
        let json = r#"{
            "sections": [{"id": "a", "title": "A", "cards": [
                {"title": "G", "media": {"type": "gallery", "images": [],
                 "arrows": false, "dots": false}}
            ]}]
        }"#;
        let journal: Journal = serde_json::from_str(json).unwrap();
        match &journal.sections[0].cards[0].media {
            Media::Gallery { arrows, dots, .. } => {
                assert!(!*arrows);
                assert!(!*dots);
            }
            _ => panic!("expected gallery"),
        }
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{
            "title": "Trip",
            "theme": "dark",
            "sections": [{"id": "a", "title": "A", "future_field": 1, "cards": []}]
        }"#;
        let journal: Journal = serde_json::from_str(json).unwrap();
        assert_eq!(journal.sections.len(), 1);
    }

    #[test]
    fn test_card_ids_are_fresh_per_load() {
        let json = r#"{
            "sections": [{"id": "a", "title": "A", "cards": [
                {"title": "One"}, {"title": "Two"}
            ]}]
        }"#;
        let journal: Journal = serde_json::from_str(json).unwrap();
        let a = journal.sections[0].cards[0].id;
        let b = journal.sections[0].cards[1].id;
        assert_ne!(a, b);

        let again: Journal = serde_json::from_str(json).unwrap();
        assert_ne!(again.sections[0].cards[0].id, a);
    }

    #[test]
    fn test_resolve_paths() {
        let mut journal = Journal {
            sections: vec![Section {
                id: "a".into(),
                title: "A".into(),
                intro: String::new(),
                cards: vec![
                    Card::single("S", "", ImageRef::new("photos/one.jpg")),
                    Card::gallery(
                        "G",
                        "",
                        vec![ImageRef::new("/abs/two.jpg"), ImageRef::new("")],
                    ),
                ],
            }],
            ..Journal::default()
        };
        journal.resolve_paths(Path::new("/trips/ph"));

        assert_eq!(
            journal.sections[0].cards[0].images()[0].path,
            PathBuf::from("/trips/ph/photos/one.jpg")
        );
        // Absolute and empty paths are left alone
        assert_eq!(
            journal.sections[0].cards[1].images()[0].path,
            PathBuf::from("/abs/two.jpg")
        );
        assert!(journal.sections[0].cards[1].images()[1].is_empty());
    }

    #[test]
    fn test_card_lookup_by_id() {
        let journal = Journal::sample();
        let target = journal.sections[1].cards[0].id;
        let found = journal.card(target).unwrap();
        assert_eq!(found.title, "Night Market Rounds");
        assert!(journal.card(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_all_images_skips_empty_paths() {
        let journal = Journal {
            sections: vec![Section {
                id: "a".into(),
                title: "A".into(),
                intro: String::new(),
                cards: vec![Card::gallery(
                    "G",
                    "",
                    vec![ImageRef::new("one.jpg"), ImageRef::new("")],
                )],
            }],
            ..Journal::default()
        };
        assert_eq!(journal.all_images().count(), 1);
    }

    #[test]
    fn test_sample_journal_is_coherent() {
        let journal = Journal::sample();
        assert!(!journal.sections.is_empty());
        assert!(journal.sections.iter().any(|s| s.cards.iter().any(|c| c.is_gallery())));

        let mut ids: Vec<&str> = journal.sections.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), journal.sections.len());
        assert_eq!(journal.max_cards_per_section(), 3);
    }
}
