// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use super::choice::Choice;
use super::ids::EntityId;

/// A candidate the similarity service proposed for one unmatched name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredChoice {
    choice: Choice,
    score: u8,
}

impl ScoredChoice {
    /// Scores are percentages; anything above 100 is clamped on the way in.
    pub fn new(choice: Choice, score: u8) -> Self {
        Self {
            choice,
            score: score.min(100),
        }
    }

    pub fn choice(&self) -> &Choice {
        &self.choice
    }

    pub fn score(&self) -> u8 {
        self.score
    }
}

/// One name the reconciler could not match, with the similarity service's
/// ranking kept verbatim (its order and scores are the service's verdict,
/// not ours to re-sort or threshold).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedItem {
    source_text: String,
    candidates: SmallVec<[ScoredChoice; 2]>,
}

impl UnresolvedItem {
    pub fn new(
        source_text: impl Into<String>,
        candidates: impl IntoIterator<Item = ScoredChoice>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            candidates: candidates.into_iter().collect(),
        }
    }

    pub fn without_candidates(source_text: impl Into<String>) -> Self {
        Self::new(source_text, [])
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn candidates(&self) -> &[ScoredChoice] {
        &self.candidates
    }

    pub fn top_candidate(&self) -> Option<&ScoredChoice> {
        self.candidates.first()
    }

    /// The resolution a session starts each item with: the top-scored
    /// candidate when the service proposed any, otherwise a creation from
    /// the text exactly as it arrived.
    pub fn default_resolution(&self) -> Resolution {
        match self.top_candidate() {
            Some(scored) => Resolution::UseExisting(scored.choice().value().clone()),
            None => Resolution::CreateNew(self.source_text.clone()),
        }
    }
}

/// How the user decided to handle one unresolved name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Select an already-known choice by value.
    UseExisting(EntityId),
    /// Create a new entity with this label, then select it.
    CreateNew(String),
    /// Drop the name entirely.
    Ignore,
}

#[cfg(test)]
mod tests {
    use super::{Resolution, ScoredChoice, UnresolvedItem};
    use crate::model::{Choice, EntityId};

    fn scored(value: &str, label: &str, score: u8) -> ScoredChoice {
        let id = EntityId::new(value).expect("entity id");
        ScoredChoice::new(Choice::new(id, label), score)
    }

    #[test]
    fn score_is_clamped_to_percentage() {
        assert_eq!(scored("1", "x", 250).score(), 100);
        assert_eq!(scored("1", "x", 83).score(), 83);
    }

    #[test]
    fn default_resolution_prefers_top_candidate() {
        let item = UnresolvedItem::new(
            "Tolkein",
            [scored("7", "J.R.R. Tolkien", 91), scored("9", "Tolkien Society", 74)],
        );
        assert_eq!(
            item.default_resolution(),
            Resolution::UseExisting(EntityId::new("7").expect("entity id"))
        );
    }

    #[test]
    fn default_resolution_falls_back_to_create_new() {
        let item = UnresolvedItem::without_candidates("Brand-new Author");
        assert_eq!(
            item.default_resolution(),
            Resolution::CreateNew("Brand-new Author".to_owned())
        );
    }

    #[test]
    fn candidates_keep_service_order() {
        let item = UnresolvedItem::new(
            "history",
            [scored("2", "History", 95), scored("3", "Art History", 78)],
        );
        let labels: Vec<_> = item.candidates().iter().map(|c| c.choice().label()).collect();
        assert_eq!(labels, ["History", "Art History"]);
    }
}
