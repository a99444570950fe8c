use crate::card::{CardId, CardRecord, CardTuning};
use crate::error::CardError;
use crate::polaroid::PolaroidLayout;
use rand::Rng;

/// Owns every card for the lifetime of the scene. Cards are only appended,
/// never removed, so a `CardId` stays valid forever.
///
/// At most one card is expanded at a time.
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<CardRecord>,
    tuning: CardTuning,
}

impl CardRegistry {
    pub fn new(tuning: CardTuning) -> Self {
        Self {
            cards: Vec::new(),
            tuning,
        }
    }

    pub fn tuning(&self) -> &CardTuning {
        &self.tuning
    }

    /// Create a card for a photo of the given pixel size.
    pub fn create<R: Rng + ?Sized>(
        &mut self,
        photo_width: u32,
        photo_height: u32,
        rng: &mut R,
    ) -> Result<CardId, CardError> {
        let layout = PolaroidLayout::for_photo(photo_width, photo_height)?;
        let id = CardId(self.cards.len());
        let placed: Vec<_> = self.cards.iter().map(|c| c.detached).collect();
        let card = CardRecord::new(id, layout.base_scale(), &placed, &self.tuning, rng);
        if card.placement_exhausted {
            log::debug!(
                "[cards] card {} found no free slot, pushed back to z={:.1}",
                id.0,
                card.detached.z
            );
        }
        self.cards.push(card);
        Ok(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&CardRecord> {
        self.cards.get(id.0)
    }

    /// Mutable access to one card. The expanded flag stays private to the
    /// registry.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut CardRecord> {
        self.cards.get_mut(id.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CardRecord> {
        self.cards.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, CardRecord> {
        self.cards.iter_mut()
    }

    pub fn expanded(&self) -> Option<CardId> {
        self.cards.iter().find(|c| c.expanded()).map(|c| c.id)
    }

    /// Expand `id`, or collapse it if it is already expanded. Expanding a card
    /// collapses whichever card was expanded before. Returns the new state of
    /// `id`, or `None` for an unknown id.
    pub fn toggle_expanded(&mut self, id: CardId) -> Option<bool> {
        let was_expanded = self.cards.get(id.0)?.expanded();
        if was_expanded {
            self.cards[id.0].set_expanded(false);
            return Some(false);
        }
        self.collapse_all();
        self.cards[id.0].set_expanded(true);
        Some(true)
    }

    /// Collapse every card. Returns whether one was expanded.
    pub fn collapse_all(&mut self) -> bool {
        let mut had_expanded = false;
        for card in &mut self.cards {
            if card.expanded() {
                card.set_expanded(false);
                had_expanded = true;
            }
        }
        had_expanded
    }
}

impl<'a> IntoIterator for &'a CardRegistry {
    type Item = &'a CardRecord;
    type IntoIter = std::slice::Iter<'a, CardRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
