//! Pagination state of one browsing session.
//!
//! `Idle → Loading → {Idle, Exhausted}`. A failed fetch returns to `Idle` on
//! the same page, a successful one advances the page and either returns to
//! `Idle` or, when the server reported no further pages, moves to `Exhausted`.
//! Only `reset` leaves `Exhausted`.

/// First page of every session.
pub const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// Ready to fetch `page`.
    Idle { page: u32 },
    /// A fetch for `page` is in flight.
    Loading { page: u32 },
    /// Every page up to `next_page - 1` has been delivered.
    Exhausted { next_page: u32 },
}

impl Default for LoaderState {
    fn default() -> Self {
        Self::Idle { page: FIRST_PAGE }
    }
}

impl LoaderState {
    /// Page the next (or current) fetch targets.
    pub fn current_page(&self) -> u32 {
        match *self {
            Self::Idle { page } | Self::Loading { page } => page,
            Self::Exhausted { next_page } => next_page,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn all_loaded(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Moves `Idle` to `Loading` and returns the page to fetch.
    /// Any other state rejects the attempt.
    pub(crate) fn begin(&mut self) -> Option<u32> {
        match *self {
            Self::Idle { page } => {
                *self = Self::Loading { page };
                Some(page)
            }
            Self::Loading { .. } | Self::Exhausted { .. } => None,
        }
    }

    /// Settles a successful fetch. Returns true when this fetch exhausted the
    /// collection.
    pub(crate) fn succeed(&mut self, last_page: u32) -> bool {
        let Self::Loading { page } = *self else {
            return false;
        };
        let next_page = page.saturating_add(1);
        if next_page > last_page {
            *self = Self::Exhausted { next_page };
            true
        } else {
            *self = Self::Idle { page: next_page };
            false
        }
    }

    /// Settles a failed fetch; the same page is retried next time.
    pub(crate) fn fail(&mut self) {
        if let Self::Loading { page } = *self {
            *self = Self::Idle { page };
        }
    }
}
