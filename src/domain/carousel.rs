use dashmap::DashMap;
use serde::Serialize;

/// Cyclic navigation state over a fixed-length image sequence.
///
/// A plain value: `next` and `previous` are total functions of the prior
/// state and never fail. A zero-length carousel has no current index and
/// navigating it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    length: usize,
    current: Option<usize>,
}

impl CarouselState {
    /// State for a sequence of `length` images, positioned at index 0, or
    /// the empty state when `length == 0`.
    pub fn new(length: usize) -> Self {
        CarouselState {
            length,
            current: (length > 0).then_some(0),
        }
    }

    /// State positioned at `index`, wrapped into `[0, length)`.
    pub fn at(length: usize, index: usize) -> Self {
        CarouselState {
            length,
            current: (length > 0).then(|| index % length),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Advances one step, wrapping from the last index back to 0.
    pub fn next(self) -> Self {
        match self.current {
            Some(index) => CarouselState {
                current: Some((index + 1) % self.length),
                ..self
            },
            None => self,
        }
    }

    /// Retreats one step, wrapping from index 0 to the last index.
    pub fn previous(self) -> Self {
        match self.current {
            Some(index) => CarouselState {
                current: Some((index + self.length - 1) % self.length),
                ..self
            },
            None => self,
        }
    }
}

/// Navigation block embedded in detail responses for server-rendered
/// surfaces: the focused index plus the index one step either way.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CarouselView {
    pub length: usize,
    pub current: Option<usize>,
    pub next: Option<usize>,
    pub previous: Option<usize>,
}

impl From<CarouselState> for CarouselView {
    fn from(state: CarouselState) -> Self {
        CarouselView {
            length: state.length(),
            current: state.current(),
            next: state.next().current(),
            previous: state.previous().current(),
        }
    }
}

/// Keyed hosting structure for list surfaces: one independent
/// `CarouselState` per displayed entity. Entries never share storage, so two
/// keys can be stepped concurrently without affecting each other.
#[derive(Debug, Default)]
pub struct CarouselRegistry {
    states: DashMap<String, CarouselState>,
}

impl CarouselRegistry {
    pub fn new() -> Self {
        CarouselRegistry {
            states: DashMap::new(),
        }
    }

    /// Returns the state for `id`, creating it at index 0 on first sight.
    /// A length change means the underlying image sequence was swapped, so
    /// the state resets to index 0.
    pub fn ensure(&self, id: &str, length: usize) -> CarouselState {
        let mut entry = self
            .states
            .entry(id.to_string())
            .or_insert_with(|| CarouselState::new(length));
        if entry.length() != length {
            *entry = CarouselState::new(length);
        }
        *entry
    }

    pub fn advance(&self, id: &str) -> Option<CarouselState> {
        self.states.get_mut(id).map(|mut entry| {
            *entry = entry.next();
            *entry
        })
    }

    pub fn retreat(&self, id: &str) -> Option<CarouselState> {
        self.states.get_mut(id).map(|mut entry| {
            *entry = entry.previous();
            *entry
        })
    }

    pub fn current(&self, id: &str) -> Option<CarouselState> {
        self.states.get(id).map(|entry| *entry)
    }

    /// Drops the state for an entity leaving view.
    pub fn remove(&self, id: &str) {
        self.states.remove(id);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
