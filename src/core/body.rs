use std::collections::HashMap;

use glam::Vec2;

use crate::config::{DEFAULT_RESPONSE, DEFAULT_RESPONSE_KEY};
use crate::core::types::{CellCoord, Rect};
use crate::utils::allocator::BodyId;

/// A rectangle tracked by the world that collides with other rectangles.
///
/// A body owns its geometry and its per-tag response configuration. Grid
/// membership is bookkept by the world's broad-phase grid; the body only
/// carries the coordinates of the cells it currently occupies so removal and
/// relocation stay cheap.
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: BodyId,
    tag: String,
    rect: Rect,
    is_static: bool,
    responses: HashMap<String, String>,
    pub(crate) cells: Vec<CellCoord>,
}

impl Body {
    pub(crate) fn new(tag: String, rect: Rect) -> Self {
        let mut responses = HashMap::new();
        responses.insert(DEFAULT_RESPONSE_KEY.to_owned(), DEFAULT_RESPONSE.to_owned());
        Self {
            id: BodyId::default(),
            tag,
            rect,
            is_static: false,
            responses,
            cells: Vec::new(),
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Top-left corner of the body's rectangle.
    pub fn position(&self) -> Vec2 {
        self.rect.pos
    }

    pub fn size(&self) -> Vec2 {
        self.rect.size
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.rect.pos = position;
    }

    /// Static bodies participate in other bodies' sweeps and queries but are
    /// never swept themselves and ignore repositioning. Useful for walls and
    /// floors.
    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Replaces the whole response map. The map is keyed by the *other*
    /// body's tag; the reserved `"default"` entry is consulted when no tag
    /// matches. A body that should bounce off everything would set
    /// `{"default": "bounce"}`.
    pub fn set_responses(&mut self, responses: HashMap<String, String>) {
        self.responses = responses;
    }

    /// Sets the response name used against bodies carrying `tag`.
    pub fn set_response(&mut self, tag: impl Into<String>, response: impl Into<String>) {
        self.responses.insert(tag.into(), response.into());
    }

    pub fn responses(&self) -> &HashMap<String, String> {
        &self.responses
    }

    /// Response name for a collision against `tag`, falling back to the
    /// `"default"` entry. Returns the empty name when neither exists; the
    /// resolution loop skips collisions whose name is unregistered.
    pub fn response_for(&self, tag: &str) -> &str {
        self.responses
            .get(tag)
            .or_else(|| self.responses.get(DEFAULT_RESPONSE_KEY))
            .map_or("", String::as_str)
    }

    /// Whether this body's tag is one of `tags`. An empty list accepts every
    /// tag, so queries without a filter return all bodies.
    pub fn has_tag(&self, tags: &[&str]) -> bool {
        tags.is_empty() || tags.contains(&self.tag.as_str())
    }
}
