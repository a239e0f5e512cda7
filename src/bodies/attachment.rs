use crate::bodies::Color;
use crate::math::Vector2;

/// What a visual attachment shows. The engine never interprets it; the
/// renderer resolves image sources and fonts.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentKind {
    /// A sprite loaded by the renderer from `source`
    Image {
        source: String,
    },

    /// A rendered text label
    Text {
        text: String,
        color: Color,
    },
}

/// A sprite or text label positioned in world space.
///
/// Attachments owned by a body follow its centroid every tick. Free-standing
/// attachments live in the scene and are swept once flagged removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    kind: AttachmentKind,
    position: Vector2,
    size: Vector2,
    removed: bool,
}

impl Attachment {
    /// Creates an image attachment
    pub fn image(source: impl Into<String>, position: Vector2, size: Vector2) -> Self {
        Self {
            kind: AttachmentKind::Image { source: source.into() },
            position,
            size,
            removed: false,
        }
    }

    /// Creates a text attachment
    pub fn text(text: impl Into<String>, color: Color, position: Vector2, size: Vector2) -> Self {
        Self {
            kind: AttachmentKind::Text { text: text.into(), color },
            position,
            size,
            removed: false,
        }
    }

    pub fn kind(&self) -> &AttachmentKind {
        &self.kind
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn size(&self) -> Vector2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vector2) {
        self.size = size;
    }

    /// Replaces the text of a label; image attachments are left untouched.
    /// Returns whether the text changed.
    pub fn set_text(&mut self, new_text: impl Into<String>) -> bool {
        match &mut self.kind {
            AttachmentKind::Text { text, .. } => {
                *text = new_text.into();
                true
            }
            AttachmentKind::Image { .. } => false,
        }
    }

    /// Flags the attachment so the renderer skips it and the scene drops it
    pub fn remove(&mut self) {
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}
