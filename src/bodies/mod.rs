mod attachment;
mod body;
mod color;

pub use self::attachment::{Attachment, AttachmentKind};
pub use self::body::{Body, ATTACHMENT_SCALE, INFINITE_MASS};
pub use self::color::Color;
