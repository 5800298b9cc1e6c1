/// the resource kind the remote blob store needs in order to delete an object.
/// The store files uploads under different namespaces depending on what it
/// detected at upload time, so a delete has to name the right one
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ResourceKind {
    Image,
    Video,
    /// generic binary; anything that isn't a known image or video format
    Raw,
}

impl From<&str> for ResourceKind {
    fn from(format: &str) -> Self {
        match format.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => Self::Image,
            "mp4" | "mov" | "avi" | "webm" => Self::Video,
            _ => Self::Raw,
        }
    }
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Raw => "raw",
        }
    }
}
