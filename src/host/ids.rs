use std::fmt;

/// Opaque handle the host uses to find the rendered element for an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    /// `base` followed by the image's position in the gallery.
    pub fn for_index(base: &str, index: usize) -> Self {
        Self(format!("{base}{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplies a fresh base identifier for each gallery on a page.
pub trait IdSource {
    fn next_gallery_base(&mut self) -> String;
}

/// Deterministic counter: `_gallery0_`, `_gallery1_`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("gallery")
    }
}

impl IdSource for SequentialIds {
    fn next_gallery_base(&mut self) -> String {
        let base = format!("_{}{}_", self.prefix, self.next);
        self.next += 1;
        base
    }
}
