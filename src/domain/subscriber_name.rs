use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 256;
const FORBIDDEN_CHARACTERS: [char; 9] = ['/', '(', ')', '{', '}', '"', '<', '>', '\\'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberName(String);

impl SubscriberName {
    /// Accepts any non-blank name of at most 256 graphemes that carries none
    /// of the markup-like characters in [`FORBIDDEN_CHARACTERS`].
    pub fn parse(s: &str) -> Result<SubscriberName, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("subscriber name is empty.".into());
        }
        if trimmed.graphemes(true).count() > MAX_GRAPHEMES {
            return Err(format!(
                "subscriber name is longer than {MAX_GRAPHEMES} characters."
            ));
        }
        if trimmed.chars().any(|c| FORBIDDEN_CHARACTERS.contains(&c)) {
            return Err(format!("`{trimmed}` contains forbidden characters."));
        }

        Ok(Self(trimmed.into()))
    }
}

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
