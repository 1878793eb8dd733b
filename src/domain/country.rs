use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 256;

/// Free-text country as typed by the subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country(String);

impl Country {
    pub fn parse(s: &str) -> Result<Country, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("country is empty.".into());
        }
        if trimmed.graphemes(true).count() > MAX_GRAPHEMES {
            return Err(format!("country is longer than {MAX_GRAPHEMES} characters."));
        }

        Ok(Self(trimmed.into()))
    }
}

impl AsRef<str> for Country {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
