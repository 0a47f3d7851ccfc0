//! Pre-computed syntax token runs for a single line.
//!
//! Tokenization happens elsewhere; the renderer only consumes the end offset
//! and style class of each run.

/// One token run: characters up to (excluding) `end_index` share `class_name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineToken {
    pub end_index: usize,
    pub class_name: String,
}

impl LineToken {
    #[must_use]
    pub fn new(end_index: usize, class_name: impl Into<String>) -> Self {
        Self {
            end_index,
            class_name: class_name.into(),
        }
    }
}

/// Ordered token runs covering a line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineTokens {
    tokens: Vec<LineToken>,
}

impl LineTokens {
    #[must_use]
    pub fn new(tokens: Vec<LineToken>) -> Self {
        debug_assert!(
            tokens.windows(2).all(|w| w[0].end_index <= w[1].end_index),
            "token end offsets must be non-decreasing"
        );
        Self { tokens }
    }

    /// A single run of `class_name` covering `len` characters.
    #[must_use]
    pub fn single(len: usize, class_name: impl Into<String>) -> Self {
        Self {
            tokens: vec![LineToken::new(len, class_name)],
        }
    }

    /// Build from `(end_index, class_name)` pairs.
    #[must_use]
    pub fn from_ends<'a>(ends: impl IntoIterator<Item = (usize, &'a str)>) -> Self {
        Self::new(
            ends.into_iter()
                .map(|(end, class)| LineToken::new(end, class))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineToken> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineToken> {
        self.tokens.iter()
    }
}

impl FromIterator<LineToken> for LineTokens {
    fn from_iter<I: IntoIterator<Item = LineToken>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
