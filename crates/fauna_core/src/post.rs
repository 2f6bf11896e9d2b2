//! Platform-neutral animal post.

use serde::{Deserialize, Serialize};

/// Footer shown on every post.
pub const FOOTER: &str = "AnimalVerse 🐾";

/// An image post ready for a platform adapter to render.
///
/// # Examples
///
/// ```
/// use fauna_core::AnimalPost;
///
/// let post = AnimalPost::builder()
///     .animal("cat")
///     .title("🐾 Cat")
///     .image_url("http://x/cat1.png")
///     .fact("Cats can rotate their ears independently!")
///     .build()
///     .unwrap();
///
/// assert_eq!(post.footer(), "AnimalVerse 🐾");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct AnimalPost {
    /// Category the image was resolved for
    animal: String,
    /// Headline, e.g. "🐾 Daily Animal - Owl"
    title: String,
    /// Resolved image URL
    image_url: String,
    /// Fun fact shown under the image
    fact: String,
    /// Footer line
    #[builder(default = "FOOTER.to_string()")]
    footer: String,
}

impl AnimalPost {
    /// Creates a new post builder.
    pub fn builder() -> AnimalPostBuilder {
        AnimalPostBuilder::default()
    }

    /// Post with the standard footer.
    pub fn new(
        animal: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        fact: impl Into<String>,
    ) -> Self {
        Self {
            animal: animal.into(),
            title: title.into(),
            image_url: image_url.into(),
            fact: fact.into(),
            footer: FOOTER.to_string(),
        }
    }

    /// Replace the footer line.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }
}
