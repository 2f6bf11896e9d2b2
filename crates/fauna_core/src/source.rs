//! Where each category's images come from.

use crate::Animal;
use serde_json::Value;
use strum::IntoEnumIterator;

/// Public image APIs with a dedicated endpoint and response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ApiEndpoint {
    /// thecatapi.com, `[{"url": ...}]`
    Cat,
    /// thedogapi.com, `[{"url": ...}]`
    Dog,
    /// randomfox.ca, `{"image": ...}`
    Fox,
    /// random-d.uk, `{"url": ...}`
    Duck,
}

impl ApiEndpoint {
    /// Endpoint URL for a random image.
    pub fn url(&self) -> &'static str {
        match self {
            ApiEndpoint::Cat => "https://api.thecatapi.com/v1/images/search",
            ApiEndpoint::Dog => "https://api.thedogapi.com/v1/images/search",
            ApiEndpoint::Fox => "https://randomfox.ca/floof/",
            ApiEndpoint::Duck => "https://random-d.uk/api/random",
        }
    }

    /// Whether the endpoint accepts an `x-api-key` credential.
    pub fn accepts_api_key(&self) -> bool {
        matches!(self, ApiEndpoint::Cat | ApiEndpoint::Dog)
    }

    /// Every endpoint.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Animal served by this endpoint.
    pub fn animal(&self) -> Animal {
        match self {
            ApiEndpoint::Cat => Animal::Cat,
            ApiEndpoint::Dog => Animal::Dog,
            ApiEndpoint::Fox => Animal::Fox,
            ApiEndpoint::Duck => Animal::Duck,
        }
    }

    fn extract(&self, body: &Value) -> Option<String> {
        let url = match self {
            ApiEndpoint::Cat | ApiEndpoint::Dog => body.get(0)?.get("url")?,
            ApiEndpoint::Fox => body.get("image")?,
            ApiEndpoint::Duck => body.get("url")?,
        };
        non_empty(url)
    }
}

/// How a category is resolved.
///
/// # Examples
///
/// ```
/// use fauna_core::{ApiEndpoint, SourceKind};
///
/// assert_eq!(SourceKind::for_category("dog", true), SourceKind::Api(ApiEndpoint::Dog));
/// assert_eq!(SourceKind::for_category("owl", true), SourceKind::Wildlife);
/// assert_eq!(SourceKind::for_category("owl", false), SourceKind::StaticOnly);
/// assert_eq!(SourceKind::for_category("unicorn", true), SourceKind::StaticOnly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Dedicated public API
    Api(ApiEndpoint),
    /// Generic wildlife observation photo search
    Wildlife,
    /// Fallback pool only
    StaticOnly,
}

impl SourceKind {
    /// Look up the source for a category string.
    pub fn for_category(category: &str, wildlife_enabled: bool) -> Self {
        match Animal::from_category(category) {
            Some(animal) => Self::for_animal(animal, wildlife_enabled),
            None => SourceKind::StaticOnly,
        }
    }

    /// Look up the source for a known animal.
    pub fn for_animal(animal: Animal, wildlife_enabled: bool) -> Self {
        match animal {
            Animal::Cat => SourceKind::Api(ApiEndpoint::Cat),
            Animal::Dog => SourceKind::Api(ApiEndpoint::Dog),
            Animal::Fox => SourceKind::Api(ApiEndpoint::Fox),
            Animal::Duck => SourceKind::Api(ApiEndpoint::Duck),
            Animal::Owl
            | Animal::Raccoon
            | Animal::Otter
            | Animal::Squirrel
            | Animal::Deer
            | Animal::Bear
            | Animal::Wolf
            | Animal::Eagle
                if wildlife_enabled =>
            {
                SourceKind::Wildlife
            }
            _ => SourceKind::StaticOnly,
        }
    }

    /// Whether a network fetch is attempted at all.
    pub fn is_live(&self) -> bool {
        !matches!(self, SourceKind::StaticOnly)
    }

    /// Pull the image URL out of a successful response body.
    ///
    /// Returns `None` when the body does not have the expected shape or the
    /// URL field is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fauna_core::{ApiEndpoint, SourceKind};
    /// use serde_json::json;
    ///
    /// let cat = SourceKind::Api(ApiEndpoint::Cat);
    /// let body = json!([{"id": "abc", "url": "http://x/cat1.png"}]);
    /// assert_eq!(cat.extract_image_url(&body).as_deref(), Some("http://x/cat1.png"));
    /// assert_eq!(cat.extract_image_url(&json!([])), None);
    /// ```
    pub fn extract_image_url(&self, body: &Value) -> Option<String> {
        match self {
            SourceKind::Api(endpoint) => endpoint.extract(body),
            SourceKind::Wildlife => {
                let url = body
                    .get("results")?
                    .get(0)?
                    .get("photos")?
                    .get(0)?
                    .get("url")?;
                // Observation search returns thumbnails
                non_empty(url).map(|u| u.replacen("/square.", "/medium.", 1))
            }
            SourceKind::StaticOnly => None,
        }
    }
}

fn non_empty(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
