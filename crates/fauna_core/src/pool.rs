//! Static fallback image pools.

use crate::Animal;
use rand::seq::SliceRandom;

/// Image returned for categories that have no pool of their own.
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1446824653969-c8398aa337df";

/// Known-good images per animal, used whenever a live fetch is impossible.
pub fn fallback_pool(animal: Animal) -> &'static [&'static str] {
    match animal {
        Animal::Cat => &[
            "https://images.unsplash.com/photo-1574158622682-e40ad16ae15f",
            "https://images.unsplash.com/photo-1519052537078-e6302a4968d4",
            "https://images.unsplash.com/photo-1495360010541-f48722b34f7d",
            "https://images.unsplash.com/photo-1513360371669-4a0eb51e8ae2",
            "https://images.unsplash.com/photo-1478098711619-69891b0ec21a",
        ],
        Animal::Dog => &[
            "https://images.unsplash.com/photo-1633722715463-d30628519e1a",
            "https://images.unsplash.com/photo-1611003228941-98852ba62227",
            "https://images.unsplash.com/photo-1558788353-f76d92427f16",
            "https://images.unsplash.com/photo-1601758228578-851cda313e11",
            "https://images.unsplash.com/photo-1587300003388-59208cc962cb",
        ],
        Animal::Fox => &[
            "https://images.unsplash.com/photo-1434694686742-92029fba1ee3",
            "https://images.unsplash.com/photo-1432405972618-c60b0225b8f9",
            "https://images.unsplash.com/photo-1506361197048-46a72bb97d31",
        ],
        Animal::Duck => &[
            "https://images.unsplash.com/photo-1444464666175-1cff627ceab26",
            "https://images.unsplash.com/photo-1444989908331-a149ce67b396",
            "https://images.unsplash.com/photo-1559827260-dc66d52bef19",
        ],
        Animal::Rabbit => &["https://images.unsplash.com/photo-1585110396000-c9ffd4d4b3f4"],
        Animal::Raccoon => &["https://images.unsplash.com/photo-1567270762171-79799e56aea1"],
        Animal::Owl => &["https://images.unsplash.com/photo-1540573133985-87b6da97af72"],
        Animal::Penguin => &["https://images.unsplash.com/photo-1551629146-8d3d89e68da0"],
        Animal::Panda => &["https://images.unsplash.com/photo-1525382455947-f319bc05fb35"],
        Animal::Koala => &["https://images.unsplash.com/photo-1459262838948-3e2de6c3638f"],
        Animal::Sloth => &["https://images.unsplash.com/photo-1551324894-4f4f1a7f0d6e"],
        Animal::Hedgehog => &["https://images.unsplash.com/photo-1539571696357-5a69c006ae30"],
        Animal::Otter => &["https://images.unsplash.com/photo-1591229728215-2a83dbd60066"],
        Animal::Squirrel => &["https://images.unsplash.com/photo-1446824653969-c8398aa337df"],
        Animal::Deer => &["https://images.unsplash.com/photo-1484406566174-9da000fda645"],
        Animal::Bear => &["https://images.unsplash.com/photo-1528127269029-c3ee1f0b2c14"],
        Animal::Wolf => &["https://images.unsplash.com/photo-1501706362039-c06b2d715385"],
        Animal::Eagle => &["https://images.unsplash.com/photo-1540573133985-87b6da97af72"],
        Animal::Dolphin => &["https://images.unsplash.com/photo-1505142468610-359e7d316be0"],
    }
}

/// Pick a uniformly random fallback image for a category string.
///
/// Unknown categories get [`DEFAULT_IMAGE_URL`]. Nothing is remembered between
/// calls, so repeated fallbacks may differ.
///
/// # Examples
///
/// ```
/// use fauna_core::{Animal, DEFAULT_IMAGE_URL, fallback_pool, static_image};
///
/// let url = static_image("fox");
/// assert!(fallback_pool(Animal::Fox).contains(&url.as_str()));
/// assert_eq!(static_image("griffin"), DEFAULT_IMAGE_URL);
/// ```
pub fn static_image(category: &str) -> String {
    let pool = match Animal::from_category(category) {
        Some(animal) => fallback_pool(animal),
        None => return DEFAULT_IMAGE_URL.to_string(),
    };
    pool.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_IMAGE_URL)
        .to_string()
}
