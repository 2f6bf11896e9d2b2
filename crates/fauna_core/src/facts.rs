//! Fun facts shown alongside images.

use crate::Animal;
use rand::seq::SliceRandom;

/// Fact used when a category has none.
pub const DEFAULT_FACT: &str = "Amazing animal!";

fn facts(animal: Animal) -> &'static [&'static str] {
    match animal {
        Animal::Cat => &[
            "Cats can rotate their ears independently!",
            "A group of cats is called a clowder.",
        ],
        Animal::Dog => &[
            "Dogs can understand up to 250 different words and gestures!",
            "A dog's nose print is as unique as a human fingerprint.",
        ],
        Animal::Fox => &[
            "Foxes use the Earth's magnetic field to hunt prey beneath the snow!",
            "Red foxes have whiskers on their legs as well as their faces.",
        ],
        Animal::Duck => &[
            "Ducks can sleep with one eye open to watch for predators!",
            "Duck feathers are so waterproof that water rolls right off.",
        ],
        Animal::Rabbit => &["Rabbits can see nearly 360 degrees around themselves."],
        Animal::Raccoon => &["Raccoons have around 4,000 sensory receptors in each front paw."],
        Animal::Owl => &["Owls cannot move their eyes, so they turn their heads up to 270 degrees."],
        Animal::Penguin => &["Emperor penguins can dive deeper than 500 metres."],
        Animal::Panda => &["Giant pandas spend up to 14 hours a day eating bamboo."],
        Animal::Koala => &["Koalas sleep up to 22 hours a day."],
        Animal::Sloth => &["Sloths can hold their breath for up to 40 minutes."],
        Animal::Hedgehog => &["A hedgehog has around 5,000 to 7,000 quills."],
        Animal::Otter => &["Sea otters hold hands while sleeping so they don't drift apart."],
        Animal::Squirrel => &["Squirrels forget where they bury many of their nuts, planting new trees."],
        Animal::Deer => &["Deer antlers are the fastest-growing bone tissue of any mammal."],
        Animal::Bear => &["A bear's sense of smell is about seven times better than a bloodhound's."],
        Animal::Wolf => &["A wolf's howl can be heard up to 10 kilometres away."],
        Animal::Eagle => &["Eagles can spot prey from more than 3 kilometres away."],
        Animal::Dolphin => &["Dolphins call each other by signature whistles, much like names."],
    }
}

/// Pick a random fun fact for a category string.
///
/// # Examples
///
/// ```
/// use fauna_core::{DEFAULT_FACT, random_fact};
///
/// assert_ne!(random_fact("owl"), DEFAULT_FACT);
/// assert_eq!(random_fact("basilisk"), DEFAULT_FACT);
/// ```
pub fn random_fact(category: &str) -> &'static str {
    Animal::from_category(category)
        .and_then(|animal| facts(animal).choose(&mut rand::thread_rng()).copied())
        .unwrap_or(DEFAULT_FACT)
}
