use fauna_core::{Animal, ApiEndpoint, SourceKind, fallback_pool, random_fact};

#[test]
fn test_parses_known_categories_in_any_case() {
    assert_eq!(Animal::from_category("Penguin"), Some(Animal::Penguin));
    assert_eq!(Animal::from_category("KOALA"), Some(Animal::Koala));
    assert_eq!(Animal::from_category(""), None);
    assert_eq!(Animal::from_category("cat dog"), None);
}

#[test]
fn test_titles_are_capitalized() {
    assert_eq!(Animal::Cat.title(), "Cat");
    assert_eq!(Animal::Hedgehog.title(), "Hedgehog");
}

#[test]
fn test_four_animals_have_dedicated_apis() {
    let api_backed: Vec<_> = Animal::all()
        .into_iter()
        .filter(|a| matches!(SourceKind::for_animal(*a, true), SourceKind::Api(_)))
        .collect();
    assert_eq!(
        api_backed,
        vec![Animal::Cat, Animal::Dog, Animal::Fox, Animal::Duck]
    );
    assert_eq!(ApiEndpoint::Duck.animal(), Animal::Duck);
}

#[test]
fn test_static_only_animals_never_go_live() {
    for animal in [Animal::Rabbit, Animal::Panda, Animal::Dolphin] {
        assert!(!SourceKind::for_animal(animal, true).is_live());
    }
    assert!(SourceKind::for_animal(Animal::Wolf, true).is_live());
    assert!(!SourceKind::for_animal(Animal::Wolf, false).is_live());
}

#[test]
fn test_pools_and_facts_cover_every_animal() {
    for animal in Animal::all() {
        assert!(!fallback_pool(animal).is_empty());
        assert!(!random_fact(animal.as_str()).is_empty());
    }
}

#[test]
fn test_serde_uses_lowercase_names() {
    let json = serde_json::to_string(&Animal::Raccoon).unwrap();
    assert_eq!(json, "\"raccoon\"");
    let back: Animal = serde_json::from_str("\"owl\"").unwrap();
    assert_eq!(back, Animal::Owl);
}
