//! Bundled catalog data, used whenever the catalog source yields nothing.

use super::{CatalogEntry, PromotedItem};
use crate::discount::Discount;
use crate::ids::GameId;
use crate::money::{Currency, Money};

/// The category that disables filtering.
pub const ALL_CATEGORIES: &str = "All";

const CATEGORY_LABELS: [&str; 13] = [
    ALL_CATEGORIES,
    "Action",
    "Adventure",
    "RPG",
    "Strategy",
    "Simulation",
    "Sports",
    "Racing",
    "Puzzle",
    "Horror",
    "Indie",
    "Multiplayer",
    "VR",
];

const HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1605899435973-ca2d1a8431cf?w=1200&q=80";

/// Category strip labels, `"All"` first.
pub fn default_categories() -> Vec<String> {
    CATEGORY_LABELS.iter().map(|c| c.to_string()).collect()
}

/// The three games promoted by the hero carousel.
pub fn default_promotions() -> Vec<PromotedItem> {
    let promo = |id: &str, title: &str, price: f64, discount: u8, description: &str| PromotedItem {
        id: GameId::new(id),
        title: title.to_string(),
        image_url: HERO_IMAGE.to_string(),
        description: description.to_string(),
        original_price: Money::from_decimal(price, Currency::USD),
        discount: percent(discount),
    };

    vec![
        promo(
            "1",
            "Cyberpunk 2077",
            59.99,
            50,
            "An open-world, action-adventure RPG set in the megalopolis of Night City.",
        ),
        promo(
            "2",
            "Elden Ring",
            69.99,
            30,
            "A fantasy action-RPG adventure set within a world created by Hidetaka Miyazaki and George R. R. Martin.",
        ),
        promo(
            "3",
            "God of War Ragnar\u{f6}k",
            49.99,
            25,
            "Join Kratos and Atreus on a mythic journey for answers before Ragnar\u{f6}k arrives.",
        ),
    ]
}

/// The thirteen games listed in the grid.
pub fn default_catalog() -> Vec<CatalogEntry> {
    let rows: [(&str, &str, &str, f64, u8, &str, &[&str], &str); 13] = [
        (
            "1",
            "Cyberpunk 2077",
            "photo-1605899435973-ca2d1a8431cf",
            2999.5,
            33,
            "An open-world, action-adventure RPG set in the megalopolis of Night City.",
            &["PC", "PlayStation", "Xbox"],
            "Action",
        ),
        (
            "2",
            "Elden Ring",
            "photo-1616729613029-a3fda0e3a6e2",
            3499.5,
            15,
            "An action RPG developed by FromSoftware and published by Bandai Namco Entertainment.",
            &["PC", "PlayStation", "Xbox"],
            "Action",
        ),
        (
            "3",
            "Civilization VI",
            "photo-1559081632-5c4f6b5c8b13",
            2499.5,
            75,
            "A turn-based strategy game in which you attempt to build an empire to stand the test of time.",
            &["PC", "Switch", "Mobile"],
            "Strategy",
        ),
        (
            "4",
            "Hades",
            "photo-1550745165-9bc0b252726f",
            1249.5,
            20,
            "A rogue-like dungeon crawler where you defy the god of the dead as you hack and slash out of the Underworld.",
            &["PC", "PlayStation", "Xbox", "Switch"],
            "Action",
        ),
        (
            "5",
            "Stardew Valley",
            "photo-1566837945700-30057527ade0",
            749.5,
            40,
            "An open-ended country-life RPG where you inherit your grandfather's old farm plot.",
            &["PC", "PlayStation", "Xbox", "Switch", "Mobile"],
            "Simulation",
        ),
        (
            "6",
            "Hollow Knight",
            "photo-1551103782-8ab07afd45c1",
            749.5,
            50,
            "A challenging 2D action-adventure where you explore a vast interconnected world.",
            &["PC", "PlayStation", "Xbox", "Switch"],
            "Adventure",
        ),
        (
            "7",
            "FIFA 24",
            "photo-1574629810360-7efbbe195018",
            3499.5,
            30,
            "The world's game with HyperMotionV technology and enhanced gameplay.",
            &["PC", "PlayStation", "Xbox", "Switch"],
            "Sports",
        ),
        (
            "8",
            "Gran Turismo 7",
            "photo-1558618666-fcd25c85cd64",
            2999.5,
            25,
            "The ultimate racing experience with stunning graphics and realistic physics.",
            &["PlayStation", "PC"],
            "Racing",
        ),
        (
            "9",
            "Portal 2",
            "photo-1493711662062-fa541adb3fc8",
            999.5,
            60,
            "A mind-bending puzzle game with innovative mechanics and witty dialogue.",
            &["PC", "PlayStation", "Xbox"],
            "Puzzle",
        ),
        (
            "10",
            "Resident Evil 4",
            "photo-1578662996442-48f60103fc96",
            2999.5,
            40,
            "A survival horror masterpiece with intense action and atmospheric terror.",
            &["PC", "PlayStation", "Xbox"],
            "Horror",
        ),
        (
            "11",
            "Among Us",
            "photo-1511512578047-dfb367046420",
            249.5,
            20,
            "A multiplayer game of teamwork and betrayal in space.",
            &["PC", "Mobile", "Switch"],
            "Multiplayer",
        ),
        (
            "12",
            "Half-Life: Alyx",
            "photo-1592478411213-6153e4ebc696",
            2999.5,
            50,
            "A VR masterpiece that pushes the boundaries of virtual reality gaming.",
            &["PC VR"],
            "VR",
        ),
        (
            "13",
            "Cuphead",
            "photo-1550745165-9bc0b252726f",
            999.5,
            35,
            "A classic run and gun action game heavily focused on boss battles.",
            &["PC", "PlayStation", "Xbox", "Switch"],
            "Indie",
        ),
    ];

    rows.into_iter()
        .map(
            |(id, title, photo, price, discount, description, platforms, genre)| CatalogEntry {
                id: GameId::new(id),
                title: title.to_string(),
                cover_image: format!("https://images.unsplash.com/{photo}?w=600&q=80"),
                original_price: Money::from_decimal(price, Currency::PHP),
                discount: percent(discount),
                description: description.to_string(),
                platforms: platforms.iter().map(|p| p.to_string()).collect(),
                genre: genre.to_string(),
            },
        )
        .collect()
}

fn percent(p: u8) -> Discount {
    Discount::new(i64::from(p.min(100))).unwrap_or_default()
}
