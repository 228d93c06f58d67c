//! Platform and genre values offered by the entry form.
//!
//! Both fields are open strings on the backend; these lists are only the
//! suggestions a client presents, never a validation set.

pub const KNOWN_PLATFORMS: &[&str] = &[
    "PC",
    "PlayStation",
    "Xbox",
    "Nintendo Switch",
    "Mobile",
    "Multiplataforma",
];

pub const KNOWN_GENRES: &[&str] = &[
    "Acción",
    "Aventura",
    "RPG",
    "Estrategia",
    "Deportes",
    "Shooter",
    "Indie",
    "Simulación",
];

pub const DEFAULT_PLATFORM: &str = "PC";
pub const DEFAULT_GENRE: &str = "Acción";
