//! Entity Cache Registry
//!
//! Static, process-wide table mapping entity-type names to their TTL and
//! invalidation unit. TTLs follow data volatility: rapidly-changing catalog
//! data gets short TTLs, near-static reference data long ones, everything
//! else the system default.

/// TTL for rapidly-changing catalog data (products, coupons, offers).
pub const TTL_SHORT: u64 = 30 * 60;
/// TTL for near-static reference data (colors, sizes, tax rates, ...).
pub const TTL_LONG: u64 = 24 * 60 * 60;
/// TTL applied to anything unlisted.
pub const TTL_DEFAULT: u64 = 60 * 60;

// == Entity Cache Config ==
/// Per-entity cache policy.
#[derive(Debug, Clone, Copy)]
pub struct EntityCacheConfig {
    /// Entity-type name, shared key segment for all of its cache entries
    pub entity_type: &'static str,
    /// TTL in seconds for cached responses of this entity
    pub ttl_seconds: u64,
    /// Companion types dropped together with this one. Denormalized content
    /// spanning several collections must be invalidated as one unit.
    pub also_invalidate: &'static [&'static str],
}

/// All registered entity types. Read-only after startup.
pub static ENTITY_CONFIGS: &[EntityCacheConfig] = &[
    EntityCacheConfig {
        entity_type: "products",
        ttl_seconds: TTL_SHORT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "categories",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "subcategories",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "brands",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "banners",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "settings",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        // The home payload denormalizes banners and slider items
        entity_type: "home-sections",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &["banners", "custom-slider-items"],
    },
    EntityCacheConfig {
        // Offer content spans several collections; drop them as one unit
        entity_type: "offers",
        ttl_seconds: TTL_SHORT,
        also_invalidate: &[
            "offer-pages",
            "offer-products",
            "offer-brands",
            "offer-categories",
        ],
    },
    EntityCacheConfig {
        entity_type: "blogs",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "colors",
        ttl_seconds: TTL_LONG,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "sizes",
        ttl_seconds: TTL_LONG,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "units",
        ttl_seconds: TTL_LONG,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "volumes",
        ttl_seconds: TTL_LONG,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "warranties",
        ttl_seconds: TTL_LONG,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "taxes",
        ttl_seconds: TTL_LONG,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "delivery-charges",
        ttl_seconds: TTL_LONG,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "coupons",
        ttl_seconds: TTL_SHORT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "reviews",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "gaming-zone",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "custom-slider-items",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
    EntityCacheConfig {
        entity_type: "buyer-protection",
        ttl_seconds: TTL_DEFAULT,
        also_invalidate: &[],
    },
];

// == Lookups ==
/// Returns the registered config for an entity type, if any.
pub fn config_for(entity_type: &str) -> Option<&'static EntityCacheConfig> {
    ENTITY_CONFIGS.iter().find(|c| c.entity_type == entity_type)
}

/// TTL in seconds for an entity type; unlisted names get the default.
pub fn ttl_for(entity_type: &str) -> u64 {
    config_for(entity_type)
        .map(|c| c.ttl_seconds)
        .unwrap_or(TTL_DEFAULT)
}

/// The full set of entity types dropped when this one is invalidated:
/// the type itself plus its declared companions.
pub fn invalidation_unit(entity_type: &str) -> Vec<&str> {
    let mut unit = vec![entity_type];
    if let Some(config) = config_for(entity_type) {
        unit.extend_from_slice(config.also_invalidate);
    }
    unit
}

/// Whether the name is a registered entity type.
pub fn is_registered(entity_type: &str) -> bool {
    config_for(entity_type).is_some()
}

/// All registered entity-type names.
pub fn registered_entities() -> Vec<&'static str> {
    ENTITY_CONFIGS.iter().map(|c| c.entity_type).collect()
}
