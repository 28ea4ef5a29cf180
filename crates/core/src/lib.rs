pub mod config;
pub mod external_catalog;
pub mod metrics;
pub mod resolver;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ResolverConfig,
    SanitizedConfig, ServerConfig,
};
pub use external_catalog::{
    CatalogError, LegoSet, RebrickableClient, RebrickableConfig, SetCatalog, SetLookup,
};
pub use resolver::{
    hash_code, identifier_key, CacheStats, Resolution, ResolverError, SetResolver,
    DEFAULT_SET_ID,
};
