/// Configuration system
///
/// - `macros`: `config_struct!` for structs with embedded defaults
/// - `schemas`: every configuration section
/// - `utils`: locating, loading, env overrides and validation
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{
    BirdeyeConfig, Config, DexScreenerConfig, HeliusConfig, PathsConfig, PipelineConfig,
    VolumeCascade,
};
pub use utils::{load_config, load_config_from_path, parse_config, validate_config};
