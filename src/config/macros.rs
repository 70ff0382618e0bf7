/// Configuration macros for zero-repetition config definitions
///
/// `config_struct!` declares a configuration struct with embedded defaults:
/// - public fields
/// - a `Default` implementation built from the per-field defaults
/// - serde support with `#[serde(default)]`, so partial TOML files load
///
/// # Example
/// ```rust,ignore
/// config_struct! {
///     pub struct PipelineConfig {
///         max_workers: usize = 12,
///         wallet_delay_ms: u64 = 150,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
