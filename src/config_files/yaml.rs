//! Safe-subset YAML codec for [`ConfigMapping`].

use crate::config_files::error::{DecodeError, EncodeError};
use crate::config_files::value::{ConfigMapping, mapping_from_yaml, mapping_to_yaml};

/// Parse a YAML document into a [`ConfigMapping`].
///
/// Only plain scalars, sequences and string-keyed mappings are accepted; custom tags are
/// rejected rather than constructed. An empty document yields an empty mapping.
///
/// # Examples
/// ```rust
/// use xdgconf::config_files::yaml;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let map = yaml::decode("key: value\nlist: [1, 2]\n")?;
/// assert_eq!(map["key"].as_str(), Some("value"));
/// assert!(yaml::decode("key: !python/object foo").is_err());
/// # Ok(())
/// # }
/// ```
pub fn decode(text: &str) -> Result<ConfigMapping, DecodeError> {
    let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(text)?;
    mapping_from_yaml(yaml)
}

/// Emit a [`ConfigMapping`] as a YAML document.
pub fn encode(map: &ConfigMapping) -> Result<String, EncodeError> {
    Ok(serde_yaml_ng::to_string(&mapping_to_yaml(map))?)
}
