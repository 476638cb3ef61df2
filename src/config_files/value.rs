//! Plain-data configuration values.
//!
//! A [`Value`] can only hold scalars, sequences and string-keyed mappings. Anything richer has to
//! go through [`Value::from_serialize`] or [`to_config_mapping`], which refuse tagged nodes and
//! non-string keys instead of coercing them.

use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_yaml_ng::Value as Yaml;

use crate::config_files::error::{DecodeError, EncodeError};

/// Parsed contents of a configuration file, in file order.
pub type ConfigMapping = IndexMap<String, Value>;

/// Leaf of a configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Configuration tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(ConfigMapping),
}

impl Value {
    /// Convert any serializable value into plain data.
    ///
    /// # Errors
    /// [`EncodeError::Tagged`] for values serializing to tagged nodes (enum variants with data),
    /// [`EncodeError::NonStringKey`] for maps keyed by anything but strings,
    /// [`EncodeError::IntegerOutOfRange`] for integers beyond `i64`, and
    /// [`EncodeError::Emit`] if `value` fails to serialize at all.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, EncodeError> {
        let yaml = serde_yaml_ng::to_value(value)?;
        plain_from_yaml(yaml).map_err(|err| match err {
            Unsafe::Tagged(tag) => EncodeError::Tagged(tag),
            Unsafe::NonStringKey(kind) => EncodeError::NonStringKey(kind),
            Unsafe::IntegerOutOfRange(n) => EncodeError::IntegerOutOfRange(n),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Scalar(Scalar::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ConfigMapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(Scalar::Null) => "null",
            Value::Scalar(Scalar::Bool(_)) => "a boolean",
            Value::Scalar(Scalar::Int(_) | Scalar::Float(_)) => "a number",
            Value::Scalar(Scalar::String(_)) => "a string",
            Value::Sequence(_) => "a sequence",
            Value::Mapping(_) => "a mapping",
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => |$v:ident| $conv:expr),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from($v: $ty) -> Self {
                    Value::Scalar($conv)
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => |v| Scalar::Bool(v),
    i32 => |v| Scalar::Int(i64::from(v)),
    i64 => |v| Scalar::Int(v),
    u32 => |v| Scalar::Int(i64::from(v)),
    f64 => |v| Scalar::Float(v),
    String => |v| Scalar::String(v),
    &str => |v| Scalar::String(v.to_owned()),
);

impl From<Vec<Value>> for Value {
    fn from(seq: Vec<Value>) -> Self {
        Value::Sequence(seq)
    }
}

impl From<ConfigMapping> for Value {
    fn from(map: ConfigMapping) -> Self {
        Value::Mapping(map)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Scalar(Scalar::Null)
    }
}

/// Convert any serializable value into a [`ConfigMapping`], e.g. a settings struct.
///
/// # Errors
/// Everything [`Value::from_serialize`] rejects, plus [`EncodeError::NotAMapping`] when `value`
/// is not a map-like type.
pub fn to_config_mapping<T: Serialize + ?Sized>(value: &T) -> Result<ConfigMapping, EncodeError> {
    match Value::from_serialize(value)? {
        Value::Mapping(map) => Ok(map),
        other => Err(EncodeError::NotAMapping(other.kind())),
    }
}

/// Deserialize a [`ConfigMapping`] into a typed configuration.
///
/// # Errors
/// [`DecodeError::Syntax`] if the mapping does not have the shape `T` expects.
pub fn from_config_mapping<T: DeserializeOwned>(map: &ConfigMapping) -> Result<T, DecodeError> {
    Ok(serde_yaml_ng::from_value(mapping_to_yaml(map))?)
}

pub(crate) enum Unsafe {
    Tagged(String),
    NonStringKey(&'static str),
    IntegerOutOfRange(String),
}

impl From<Unsafe> for DecodeError {
    fn from(err: Unsafe) -> Self {
        match err {
            Unsafe::Tagged(tag) => DecodeError::Tagged(tag),
            Unsafe::NonStringKey(kind) => DecodeError::NonStringKey(kind),
            Unsafe::IntegerOutOfRange(n) => DecodeError::IntegerOutOfRange(n),
        }
    }
}

fn yaml_kind(yaml: &Yaml) -> &'static str {
    match yaml {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a sequence",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}

pub(crate) fn plain_from_yaml(yaml: Yaml) -> Result<Value, Unsafe> {
    let value = match yaml {
        Yaml::Null => Value::Scalar(Scalar::Null),
        Yaml::Bool(b) => Value::Scalar(Scalar::Bool(b)),
        Yaml::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Value::Scalar(Scalar::Int(i)),
            (None, Some(f)) if n.is_f64() => Value::Scalar(Scalar::Float(f)),
            // u64 above i64::MAX would only survive as a lossy float.
            _ => return Err(Unsafe::IntegerOutOfRange(n.to_string())),
        },
        Yaml::String(s) => Value::Scalar(Scalar::String(s)),
        Yaml::Sequence(seq) => Value::Sequence(
            seq.into_iter()
                .map(plain_from_yaml)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut out = ConfigMapping::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    Yaml::String(key) => key,
                    other => return Err(Unsafe::NonStringKey(yaml_kind(&other))),
                };
                out.insert(key, plain_from_yaml(value)?);
            }
            Value::Mapping(out)
        }
        Yaml::Tagged(tagged) => return Err(Unsafe::Tagged(tagged.tag.to_string())),
    };
    Ok(value)
}

/// Top-level document into a mapping. An empty document is an empty mapping.
pub(crate) fn mapping_from_yaml(yaml: Yaml) -> Result<ConfigMapping, DecodeError> {
    match plain_from_yaml(yaml)? {
        Value::Mapping(map) => Ok(map),
        Value::Scalar(Scalar::Null) => Ok(ConfigMapping::new()),
        other => Err(DecodeError::NotAMapping(other.kind())),
    }
}

pub(crate) fn value_to_yaml(value: &Value) -> Yaml {
    match value {
        Value::Scalar(Scalar::Null) => Yaml::Null,
        Value::Scalar(Scalar::Bool(b)) => Yaml::Bool(*b),
        Value::Scalar(Scalar::Int(i)) => Yaml::Number((*i).into()),
        Value::Scalar(Scalar::Float(f)) => Yaml::Number((*f).into()),
        Value::Scalar(Scalar::String(s)) => Yaml::String(s.clone()),
        Value::Sequence(seq) => Yaml::Sequence(seq.iter().map(value_to_yaml).collect()),
        Value::Mapping(map) => mapping_to_yaml(map),
    }
}

pub(crate) fn mapping_to_yaml(map: &ConfigMapping) -> Yaml {
    Yaml::Mapping(
        map.iter()
            .map(|(key, value)| (Yaml::String(key.clone()), value_to_yaml(value)))
            .collect(),
    )
}
