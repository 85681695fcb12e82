// used when parsing a string to a Span
use std::str::FromStr;
// used to print out readable forms of a data type
use std::fmt;
// used to indicate that data types need to be hashable
use std::hash::{BuildHasherDefault, Hash};
// custom made ordering for spans and values
use std::cmp::Ordering;
// used to identify the concrete type a tag designates
use std::any::TypeId;

use std::collections::HashMap;

// we will use a fast hashing algo for the mapping table, since tags are small keys
use seahash::SeaHasher;

// used for serializing query results
use serde::{Deserialize, Serialize};

// so regular expressions don't have to be recompiled
use lazy_static::lazy_static;
use regex::Regex;

use tracing::{debug, warn};

use crate::error::{Result, SpanlogError};

pub type TagHasher = BuildHasherDefault<SeaHasher>;

pub trait DataType: fmt::Display + Eq + Hash + Send + Sync {
    // static stuff which needs to be implemented downstream
    const UID: u8;
    const DATA_TYPE: &'static str;
    const TAG: DataTypes;
    fn convert(value: &Value) -> Option<Self>
    where
        Self: Sized;
    // instance callable with pre-made implementation
    fn data_type(&self) -> &'static str {
        Self::DATA_TYPE
    }
    fn identifier(&self) -> u8 {
        Self::UID
    }
    fn tag(&self) -> DataTypes {
        Self::TAG
    }
}

// ------------- Data Types --------------
impl DataType for String {
    const UID: u8 = 1;
    const DATA_TYPE: &'static str = "String";
    const TAG: DataTypes = DataTypes::String;
    fn convert(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}
impl DataType for i64 {
    const UID: u8 = 2;
    const DATA_TYPE: &'static str = "i64";
    const TAG: DataTypes = DataTypes::Integer;
    fn convert(value: &Value) -> Option<i64> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}
impl DataType for Span {
    const UID: u8 = 3;
    const DATA_TYPE: &'static str = "Span";
    const TAG: DataTypes = DataTypes::Span;
    fn convert(value: &Value) -> Option<Span> {
        match value {
            Value::Span(s) => Some(*s),
            _ => None,
        }
    }
}

// ------------- Span -------------
/*
A span is the interval [start, end) of character offsets that a rule
matched in some text. Spans are compared first by start and then by end,
so that sorting a batch of extracted matches puts them in reading order
and makes duplicates adjacent.

The offsets are not required to satisfy start <= end. Only their
integrality is checked, and only on the dynamically typed path.
*/
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Span {
    start: i64,
    end: i64,
}

impl Span {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
    /// Builds a span from values whose kinds are only known at runtime,
    /// as when the offsets come out of a parsed fact. Both values must
    /// hold integers.
    pub fn from_values(start: &Value, end: &Value) -> Result<Span> {
        match (start, end) {
            (Value::Integer(start), Value::Integer(end)) => Ok(Span::new(*start, *end)),
            _ => Err(SpanlogError::SpanEndpoints),
        }
    }
    // It's intentional to encapsulate the offsets in the struct
    // and only expose them using "getters", because this yields
    // true immutability for spans after creation.
    pub fn start(&self) -> i64 {
        self.start
    }
    pub fn end(&self) -> i64 {
        self.end
    }
}
impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end).cmp(&(other.start, other.end))
    }
}
impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
impl FromStr for Span {
    type Err = SpanlogError;
    fn from_str(s: &str) -> Result<Span> {
        lazy_static! {
            static ref SPAN_LITERAL: Regex =
                Regex::new(r"^\[\s*(-?\d+)\s*,\s*(-?\d+)\s*\)$").unwrap();
        }
        let captures = SPAN_LITERAL
            .captures(s.trim())
            .ok_or_else(|| SpanlogError::Parse {
                message: format!("not a span literal: {s}"),
            })?;
        Ok(Span::new(
            captures[1].parse::<i64>()?,
            captures[2].parse::<i64>()?,
        ))
    }
}
impl TryFrom<(&Value, &Value)> for Span {
    type Error = SpanlogError;
    fn try_from((start, end): (&Value, &Value)) -> Result<Span> {
        Span::from_values(start, end)
    }
}

// ------------- DataTypes -------------
/// The closed set of value kinds the engine manipulates. Tags are compared
/// by identity only; ordering between tags carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataTypes {
    String,
    Integer,
    Span,
}

impl DataTypes {
    pub const ALL: [DataTypes; 3] = [DataTypes::String, DataTypes::Integer, DataTypes::Span];
    /// The tag name as it is written in rule files.
    pub fn name(&self) -> &'static str {
        match self {
            DataTypes::String => "string",
            DataTypes::Integer => "int",
            DataTypes::Span => "span",
        }
    }
}
impl fmt::Display for DataTypes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- DataTypeMapping -------------
/// Static metadata for the concrete type a [`DataTypes`] tag designates.
#[derive(Debug)]
pub struct TypeDescriptor {
    tag: DataTypes,
    data_type: &'static str,
    uid: u8,
    type_id: TypeId,
}

impl TypeDescriptor {
    fn of<T: 'static + DataType>() -> Self {
        Self {
            tag: T::TAG,
            data_type: T::DATA_TYPE,
            uid: T::UID,
            type_id: TypeId::of::<T>(),
        }
    }
    pub fn tag(&self) -> DataTypes {
        self.tag
    }
    pub fn data_type(&self) -> &'static str {
        self.data_type
    }
    pub fn identifier(&self) -> u8 {
        self.uid
    }
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
    pub fn designates<T: 'static + DataType>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

lazy_static! {
    static ref DATA_TYPE_MAPPING: HashMap<DataTypes, TypeDescriptor, TagHasher> = {
        let mut mapping = HashMap::default();
        for tag in DataTypes::ALL {
            // exhaustive match: a new member of DataTypes will not compile
            // without an entry here
            let descriptor = match tag {
                DataTypes::String => TypeDescriptor::of::<String>(),
                DataTypes::Integer => TypeDescriptor::of::<i64>(),
                DataTypes::Span => TypeDescriptor::of::<Span>(),
            };
            mapping.insert(tag, descriptor);
        }
        debug!(entries = mapping.len(), "data type mapping initialized");
        mapping
    };
}

/// The single point of indirection between a tag and the concrete type it
/// designates. The table behind it is built once and never mutated, so
/// lookups are safe from any thread.
pub struct DataTypeMapping;

impl DataTypeMapping {
    /// Resolution is total over [`DataTypes`]. A hole in the table is an
    /// internal consistency bug, not a runtime condition callers can hit.
    pub fn resolve(tag: DataTypes) -> &'static TypeDescriptor {
        match DATA_TYPE_MAPPING.get(&tag) {
            Some(descriptor) => descriptor,
            None => panic!(
                "{}",
                SpanlogError::Invariant(format!("no concrete type mapped for {tag}"))
            ),
        }
    }
    /// Reverse lookup from a tag name declared in a rule file.
    pub fn from_name(name: &str) -> Option<DataTypes> {
        DataTypes::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

// ------------- Value -------------
/*
A value as it travels through the engine: fact terms are parsed into
values, tuples of values are compared during evaluation, and results are
serialized from values. Keeping the kinds together in one type means the
surrounding code branches on a tag rather than on concrete types.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Integer(i64),
    Span(Span),
}

impl Value {
    pub fn data_type(&self) -> DataTypes {
        match self {
            Value::String(_) => DataTypes::String,
            Value::Integer(_) => DataTypes::Integer,
            Value::Span(_) => DataTypes::Span,
        }
    }
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        DataTypeMapping::resolve(self.data_type())
    }
    /// Coerces raw fact text under a declared tag.
    pub fn parse(tag: DataTypes, raw: &str) -> Result<Value> {
        debug!(%tag, raw, "coercing fact term");
        let value = match tag {
            DataTypes::String => Value::String(unquote(raw)),
            DataTypes::Integer => Value::Integer(raw.trim().parse::<i64>()?),
            DataTypes::Span => Value::Span(raw.parse::<Span>()?),
        };
        Ok(value)
    }
    /// Determines the kind of a literal from its shape alone, for facts
    /// that carry no declared tag.
    pub fn infer(raw: &str) -> Value {
        lazy_static! {
            static ref INTEGER_LITERAL: Regex = Regex::new(r"^-?\d+$").unwrap();
        }
        let trimmed = raw.trim();
        if let Ok(span) = trimmed.parse::<Span>() {
            return Value::Span(span);
        }
        if INTEGER_LITERAL.is_match(trimmed) {
            match trimmed.parse::<i64>() {
                Ok(i) => return Value::Integer(i),
                Err(_) => {
                    warn!(literal = trimmed, "integer literal out of range, kept as string");
                }
            }
        }
        Value::String(unquote(trimmed))
    }
    /// Ordering is only defined within a kind. The engine rejects
    /// comparisons across kinds rather than inventing an order for them.
    pub fn try_cmp(&self, other: &Value) -> Result<Ordering> {
        self.partial_cmp(other).ok_or(SpanlogError::Comparison {
            left: self.data_type().name(),
            right: other.data_type().name(),
        })
    }
    /// Serializes the value for result emission.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SpanlogError::Invariant(e.to_string()))
    }
}
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Span(a), Value::Span(b)) => Some(a.cmp(b)),
            (_, _) => None,
        }
    }
}
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Span(s) => write!(f, "{}", s),
        }
    }
}
impl From<Span> for Value {
    fn from(s: Span) -> Self {
        Value::Span(s)
    }
}
impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(String::from(s))
    }
}

fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        String::from(&trimmed[1..trimmed.len() - 1])
    } else {
        String::from(trimmed)
    }
}
