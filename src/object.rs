// src/object.rs

//! Runtime values of the Nuru interpreter, as seen by code that only needs to
//! name their type and print them.

// dependencies
use std::fmt;

/// Type tag carried by every runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    Error,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Integer => "NAMBA",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "TUPU",
            ObjectType::Error => "KOSA",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the interpreter asks of every value: its type tag and a printable form.
pub trait ObjectLike {
    fn kind(&self) -> ObjectType;
    fn render(&self) -> String;
}

// struct type holding the message of a runtime error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorValue {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ObjectLike for ErrorValue {
    fn kind(&self) -> ObjectType {
        ObjectType::Error
    }

    // plain text only, the output ends up in a browser
    fn render(&self) -> String {
        format!("Kosa: {}", self.message)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    Error(ErrorValue),
}

impl Object {
    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

impl ObjectLike for Object {
    fn kind(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::Error(err) => err.kind(),
        }
    }

    fn render(&self) -> String {
        match self {
            Object::Integer(value) => value.to_string(),
            Object::Boolean(true) => "kweli".to_string(),
            Object::Boolean(false) => "sikweli".to_string(),
            Object::Null => "tupu".to_string(),
            Object::Error(err) => err.render(),
        }
    }
}

impl From<ErrorValue> for Object {
    fn from(err: ErrorValue) -> Self {
        Object::Error(err)
    }
}
