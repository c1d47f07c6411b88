use std::sync::Arc;

// string-keyed maps use a fast hasher, as keys are never attacker controlled
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashMap;

// used to print out readable forms of a construct
use std::fmt;

use serde::{Deserialize, Serialize};

// our own stuff that we need
use crate::datatype::Value;
use crate::error::{AnnotableError, Result};

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

/// Keyword options attached to an annotation, keyed by identifier.
pub type Options = HashMap<String, Value, OtherHasher>;

// ------------- Annotation -------------
/// A single tag instance: a name together with the positional params and
/// keyword options it was invoked with. Any name and any values are legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    name: String,
    params: Vec<Value>,
    options: Options,
}

impl Annotation {
    pub fn new(name: impl Into<String>, params: Vec<Value>, options: Options) -> Self {
        Self {
            name: name.into(),
            params,
            options,
        }
    }
    // It's intentional to encapsulate the fields in the struct
    // and only expose them using "getters", because this yields
    // true immutability for objects after creation.
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn params(&self) -> &[Value] {
        &self.params
    }
    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        // options are printed in key order, since the map itself is unordered
        let mut keys: Vec<&String> = self.options.keys().collect();
        keys.sort();
        for key in keys {
            parts.push(format!("{}: {}", key, self.options[key]));
        }
        write!(f, "{}({})", self.name, parts.join(", "))
    }
}

// ------------- AnnotatedMethod -------------
/// A method name bound to the annotations that were staged when the method
/// was registered. At least one annotation is required, since unannotated
/// methods are never recorded.
#[derive(Debug, Clone)]
pub struct AnnotatedMethod {
    name: String,
    annotations: Vec<Arc<Annotation>>,
}

impl AnnotatedMethod {
    pub fn new(name: impl Into<String>, annotations: Vec<Arc<Annotation>>) -> Result<Self> {
        let name = name.into();
        if annotations.is_empty() {
            return Err(AnnotableError::NoAnnotations { method: name });
        }
        Ok(Self { name, annotations })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn annotations(&self) -> &[Arc<Annotation>] {
        &self.annotations
    }
    /// True iff any contained annotation carries the given name.
    pub fn annotation_exists(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name() == name)
    }
    /// The contained annotations whose name is among `names`, in storage
    /// order. The order of `names` itself is irrelevant.
    pub fn select_annotations(&self, names: &[&str]) -> Result<Vec<Arc<Annotation>>> {
        if names.is_empty() {
            return Err(AnnotableError::EmptySelection);
        }
        Ok(self
            .annotations
            .iter()
            .filter(|a| names.contains(&a.name()))
            .cloned()
            .collect())
    }
    /// The first contained annotation (in storage order) whose name is among
    /// `names`, or `None` when no annotation matches.
    pub fn find_annotation(&self, names: &[&str]) -> Result<Option<Arc<Annotation>>> {
        if names.is_empty() {
            return Err(AnnotableError::EmptySelection);
        }
        Ok(self
            .annotations
            .iter()
            .find(|a| names.contains(&a.name()))
            .cloned())
    }
}

impl fmt::Display for AnnotatedMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        for a in self.annotations() {
            s += &(a.to_string() + ", ");
        }
        s.pop();
        s.pop();
        write!(f, "{} [{}]", self.name, s)
    }
}
