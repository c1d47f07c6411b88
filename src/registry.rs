//! Declared tags, the per-host annotation context, and the `Annotable`
//! capability trait.
//!
//! A host owns one [`Annotator`]. Tags are declared up front, invoked by
//! name to stage [`Annotation`]s, and the staged set is bound to a method
//! name when the host reports that the method has been registered. There is
//! no reflection here: the host calls [`Annotator::on_method_defined`]
//! itself, synchronously, after registering each of its methods.

use std::sync::Arc;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use std::fmt;

use tracing::{debug, trace};

use crate::construct::{AnnotatedMethod, Annotation, Options, OtherHasher};
use crate::datatype::Value;
use crate::error::{AnnotableError, Result};

// ------------- Tag -------------
pub type TagId = u64;

pub const GENESIS: TagId = 0;

/// A declared annotation tag. Tags are deduplicated by name and shared
/// through `Arc` by the keeper that owns them.
#[derive(Eq, PartialEq, Hash, Debug)]
pub struct Tag {
    tag: TagId,
    name: String,
}

impl Tag {
    pub fn new(tag: TagId, name: String) -> Self {
        Self { tag, name }
    }
    pub fn tag(&self) -> TagId {
        self.tag
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.tag, self.name)
    }
}

// ------------- TagKeeper -------------
#[derive(Debug)]
pub struct TagKeeper {
    kept: HashMap<String, Arc<Tag>, OtherHasher>,
    lower_bound: TagId,
}

impl TagKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
            lower_bound: GENESIS,
        }
    }
    /// Keeps a tag under the given name, assigning it an id if it was not
    /// kept before. Declaring the same name twice is harmless.
    pub fn keep(&mut self, name: &str) -> (Arc<Tag>, bool) {
        let mut previously_kept = true;
        match self.kept.entry(String::from(name)) {
            Entry::Vacant(e) => {
                self.lower_bound += 1;
                e.insert(Arc::new(Tag::new(self.lower_bound, String::from(name))));
                previously_kept = false;
            }
            Entry::Occupied(_e) => (),
        };
        (Arc::clone(&self.kept[name]), previously_kept)
    }
    pub fn get(&self, name: &str) -> Option<Arc<Tag>> {
        self.kept.get(name).map(Arc::clone)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl Default for TagKeeper {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- Annotator -------------
// This sets up the per-host context with the necessary structures
#[derive(Debug, Default)]
pub struct Annotator {
    // owns a keeper for the declared tags
    tag_keeper: TagKeeper,
    // annotations staged since the last method registration
    staged_annotations: Vec<Arc<Annotation>>,
    // the accumulated record, in registration order
    annotated_methods: Vec<AnnotatedMethod>,
}

impl Annotator {
    pub fn new() -> Self {
        Self {
            tag_keeper: TagKeeper::new(),
            staged_annotations: Vec::new(),
            annotated_methods: Vec::new(),
        }
    }
    pub fn tag_keeper(&self) -> &TagKeeper {
        &self.tag_keeper
    }
    /// Declares the given names as invocable tags. At least one name is
    /// required; already-declared names are kept as-is.
    pub fn declare(&mut self, names: &[&str]) -> Result<()> {
        if names.is_empty() {
            return Err(AnnotableError::EmptyDeclaration);
        }
        for name in names {
            let (tag, previously_kept) = self.tag_keeper.keep(name);
            if !previously_kept {
                trace!(tag = %tag, "declared tag");
            }
        }
        Ok(())
    }
    /// Lookup-and-call for a declared tag: stages one annotation carrying
    /// the given params and options. The tag must have been declared.
    pub fn invoke(&mut self, tag: &str, params: Vec<Value>, options: Options) -> Result<()> {
        let tag = self
            .tag_keeper
            .get(tag)
            .ok_or_else(|| AnnotableError::UnknownTag(String::from(tag)))?;
        self.staged_annotations
            .push(Arc::new(Annotation::new(tag.name(), params, options)));
        Ok(())
    }
    /// Builder form of [`invoke`](Self::invoke):
    /// `annotator.tag("traced")?.param(42).option("level", "debug").stage()`.
    pub fn tag(&mut self, name: &str) -> Result<TagCall<'_>> {
        if self.tag_keeper.get(name).is_none() {
            return Err(AnnotableError::UnknownTag(String::from(name)));
        }
        Ok(TagCall {
            annotator: self,
            name: String::from(name),
            params: Vec::new(),
            options: Options::default(),
        })
    }
    /// The registration hook. The host calls this after each method it
    /// registers, passing the method's name.
    ///
    /// When nothing is staged the method is simply not annotated and the
    /// record is left untouched. Otherwise the full staged sequence is bound
    /// to the name and staging starts over. A repeated registration of the
    /// same name replaces its previous annotation set entirely.
    pub fn on_method_defined(&mut self, name: &str) {
        if self.staged_annotations.is_empty() {
            return;
        }
        self.annotated_methods.retain(|m| m.name() != name);
        let staged = std::mem::take(&mut self.staged_annotations);
        debug!(method = name, annotations = staged.len(), "bound annotations");
        // staged is known non-empty at this point
        self.annotated_methods
            .push(AnnotatedMethod::new(name, staged).unwrap());
    }
    /// The stored methods, in registration order. With no names given the
    /// full record is returned; otherwise only the methods carrying at
    /// least one annotation with one of the given names.
    pub fn annotated_methods(&self, names: &[&str]) -> Vec<&AnnotatedMethod> {
        if names.is_empty() {
            return self.annotated_methods.iter().collect();
        }
        self.annotated_methods
            .iter()
            .filter(|m| names.iter().any(|name| m.annotation_exists(name)))
            .collect()
    }
    pub fn annotated_method_exists(&self, name: &str) -> bool {
        self.annotated_methods.iter().any(|m| m.name() == name)
    }
    /// Removes every stored method with the given name. A miss is a no-op.
    pub fn remove_annotated_method(&mut self, name: &str) {
        self.annotated_methods.retain(|m| m.name() != name);
    }
    pub fn staged_annotations(&self) -> &[Arc<Annotation>] {
        &self.staged_annotations
    }
    pub fn reset_staged_annotations(&mut self) {
        self.staged_annotations.clear();
    }
}

// ------------- TagCall -------------
/// An in-flight tag invocation. Parameters and options are accumulated and
/// nothing is staged until [`stage`](Self::stage) is called; dropping the
/// call without staging leaves the context untouched.
#[derive(Debug)]
pub struct TagCall<'a> {
    annotator: &'a mut Annotator,
    name: String,
    params: Vec<Value>,
    options: Options,
}

impl TagCall<'_> {
    pub fn param(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
    pub fn stage(self) {
        self.annotator
            .staged_annotations
            .push(Arc::new(Annotation::new(self.name, self.params, self.options)));
    }
}

// ------------- Annotable -------------
/// The capability mixin. A host embeds an [`Annotator`] and exposes it
/// through the two accessors; everything else is provided.
///
/// `declare`, `invoke`/`tag` and the query operations are the public
/// surface. `on_method_defined`, `remove_annotated_method` and the staging
/// accessors are host-side plumbing that consumers of the host should not
/// need to call.
pub trait Annotable {
    fn annotator(&self) -> &Annotator;
    fn annotator_mut(&mut self) -> &mut Annotator;

    fn declare(&mut self, names: &[&str]) -> Result<()> {
        self.annotator_mut().declare(names)
    }
    fn invoke(&mut self, tag: &str, params: Vec<Value>, options: Options) -> Result<()> {
        self.annotator_mut().invoke(tag, params, options)
    }
    fn tag(&mut self, name: &str) -> Result<TagCall<'_>> {
        self.annotator_mut().tag(name)
    }
    fn on_method_defined(&mut self, name: &str) {
        self.annotator_mut().on_method_defined(name)
    }
    fn annotated_methods(&self, names: &[&str]) -> Vec<&AnnotatedMethod> {
        self.annotator().annotated_methods(names)
    }
    fn annotated_method_exists(&self, name: &str) -> bool {
        self.annotator().annotated_method_exists(name)
    }
    fn remove_annotated_method(&mut self, name: &str) {
        self.annotator_mut().remove_annotated_method(name)
    }
    fn staged_annotations(&self) -> &[Arc<Annotation>] {
        self.annotator().staged_annotations()
    }
    fn reset_staged_annotations(&mut self) {
        self.annotator_mut().reset_staged_annotations()
    }
}
