//! Annotable – attach named, parameterized annotations to methods as they
//! are registered, then query them.
//!
//! The crate centers on three cooperating pieces:
//! * An [`construct::Annotation`] is one tag instance: a name plus the
//!   positional params and keyword options it was invoked with.
//! * An [`construct::AnnotatedMethod`] binds a method name to the one or
//!   more annotations that were staged when the method was registered.
//! * An [`registry::Annotator`] is the per-host context: it owns the
//!   declared tags, the transient staging list, and the accumulated record
//!   of annotated methods. The [`registry::Annotable`] trait mixes the whole
//!   capability into a host type through two accessor methods.
//!
//! ## Modules
//! * [`construct`] – The immutable annotation records and their queries.
//! * [`datatype`] – The open [`datatype::Value`] type carried by params and
//!   options (primitives plus arbitrary JSON).
//! * [`registry`] – Tag declaration, staging, the registration hook and the
//!   query surface.
//! * [`error`] – [`error::AnnotableError`] and the crate `Result` alias.
//!
//! ## Control flow
//! Declare tag names once, invoke a tag to stage an annotation, register a
//! method, and the staged set is bound to that method's name. Rust has no
//! "method defined" reflection hook, so the host reports registrations
//! explicitly by calling `on_method_defined` (or wires it into whatever
//! builder it registers methods with). Staging and binding are synchronous
//! and single-threaded; there is nothing to await and nothing to lock.
//!
//! ## Quick Start
//! ```
//! use annotable::{Annotator, Value};
//!
//! let mut annotator = Annotator::new();
//! annotator.declare(&["traced", "deprecated"]).unwrap();
//!
//! // stage an annotation, then register the method it belongs to
//! annotator.tag("traced").unwrap().param(42).option("level", "debug").stage();
//! annotator.on_method_defined("fetch");
//!
//! assert!(annotator.annotated_method_exists("fetch"));
//! let methods = annotator.annotated_methods(&["traced"]);
//! assert_eq!(methods[0].name(), "fetch");
//! assert_eq!(methods[0].annotations()[0].params(), &[Value::Int(42)]);
//! ```
//!
//! ## Scope
//! This is a library consumed via direct in-process calls. There is no
//! persistence, no wire protocol and no concurrency control: all state
//! lives in the host's `Annotator` for the host's lifetime, and hosts that
//! register methods from several threads must synchronize the
//! staging/binding pair themselves.

pub mod construct;
pub mod datatype;
pub mod error;
pub mod registry;

pub use construct::{AnnotatedMethod, Annotation, Options};
pub use datatype::Value;
pub use error::{AnnotableError, Result};
pub use registry::{Annotable, Annotator, Tag, TagCall, TagKeeper};
