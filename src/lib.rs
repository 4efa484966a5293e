mod parser;
mod path;
mod pattern;
mod registry;
mod tag;

#[cfg(test)]
mod testing;

pub use crate::{
    parser::{Parser, SeparatorParser, UnsupportedOperation},
    path::{EmptyNameError, NameError, Parents, Path, PathRef, RelativeToError},
    pattern::{Glob, Pattern, PatternError},
    registry::Registry,
    tag::Tag,
};

pub const SEPARATOR: char = '/';

/// Root label of a registry created with `Registry::default`.
pub const DEFAULT_ROOT: &str = "DEFAULT_ROOT";
