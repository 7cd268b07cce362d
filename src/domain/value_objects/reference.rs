//! Output references and templates
//!
//! References point from one declaration's attribute to another
//! declaration's result field. They are resolved by Terraform at apply time;
//! here they are only carried and rendered.

use std::fmt;

use super::Address;

/// One step of a field path: attribute name or list index
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    Attr(String),
    Index(usize),
}

/// Nested field lookup, e.g. `status[0].url`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn attr(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Attr(name.into())])
    }

    pub fn then_attr(mut self, name: impl Into<String>) -> Self {
        self.0.push(PathSegment::Attr(name.into()));
        self
    }

    pub fn then_index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Attr(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Attr(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Pointer to a field of another declaration's future result
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputRef {
    target: Address,
    path: FieldPath,
}

impl OutputRef {
    pub fn new(target: Address, path: FieldPath) -> Self {
        Self { target, path }
    }

    pub fn target(&self) -> &Address {
        &self.target
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Terraform expression without the `${}` wrapper
    pub fn expression(&self) -> String {
        if self.path.is_empty() {
            self.target.to_string()
        } else {
            format!("{}.{}", self.target, self.path)
        }
    }

    /// Full interpolation, `${...}`
    pub fn interpolation(&self) -> String {
        format!("${{{}}}", self.expression())
    }
}

impl fmt::Display for OutputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.interpolation())
    }
}

impl Address {
    /// Reference to a top-level attribute of this declaration's result
    pub fn field(&self, name: impl Into<String>) -> OutputRef {
        OutputRef::new(self.clone(), FieldPath::attr(name))
    }

    /// Reference to a nested field of this declaration's result
    pub fn lookup(&self, path: FieldPath) -> OutputRef {
        OutputRef::new(self.clone(), path)
    }
}

/// Segment of a string template
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Ref(OutputRef),
}

/// A string mixing literal text and output references
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template(Vec<Segment>);

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lit(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return self;
        }
        match self.0.last_mut() {
            Some(Segment::Literal(prev)) => prev.push_str(&text),
            _ => self.0.push(Segment::Literal(text)),
        }
        self
    }

    pub fn reference(mut self, reference: OutputRef) -> Self {
        self.0.push(Segment::Ref(reference));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn references(&self) -> impl Iterator<Item = &OutputRef> {
        self.0.iter().filter_map(|segment| match segment {
            Segment::Ref(r) => Some(r),
            Segment::Literal(_) => None,
        })
    }

    /// Render for Terraform: literal text escaped, references interpolated
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            match segment {
                Segment::Literal(text) => out.push_str(&escape_literal(text)),
                Segment::Ref(r) => out.push_str(&r.interpolation()),
            }
        }
        out
    }
}

/// Escape template introducers so literal text is never interpolated.
///
/// `${` becomes `$${` and `%{` becomes `%%{`.
pub fn escape_literal(text: &str) -> String {
    text.replace("${", "$${").replace("%{", "%%{")
}

/// Inverse of [`escape_literal`]
pub fn unescape_literal(text: &str) -> String {
    text.replace("$${", "${").replace("%%{", "%{")
}
