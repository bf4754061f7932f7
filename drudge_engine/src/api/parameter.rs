use crate::model::Modifier;
use crate::types::TypeRef;

/// A positional parameter declaration.
///
/// Parameters are `string` typed unless otherwise specified with [`Param::typed`].
///
/// ### Example
/// ```
/// # use drudge_engine as drudge;
/// use drudge::{Modifier, Param};
///
/// let count = Param::optional("count").typed("integer");
/// assert_eq!(count.name(), "count");
/// assert_eq!(count.modifier(), Modifier::Optional);
/// ```
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    type_ref: TypeRef,
    modifier: Modifier,
}

impl Param {
    fn new(name: impl Into<String>, modifier: Modifier) -> Self {
        Self {
            name: name.into(),
            type_ref: TypeRef::default(),
            modifier,
        }
    }

    /// A parameter which must be given exactly once.
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, Modifier::Required)
    }

    /// A parameter which may be left out.
    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(name, Modifier::Optional)
    }

    /// A parameter which takes all the remaining values (`0` or more).
    pub fn variadic(name: impl Into<String>) -> Self {
        Self::new(name, Modifier::Variadic)
    }

    /// Set the type: a registered type name, a [`crate::Matcher`], or a [`crate::TypeParser`].
    pub fn typed(mut self, type_ref: impl Into<TypeRef>) -> Self {
        self.type_ref = type_ref.into();
        self
    }

    /// The parameter name, used as the key in [`crate::Arguments`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// How the parameter binds.
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }
}

/// A keyword parameter declaration: `--name value` or `--name=value`, anywhere before the positional arguments.
#[derive(Debug, Clone)]
pub struct KeywordParam {
    name: String,
    type_ref: TypeRef,
}

impl KeywordParam {
    /// A `string` keyword parameter, given on the command line as `--name`.
    /// Underscores in `name` are given as dashes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: TypeRef::default(),
        }
    }

    /// Set the type: a registered type name, a [`crate::Matcher`], or a [`crate::TypeParser`].
    pub fn typed(mut self, type_ref: impl Into<TypeRef>) -> Self {
        self.type_ref = type_ref.into();
        self
    }

    /// The parameter name, used as the key in [`crate::Arguments`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use rstest::rstest;

    #[rstest]
    #[case(Param::required("a"), Modifier::Required)]
    #[case(Param::optional("a"), Modifier::Optional)]
    #[case(Param::variadic("a"), Modifier::Variadic)]
    fn param_modifier(#[case] param: Param, #[case] expected: Modifier) {
        assert_eq!(param.name(), "a");
        assert_eq!(param.modifier(), expected);
        assert_matches!(param.type_ref(), TypeRef::Named(name) => assert_eq!(name, "string"));
    }

    #[test]
    fn param_typed() {
        assert_matches!(
            Param::required("a").typed("integer").type_ref(),
            TypeRef::Named(name) => assert_eq!(name, "integer")
        );
        assert_matches!(
            Param::required("a").typed(Matcher::exact("x")).type_ref(),
            TypeRef::Matcher(_)
        );
    }

    #[test]
    fn keyword_param() {
        let keyword = KeywordParam::new("dry_run").typed("bool");
        assert_eq!(keyword.name(), "dry_run");
        assert_matches!(keyword.type_ref(), TypeRef::Named(name) => assert_eq!(name, "bool"));
        assert_matches!(KeywordParam::new("x").type_ref(), TypeRef::Named(name) => assert_eq!(name, "string"));
    }
}
