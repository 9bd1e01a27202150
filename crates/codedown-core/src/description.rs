//! Description records produced by the extractor.
//!
//! Every record is an immutable value: built once from extraction results and
//! handed to the caller by value. Optional facts (return type, declaring class,
//! qualified name) stay `None` when the front end could not supply them.

use serde::{Deserialize, Serialize};

/// The declaring class or interface of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescription {
    /// Fully qualified name. `None` for anonymous and local classes.
    pub qualified_name: Option<String>,
    /// Recognized modifiers in allowlist order, followed by synthetic labels.
    pub attributes: Vec<String>,
}

impl ClassDescription {
    pub fn new(qualified_name: Option<String>, attributes: Vec<String>) -> Self {
        Self {
            qualified_name,
            attributes,
        }
    }

    /// Simple name: the last `.`-separated segment of the qualified name.
    pub fn class_name(&self) -> Option<&str> {
        self.qualified_name
            .as_deref()
            .map(|q| q.rsplit('.').next().unwrap_or(q))
    }
}

/// Parameter names and canonical types of one declaration, in declaration order.
///
/// Only lives for the duration of a single extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamPair {
    names: Vec<String>,
    types: Vec<String>,
}

impl ParamPair {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            types: Vec::with_capacity(capacity),
        }
    }

    /// Append one parameter. Names and types always grow together.
    pub fn push(&mut self, name: impl Into<String>, type_text: impl Into<String>) {
        self.names.push(name.into());
        self.types.push(type_text.into());
    }

    /// Split into `(names, types)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.names, self.types)
    }
}

/// Description of a method-like declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodDescription {
    /// A named method or free function.
    Method {
        class: Option<ClassDescription>,
        attributes: Vec<String>,
        name: String,
        return_type: Option<String>,
        arg_names: Vec<String>,
        arg_types: Vec<String>,
        offset: usize,
        /// Raw source text of the declaration.
        text: String,
    },
    /// A constructor. Carries no name, return type or source text.
    Constructor {
        class: Option<ClassDescription>,
        attributes: Vec<String>,
        arg_names: Vec<String>,
        arg_types: Vec<String>,
        offset: usize,
    },
    /// A lambda or closure, described together with the method that encloses it.
    Lambda {
        enclosing: Box<MethodDescription>,
        return_type: Option<String>,
        arg_names: Vec<String>,
        arg_types: Vec<String>,
        offset: usize,
    },
}

impl MethodDescription {
    pub fn method(
        class: Option<ClassDescription>,
        attributes: Vec<String>,
        name: impl Into<String>,
        return_type: Option<String>,
        params: ParamPair,
        offset: usize,
        text: impl Into<String>,
    ) -> Self {
        let (arg_names, arg_types) = params.into_parts();
        Self::Method {
            class,
            attributes,
            name: name.into(),
            return_type,
            arg_names,
            arg_types,
            offset,
            text: text.into(),
        }
    }

    pub fn constructor(
        class: Option<ClassDescription>,
        attributes: Vec<String>,
        params: ParamPair,
        offset: usize,
    ) -> Self {
        let (arg_names, arg_types) = params.into_parts();
        Self::Constructor {
            class,
            attributes,
            arg_names,
            arg_types,
            offset,
        }
    }

    pub fn lambda(
        enclosing: MethodDescription,
        return_type: Option<String>,
        params: ParamPair,
        offset: usize,
    ) -> Self {
        let (arg_names, arg_types) = params.into_parts();
        Self::Lambda {
            enclosing: Box::new(enclosing),
            return_type,
            arg_names,
            arg_types,
            offset,
        }
    }

    /// Declaring class. Lambdas report the class of their enclosing method.
    pub fn class(&self) -> Option<&ClassDescription> {
        match self {
            Self::Method { class, .. } | Self::Constructor { class, .. } => class.as_ref(),
            Self::Lambda { enclosing, .. } => enclosing.class(),
        }
    }

    /// Own attributes. Lambdas declare none.
    pub fn attributes(&self) -> &[String] {
        match self {
            Self::Method { attributes, .. } | Self::Constructor { attributes, .. } => attributes,
            Self::Lambda { .. } => &[],
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Method { name, .. } => Some(name),
            Self::Constructor { .. } | Self::Lambda { .. } => None,
        }
    }

    pub fn return_type(&self) -> Option<&str> {
        match self {
            Self::Method { return_type, .. } | Self::Lambda { return_type, .. } => {
                return_type.as_deref()
            }
            Self::Constructor { .. } => None,
        }
    }

    pub fn arg_names(&self) -> &[String] {
        match self {
            Self::Method { arg_names, .. }
            | Self::Constructor { arg_names, .. }
            | Self::Lambda { arg_names, .. } => arg_names,
        }
    }

    pub fn arg_types(&self) -> &[String] {
        match self {
            Self::Method { arg_types, .. }
            | Self::Constructor { arg_types, .. }
            | Self::Lambda { arg_types, .. } => arg_types,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            Self::Method { offset, .. }
            | Self::Constructor { offset, .. }
            | Self::Lambda { offset, .. } => *offset,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Method { text, .. } => Some(text),
            Self::Constructor { .. } | Self::Lambda { .. } => None,
        }
    }

    pub fn enclosing(&self) -> Option<&MethodDescription> {
        match self {
            Self::Lambda { enclosing, .. } => Some(enclosing),
            Self::Method { .. } | Self::Constructor { .. } => None,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, Self::Constructor { .. })
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self, Self::Lambda { .. })
    }

    /// `Class.method` title used by generators.
    ///
    /// Constructors take the class simple name as method name; lambdas append
    /// `$lambda` to their enclosing method's title. A missing class leaves just
    /// the method part.
    pub fn full_name(&self) -> String {
        let class_name = self.class().and_then(ClassDescription::class_name);
        match self {
            Self::Method { name, .. } => match class_name {
                Some(class) => format!("{class}.{name}"),
                None => name.clone(),
            },
            Self::Constructor { .. } => match class_name {
                Some(class) => format!("{class}.{class}"),
                None => "<init>".to_string(),
            },
            Self::Lambda { enclosing, .. } => format!("{}$lambda", enclosing.full_name()),
        }
    }

    /// Parameter name/type pairing invariant.
    pub fn is_well_formed(&self) -> bool {
        let own = self.arg_names().len() == self.arg_types().len();
        match self.enclosing() {
            Some(enclosing) => own && enclosing.is_well_formed(),
            None => own,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParamPair {
        let mut p = ParamPair::with_capacity(pairs.len());
        for (name, ty) in pairs {
            p.push(*name, *ty);
        }
        p
    }

    fn service_class() -> ClassDescription {
        ClassDescription::new(
            Some("com.acme.OrderService".to_string()),
            vec!["public".to_string()],
        )
    }

    #[test]
    fn test_class_name_is_last_segment() {
        assert_eq!(service_class().class_name(), Some("OrderService"));
        let bare = ClassDescription::new(Some("Top".to_string()), vec![]);
        assert_eq!(bare.class_name(), Some("Top"));
        let anon = ClassDescription::new(None, vec![]);
        assert_eq!(anon.class_name(), None);
    }

    #[test]
    fn test_param_pair_grows_in_lockstep() {
        let (names, types) = params(&[("id", "long"), ("note", "String")]).into_parts();
        assert_eq!(names, ["id", "note"]);
        assert_eq!(types, ["long", "String"]);
    }

    #[test]
    fn test_method_accessors() {
        let m = MethodDescription::method(
            Some(service_class()),
            vec!["public".to_string()],
            "place",
            Some("void".to_string()),
            params(&[("id", "long")]),
            42,
            "public void place(long id) {}",
        );
        assert_eq!(m.name(), Some("place"));
        assert_eq!(m.return_type(), Some("void"));
        assert_eq!(m.offset(), 42);
        assert_eq!(m.full_name(), "OrderService.place");
        assert!(m.text().is_some());
        assert!(m.is_well_formed());
    }

    #[test]
    fn test_constructor_has_no_name_or_text() {
        let c = MethodDescription::constructor(Some(service_class()), vec![], params(&[]), 7);
        assert!(c.is_constructor());
        assert_eq!(c.name(), None);
        assert_eq!(c.return_type(), None);
        assert_eq!(c.text(), None);
        assert_eq!(c.full_name(), "OrderService.OrderService");
    }

    #[test]
    fn test_lambda_inherits_class_from_enclosing() {
        let enclosing = MethodDescription::constructor(Some(service_class()), vec![], params(&[]), 7);
        let l = MethodDescription::lambda(enclosing.clone(), None, params(&[("x", "int")]), 30);
        assert!(l.is_lambda());
        assert_eq!(l.enclosing(), Some(&enclosing));
        assert_eq!(
            l.class().and_then(|c| c.qualified_name.as_deref()),
            Some("com.acme.OrderService")
        );
        assert!(l.attributes().is_empty());
        assert_eq!(l.full_name(), "OrderService.OrderService$lambda");
    }

    #[test]
    fn test_full_name_without_class() {
        let m = MethodDescription::method(None, vec![], "main", None, params(&[]), 0, "fun main() {}");
        assert_eq!(m.full_name(), "main");
    }

    #[test]
    fn test_serde_tags_variant_kind() {
        let c = MethodDescription::constructor(None, vec![], params(&[("a", "int")]), 3);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["kind"], "constructor");
        assert_eq!(json["arg_names"][0], "a");
        assert!(json.get("name").is_none());
    }
}
