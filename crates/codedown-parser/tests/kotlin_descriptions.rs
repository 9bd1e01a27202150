use codedown_core::description::MethodDescription;
use codedown_parser::extract::DescriptionExtractor;
use codedown_parser::languages::Language;
use codedown_parser::locate::{declaration_at, method_at, offset_of};
use codedown_parser::syntax::{LambdaNode, SyntaxNode};
use codedown_parser::treesitter::{SourceFile, UNRESOLVED_TYPE};

const GREETER: &str = r"package com.acme

class Greeter {
    fun greet(name: String, times: Int): String {
        return name.repeat(times)
    }

    private fun log(message: String) {
        listOf(message).forEach { line -> println(line) }
    }

    fun twice(x: Int) = x * 2
}
";

fn parse(source: &str) -> SourceFile {
    SourceFile::parse("Greeter.kt", source, Language::Kotlin).unwrap()
}

fn describe(file: &SourceFile, needle: &str) -> MethodDescription {
    let offset = offset_of(file, needle).expect("needle present");
    let node = declaration_at(file, offset).expect("declaration at offset");
    DescriptionExtractor::default()
        .describe(&node, offset)
        .unwrap()
        .expect("describable node")
}

#[test]
fn kotlin_function_parameters_and_return_type() {
    let file = parse(GREETER);
    let d = describe(&file, "greet");
    assert_eq!(d.name(), Some("greet"));
    assert_eq!(d.arg_names(), ["name", "times"]);
    assert_eq!(d.arg_types(), ["String", "Int"]);
    assert_eq!(d.return_type(), Some("String"));
}

#[test]
fn kotlin_implicit_public_and_final() {
    let file = parse(GREETER);
    let greet = describe(&file, "greet");
    assert_eq!(greet.attributes(), ["public", "final"]);
    let log = describe(&file, "log");
    assert_eq!(log.attributes(), ["private", "final"]);
    let class = greet.class().unwrap();
    assert_eq!(class.attributes, ["public", "final"]);
}

#[test]
fn kotlin_open_declarations_are_not_final() {
    let source = r"open class Base {
    open fun hook() {}
    fun plain() {}
}

abstract class Shape {
    abstract fun area(): Double
}
";
    let file = SourceFile::parse("Base.kt", source, Language::Kotlin).unwrap();
    let hook = describe(&file, "hook");
    assert_eq!(hook.attributes(), ["public"]);
    assert_eq!(hook.class().unwrap().attributes, ["public"]);
    let plain = describe(&file, "plain");
    assert_eq!(plain.attributes(), ["public", "final"]);
    let area = describe(&file, "area");
    assert_eq!(area.attributes(), ["public", "abstract"]);
}

#[test]
fn kotlin_class_qualified_name_uses_package() {
    let file = parse(GREETER);
    let d = describe(&file, "greet");
    let class = d.class().unwrap();
    assert_eq!(class.qualified_name.as_deref(), Some("com.acme.Greeter"));
    assert_eq!(d.full_name(), "Greeter.greet");
}

#[test]
fn kotlin_block_body_without_type_returns_unit() {
    let file = parse(GREETER);
    let d = describe(&file, "log");
    assert_eq!(d.return_type(), Some("Unit"));
}

#[test]
fn kotlin_expression_body_without_type_has_no_return_type() {
    let file = parse(GREETER);
    let d = describe(&file, "twice");
    assert_eq!(d.return_type(), None);
    assert_eq!(d.arg_types(), ["Int"]);
}

#[test]
fn kotlin_lambda_enclosed_by_function() {
    let file = parse(GREETER);
    let offset = offset_of(&file, "println(line)").unwrap();
    let node = declaration_at(&file, offset).unwrap();
    let lambda = LambdaNode::cast(node).unwrap();
    let d = DescriptionExtractor::default()
        .describe_lambda(&lambda, offset)
        .unwrap();
    assert_eq!(d.arg_names(), ["line"]);
    assert_eq!(d.arg_types(), [UNRESOLVED_TYPE]);
    assert_eq!(d.enclosing().unwrap().name(), Some("log"));
}

#[test]
fn kotlin_interface_method() {
    let source = r"interface Drawable {
    fun draw()
}
";
    let file = SourceFile::parse("Drawable.kt", source, Language::Kotlin).unwrap();
    let d = describe(&file, "draw()");
    assert_eq!(d.attributes(), ["public", "abstract", "interface"]);
    let offset = offset_of(&file, "draw()").unwrap();
    let method = method_at(&file, offset).unwrap();
    assert!(!method.is_interface());
}

#[test]
fn kotlin_top_level_function_has_no_class() {
    let source = "fun main(args: Array<String>) { }\n";
    let file = SourceFile::parse("Main.kt", source, Language::Kotlin).unwrap();
    let d = describe(&file, "main");
    assert!(d.class().is_none());
    assert_eq!(d.arg_names(), ["args"]);
    assert_eq!(d.arg_types(), ["Array<String>"]);
    assert_eq!(d.full_name(), "main");
}

#[test]
fn kotlin_secondary_constructor() {
    let source = r"class Box {
    constructor(size: Int) {
    }
}
";
    let file = SourceFile::parse("Box.kt", source, Language::Kotlin).unwrap();
    let d = describe(&file, "size");
    assert!(d.is_constructor());
    assert_eq!(d.arg_names(), ["size"]);
    assert_eq!(d.full_name(), "Box.Box");
}

#[test]
fn kotlin_interface_default_method_is_not_abstract() {
    let source = r"interface Named {
    fun name(): String = toString()
}
";
    let file = SourceFile::parse("Named.kt", source, Language::Kotlin).unwrap();
    let d = describe(&file, "name()");
    assert_eq!(d.attributes(), ["public", "interface"]);
}

#[test]
fn kotlin_lambda_implicit_it_parameter() {
    let source = r"fun bump(values: List<Int>) {
    values.map { it + 1 }
    values.forEach { println() }
}
";
    let file = SourceFile::parse("Bump.kt", source, Language::Kotlin).unwrap();
    let implicit = describe(&file, "it + 1");
    assert!(implicit.is_lambda());
    assert_eq!(implicit.arg_names(), ["it"]);
    assert_eq!(implicit.arg_types(), [UNRESOLVED_TYPE]);

    let none = describe(&file, "println()");
    assert!(none.is_lambda());
    assert!(none.arg_names().is_empty());
    assert!(none.arg_types().is_empty());
}

#[test]
fn kotlin_explicit_lambda_parameter_hides_outer_it() {
    let source = r"fun outer(values: List<Int>) {
    values.forEach { x -> println(x) }
}
";
    let file = SourceFile::parse("Outer.kt", source, Language::Kotlin).unwrap();
    let d = describe(&file, "println(x)");
    assert_eq!(d.arg_names(), ["x"]);
}

#[test]
fn kotlin_primary_constructor() {
    let source = r"package geo

class Point(val x: Int, val y: Int)
";
    let file = SourceFile::parse("Point.kt", source, Language::Kotlin).unwrap();
    let d = describe(&file, "val x");
    assert!(d.is_constructor());
    assert_eq!(d.arg_names(), ["x", "y"]);
    assert_eq!(d.arg_types(), ["Int", "Int"]);
    assert_eq!(d.attributes(), ["public"]);
    assert_eq!(d.class().unwrap().qualified_name.as_deref(), Some("geo.Point"));
    assert_eq!(d.full_name(), "Point.Point");
}

#[test]
fn kotlin_companion_object_qualified_name() {
    let source = r"package geo

class Registry {
    companion object {
        fun create(): Registry = Registry()
    }
}
";
    let file = SourceFile::parse("Registry.kt", source, Language::Kotlin).unwrap();
    let d = describe(&file, "create");
    assert_eq!(
        d.class().unwrap().qualified_name.as_deref(),
        Some("geo.Registry.Companion")
    );
    assert_eq!(d.full_name(), "Companion.create");
}

#[test]
fn kotlin_anonymous_function_enclosed_by_function() {
    let source = r"fun run() {
    val square = fun(n: Int): Int { return n * n }
}
";
    let file = SourceFile::parse("Run.kt", source, Language::Kotlin).unwrap();
    let d = describe(&file, "n * n");
    assert!(d.is_lambda());
    assert_eq!(d.enclosing().unwrap().full_name(), "run");
    assert_eq!(d.arg_names().len(), d.arg_types().len());
}
