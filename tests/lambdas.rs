extern crate mustache;
use mustache::{Error, MapsAndLists, Template, TemplateMap};

use std::{cell::{Cell, RefCell}, rc::Rc};
use pretty_assertions::assert_eq;


fn render(text: &str, data: &MapsAndLists) -> Result<String, Error> {
    Template::from(text)?.render(data)
}

#[test]
fn interpolation() {
    let data = MapsAndLists::mapping([
        ("lambda", MapsAndLists::lambda0(|| "world".to_owned()))
    ]);
    assert_eq!(render("Hello, {{lambda}}!", &data).unwrap(), "Hello, world!");
}

#[test]
fn interpolation_result_is_not_expanded() {
    let data = MapsAndLists::mapping([
        ("planet", MapsAndLists::text("world")),
        ("lambda", MapsAndLists::lambda0(|| "{{planet}}".to_owned()))
    ]);
    assert_eq!(render("Hello, {{lambda}}!", &data).unwrap(), "Hello, {{planet}}!");
}

#[test]
fn interpolation_multiple_calls() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let data = MapsAndLists::mapping([
        ("lambda", MapsAndLists::lambda0(move || {
            counter.set(counter.get() + 1);
            counter.get().to_string()
        }))
    ]);
    assert_eq!(
        render("{{lambda}} == {{{lambda}}} == {{lambda}}", &data).unwrap(),
        "1 == 2 == 3"
    );
    assert_eq!(calls.get(), 3);
}

#[test]
fn interpolation_result_is_escaped() {
    let data = MapsAndLists::mapping([
        ("lambda", MapsAndLists::lambda0(|| ">".to_owned()))
    ]);
    assert_eq!(render("<{{lambda}}{{{lambda}}}", &data).unwrap(), "<&gt;>");
}

#[test]
fn section_receives_raw_text() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&seen);
    let data = MapsAndLists::mapping([
        ("x", MapsAndLists::text("X")),
        ("lambda", MapsAndLists::lambda1(move |text| {
            record.borrow_mut().push(text.to_owned());
            String::new()
        }))
    ]);
    let result = render("<{{#lambda}}{{x}} {{! c }}\n{{/lambda}}>", &data).unwrap();
    assert_eq!(result, "<>");
    assert_eq!(*seen.borrow(), vec!["{{x}} {{! c }}\n".to_owned()]);
}

#[test]
fn section_result_is_rendered_in_context() {
    let data = MapsAndLists::mapping([
        ("x", MapsAndLists::number(5.0)),
        ("lambda", MapsAndLists::lambda1(|text| text.to_owned()))
    ]);
    assert_eq!(render("{{#lambda}}{{x}}{{/lambda}}", &data).unwrap(), "5");
}

#[test]
fn section_expansion() {
    let data = MapsAndLists::mapping([
        ("planet", MapsAndLists::text("Earth")),
        ("lambda", MapsAndLists::lambda1(|text| format!("{}{{{{planet}}}}{}", text, text)))
    ]);
    assert_eq!(render("<{{#lambda}}-{{/lambda}}>", &data).unwrap(), "<-Earth->");
}

#[test]
fn section_uses_current_delimiters() {
    let data = MapsAndLists::mapping([
        ("planet", MapsAndLists::text("Earth")),
        ("lambda", MapsAndLists::lambda1(
            |text| format!("{}{{{{planet}}}} => |planet|{}", text, text)
        ))
    ]);
    assert_eq!(
        render("{{= | | =}}<|#lambda|-|/lambda|>", &data).unwrap(),
        "<-{{planet}} => Earth->"
    );
}

#[test]
fn section_multiple_calls() {
    let data = MapsAndLists::mapping([
        ("lambda", MapsAndLists::lambda1(|text| format!("__{}__", text)))
    ]);
    assert_eq!(
        render("{{#lambda}}FILE{{/lambda}} != {{#lambda}}LINE{{/lambda}}", &data).unwrap(),
        "__FILE__ != __LINE__"
    );
}

#[test]
fn section_in_list_context() {
    let data = MapsAndLists::mapping([
        ("items", MapsAndLists::sequence(vec![
            MapsAndLists::mapping([("name", MapsAndLists::text("a"))]),
            MapsAndLists::mapping([("name", MapsAndLists::text("b"))])
        ])),
        ("wrap", MapsAndLists::lambda1(|text| format!("[{}]", text)))
    ]);
    assert_eq!(
        render("{{#items}}{{#wrap}}{{name}}{{/wrap}}{{/items}}", &data).unwrap(),
        "[a][b]"
    );
}

#[test]
fn inverted_lambda_renders_nothing() {
    let data = MapsAndLists::mapping([
        ("static", MapsAndLists::text("static")),
        ("lambda", MapsAndLists::lambda1(|_| "false".to_owned()))
    ]);
    assert_eq!(render("<{{^lambda}}{{static}}{{/lambda}}>", &data).unwrap(), "<>");
}

#[test]
fn calls_follow_document_order() {
    let calls = Rc::new(RefCell::new(String::new()));
    let first = Rc::clone(&calls);
    let second = Rc::clone(&calls);
    let data = MapsAndLists::mapping([
        ("list", MapsAndLists::sequence(vec![MapsAndLists::null(), MapsAndLists::null()])),
        ("a", MapsAndLists::lambda0(move || { first.borrow_mut().push('a'); String::new() })),
        ("b", MapsAndLists::lambda1(move |_| { second.borrow_mut().push('b'); String::new() }))
    ]);
    render("{{a}}{{#list}}{{#b}}{{/b}}{{a}}{{/list}}{{#b}}x{{/b}}", &data).unwrap();
    assert_eq!(*calls.borrow(), "ababab");
}

#[test]
fn lambda_in_partial() {
    let partials = TemplateMap::from_sources([("p", "{{#wrap}}{{v}}{{/wrap}}")]).unwrap();
    let data = MapsAndLists::mapping([
        ("v", MapsAndLists::text("in")),
        ("wrap", MapsAndLists::lambda1(|text| format!("({})", text)))
    ]);
    let template = Template::from("{{>p}}").unwrap();
    assert_eq!(template.render_with_partials(&data, &partials).unwrap(), "(in)");
}

#[test]
fn failing_lambda_aborts_rendering() {
    let data = MapsAndLists::mapping([
        ("lambda", MapsAndLists::try_lambda0(|| Err("lambda failed".into())))
    ]);
    let error = render("before {{lambda}} after", &data).unwrap_err();
    assert!(matches!(error, Error::Adapter(_)));
    assert_eq!(error.to_string(), "lambda failed");
}

#[test]
fn malformed_lambda_output_is_reported() {
    let data = MapsAndLists::mapping([
        ("lambda", MapsAndLists::lambda1(|_| "{{#open}}".to_owned()))
    ]);
    let error = render("{{#lambda}}x{{/lambda}}", &data).unwrap_err();
    assert!(matches!(error, Error::UnclosedSection { ref name, .. } if name == "open"));
}
