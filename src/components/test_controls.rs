use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rstest::rstest;
use rust_decimal::Decimal;

use super::*;
use crate::contracts::{Control, ControlValue, FieldLike, FormControl, InputError};
use crate::style::{FieldLayout, HorizRatio};

fn date_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid test date")
}

#[test]
fn text_input_treats_empty_string_as_empty() {
    let mut input = TextInput::new();
    assert!(input.is_empty());
    assert_eq!(input.value(), Ok(None));

    input.set_value(Some("hello".to_string()));
    assert_eq!(input.text(), "hello");
    assert_eq!(input.current(), Some(ControlValue::Text("hello".to_string())));

    input.clear();
    assert!(input.is_empty());
}

#[test]
fn edits_bump_revision() {
    let mut input = Textarea::new();
    let before = input.revision();
    input.set_text("a");
    input.set_text("b");
    assert_eq!(input.revision(), before + 2);

    let mut check = Checkbox::new();
    let before = check.revision();
    check.set_checked(true);
    assert!(check.revision() > before);
}

#[test]
fn text_input_render_carries_state() {
    let mut input = TextInput::new()
        .with_id("email")
        .input_type(InputType::Email)
        .placeholder("you@example.com")
        .label("Email")
        .name("email")
        .required(true);
    input.set_validation_error(Some("Value is required".to_string()));

    let rendered = input.render();
    let field = rendered.find_by_id("email").expect("input renders");
    assert_eq!(field.attribute("type"), Some("email"));
    assert_eq!(field.attribute("name"), Some("email"));
    assert_eq!(field.attribute("aria-invalid"), Some("true"));
    assert!(field.has_attribute("required"));
    assert!(field.has_class("is-invalid"));
    assert!(rendered.has_class("required"));

    let label = rendered.find_by_tag("label");
    assert_eq!(label[0].attribute("for"), Some("email"));
    assert_eq!(label[0].text_content(), "Email");

    let feedback = rendered
        .element_children()
        .find(|child| child.has_class("invalid-feedback"))
        .expect("feedback renders");
    assert_eq!(feedback.text_content(), "Value is required");

    input.set_validation_error(None);
    let rendered = input.render();
    assert!(!rendered.find_by_id("email").expect("input renders").has_class("is-invalid"));
    assert_eq!(rendered.find_by_tag("div").len(), 1);
}

#[rstest]
#[case("42", Decimal::from(42))]
#[case(" 3.25 ", Decimal::new(325, 2))]
#[case("-7", Decimal::from(-7))]
#[case("1e3", Decimal::from(1000))]
fn number_input_parses_text(#[case] text: &str, #[case] expected: Decimal) {
    let mut input = NumberInput::new();
    input.set_text(text);
    assert_eq!(input.value(), Ok(Some(expected)));
    assert_eq!(input.current(), Some(ControlValue::Number(expected)));
}

#[test]
fn number_input_keeps_invalid_text() {
    let mut input = NumberInput::new();
    input.set_text("twelve");
    assert_eq!(input.value(), Err(InputError::NotANumber("twelve".to_string())));
    assert!(!input.is_empty());
    assert_eq!(input.current(), Some(ControlValue::Text("twelve".to_string())));

    input.set_value(Some(Decimal::new(1500, 2)));
    assert_eq!(input.text(), "15");
}

#[rstest]
#[case("2024-05-06 07:08:00", date_time(2024, 5, 6, 7, 8))]
#[case("2024-05-06T07:08", date_time(2024, 5, 6, 7, 8))]
#[case("2024-05-06T07:08:09.250", date_time(2024, 5, 6, 7, 8).with_nanosecond(250_000_000).expect("valid nanos"))]
#[case("2024-05-06", date_time(2024, 5, 6, 0, 0))]
#[case("05/06/2024", date_time(2024, 5, 6, 0, 0))]
#[case("06.05.2024", date_time(2024, 5, 6, 0, 0))]
fn date_input_tries_each_format(#[case] text: &str, #[case] expected: NaiveDateTime) {
    let mut input = DateInput::new();
    input.set_text(text);
    assert_eq!(input.value(), Ok(Some(expected)));
}

#[test]
fn date_input_keeps_fractional_seconds() {
    let precise = NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|date| date.and_hms_micro_opt(3, 4, 5, 678_901))
        .expect("valid test time");
    let mut input = DateInput::new();
    input.set_value(Some(precise));
    assert_eq!(input.text(), "2024-01-02 03:04:05.678901");
    assert_eq!(input.value(), Ok(Some(precise)));

    input.set_value(Some(date_time(2024, 1, 2, 3, 4)));
    assert_eq!(input.text(), "2024-01-02 03:04:00");
}

#[test]
fn date_input_formats_with_display_format() {
    let mut input = DateInput::new()
        .display_format("%d/%m/%Y")
        .input_formats(["%Y-%m-%d"]);
    input.set_value(Some(date_time(2021, 1, 2, 0, 0)));
    assert_eq!(input.text(), "02/01/2021");
    assert_eq!(input.value(), Ok(Some(date_time(2021, 1, 2, 0, 0))));

    input.set_text("Jan 2nd");
    assert_eq!(input.value(), Err(InputError::InvalidDate("Jan 2nd".to_string())));

    input.set_value(None);
    assert!(input.is_empty());
    assert_eq!(input.value(), Ok(None));
}

#[test]
fn select_ignores_unknown_values() {
    let mut select = Select::new().options([
        SelectOption::new("nl").label("Netherlands"),
        SelectOption::new("pt").label("Portugal"),
    ]);
    select.set_value(Some("pt".to_string()));
    assert_eq!(select.selected(), Some("pt"));

    select.set_value(Some("xx".to_string()));
    assert_eq!(select.selected(), None);
    assert!(select.is_empty());

    select.select(Some("nl"));
    let rendered = select.render();
    let options = rendered.find_by_tag("option");
    assert_eq!(options.len(), 3);
    assert!(options[1].has_attribute("selected"));
    assert_eq!(options[1].text_content(), "Netherlands");
}

#[test]
fn unchecked_checkbox_counts_as_empty() {
    let mut check = Checkbox::new().switch(true);
    assert!(check.is_empty());
    assert_eq!(check.value(), Ok(Some(false)));

    check.set_value(Some(true));
    assert!(!check.is_empty());
    assert_eq!(check.current(), Some(ControlValue::Bool(true)));

    let input = check.render().find_by_tag("input")[0].clone();
    assert_eq!(input.attribute("role"), Some("switch"));
    assert!(input.has_attribute("checked"));
}

#[test]
fn tri_state_checkbox_reads_indeterminate_as_no_value() {
    let mut check = TriStateCheckbox::new().label("Recommend us");
    assert!(check.is_empty());
    assert_eq!(check.value(), Ok(None));
    let input = check.render().find_by_tag("input")[0].clone();
    assert_eq!(input.attribute("aria-checked"), Some("mixed"));
    assert!(input.has_attribute("data-indeterminate"));

    check.toggle();
    assert_eq!(check.value(), Ok(Some(true)));
    check.toggle();
    assert_eq!(check.value(), Ok(Some(false)));
    assert!(!check.is_empty());
    assert_eq!(check.current(), Some(ControlValue::Bool(false)));
    let input = check.render().find_by_tag("input")[0].clone();
    assert_eq!(input.attribute("aria-checked"), Some("false"));
    assert!(!input.has_attribute("checked"));

    check.toggle();
    assert_eq!(check.checked(), None);

    check.set_value(Some(true));
    check.clear();
    assert_eq!(check.value(), Ok(None));
}

#[test]
fn horizontal_checkbox_is_offset_by_label_columns() {
    let check = Checkbox::new()
        .label("Remember me")
        .layout(FieldLayout::Horizontal(HorizRatio::Ratio3));
    let rendered = check.render();
    let column = rendered.element_children().next().expect("column renders");
    assert!(column.has_class("col-sm-9"));
    assert!(column.has_class("offset-sm-3"));
}

#[test]
fn single_file_input_keeps_first_file() {
    let files = vec![FileEntry::new("a.txt", 1), FileEntry::new("b.txt", 2)];

    let mut single = FileInput::new();
    single.set_files(files.clone());
    assert_eq!(single.files(), &files[..1]);

    let mut multiple = FileInput::new().multiple(true).accept(".txt");
    multiple.set_value(Some(files.clone()));
    assert_eq!(multiple.value(), Ok(Some(files)));

    multiple.clear();
    assert_eq!(multiple.value(), Ok(None));
}

#[test]
fn fieldset_renders_legend_then_children() {
    let mut fieldset = Fieldset::new("Contact")
        .child(TextInput::new().with_id("phone").render())
        .child(TextInput::new().with_id("mail").render());
    assert!(fieldset.remove_child("phone"));
    assert!(!fieldset.remove_child("phone"));

    let rendered = fieldset.render();
    assert_eq!(rendered.tag(), "fieldset");
    let tags: Vec<&str> = rendered.element_children().map(|child| child.tag()).collect();
    assert_eq!(tags, ["legend", "div"]);
    assert!(rendered.find_by_id("mail").is_some());
}

#[test]
fn alert_is_hidden_until_shown() {
    let mut alert = Alert::new();
    assert!(alert.render().has_attribute("hidden"));

    alert.show("Something went wrong");
    let rendered = alert.render();
    assert!(!rendered.has_attribute("hidden"));
    assert!(rendered.has_class("alert-danger"));
    assert_eq!(rendered.text_content(), "Something went wrong");

    alert.hide();
    assert_eq!(alert.message(), None);
    assert!(!Alert::new().kind(AlertKind::Info).render().has_class("alert-danger"));
}
