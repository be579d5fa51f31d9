use rust_decimal::Decimal;

#[derive(Clone, Debug, Default, PartialEq, crate::form::FormModel)]
struct ApiSmokeForm {
    title: String,
    enabled: bool,
    amount: Decimal,
}

#[test]
fn prelude_builds_a_working_panel() {
    use crate::prelude::*;

    let panel = FormPanel::<ApiSmokeForm>::new(FormPanelOptions::default());
    let fields = ApiSmokeForm::fields();
    panel
        .add(
            fields.title(),
            TextInput::new().label("Title"),
            FieldOptions::new().required(true),
        )
        .expect("title binds");
    panel
        .add(fields.enabled(), Checkbox::new().label("Enabled"), FieldOptions::new())
        .expect("enabled binds");
    panel
        .add(fields.amount(), NumberInput::new().label("Amount"), FieldOptions::new())
        .expect("amount binds");

    let model = ApiSmokeForm {
        title: "Quarterly".to_string(),
        enabled: true,
        amount: Decimal::new(1200, 2),
    };
    panel.set_data(&model).expect("model loads");
    assert!(panel.validate(true).expect("validation runs"));
    assert_eq!(panel.get_data().expect("model reads back"), model);
    assert_eq!(panel.status().expect("status"), FormStatus::Validated { valid: true });

    let html = panel.render().expect("render").to_html();
    assert!(html.starts_with("<form"));
    assert!(html.contains("Quarterly"));
}

#[test]
fn root_reexports_cover_control_contracts() {
    fn assert_control<C: crate::Control>() {}
    fn assert_form_control<C: crate::FormControl>() {}

    assert_control::<crate::components::Textarea>();
    assert_form_control::<crate::components::Select>();
    assert_form_control::<crate::components::DateInput>();
    assert_form_control::<crate::components::FileInput>();

    let _ = crate::FieldLayout::for_form(Some(crate::FormType::Horizontal), crate::HorizRatio::Ratio3);
    let _ = crate::ClassList::new().with("form-label");
    let _ = crate::Element::new("div");
}
