use formpanel::form::{FieldLens, FormModel};

#[derive(Clone, Default, formpanel::form::FormModel)]
struct SignupForm {
    email: String,
    #[form(rename = "years")]
    age: Option<u32>,
    #[form(skip)]
    #[allow(dead_code)]
    session: u64,
}

fn main() {
    let fields = SignupForm::fields();
    let mut model = SignupForm::default();

    fields.email().set(&mut model, "a@example.com".to_string());
    fields.age().set(&mut model, Some(30));

    assert_eq!(fields.email().key().as_str(), "email");
    assert_eq!(fields.age().key().as_str(), "years");
    assert_eq!(fields.email().get(&model), "a@example.com");
    assert_eq!(*fields.age().get(&model), Some(30));

    let keys: Vec<&str> = SignupForm::field_keys().iter().map(|key| key.as_str()).collect();
    assert_eq!(keys, ["email", "years"]);
}
