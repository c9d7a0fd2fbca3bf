use assistant_core::validation::{
    validate_contact, validate_list_title, validate_todo_title, ContactFields, NameField,
};
use assistant_core::{ValidationError, ValidationLimits};

fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

#[test]
fn list_title_is_trimmed_and_checked_for_uniqueness() {
    let limits = ValidationLimits::default();

    assert_eq!(
        validate_list_title("  Groceries ", ["Work"], &limits).unwrap(),
        "Groceries"
    );

    let errors = validate_list_title(" Work ", ["Work"], &limits).unwrap_err();
    assert_eq!(messages(&errors), ["List title must be unique."]);

    assert!(validate_list_title("work", ["Work"], &limits).is_ok());
}

#[test]
fn blank_and_oversized_list_titles_are_rejected() {
    let limits = ValidationLimits::default();

    let errors = validate_list_title("   ", std::iter::empty(), &limits).unwrap_err();
    assert_eq!(messages(&errors), ["The list title is required."]);

    let long_title = "x".repeat(101);
    let errors = validate_list_title(&long_title, std::iter::empty(), &limits).unwrap_err();
    assert_eq!(
        messages(&errors),
        ["List title must be between 1 and 100 characters."]
    );

    let exact = "é".repeat(100);
    assert!(validate_list_title(&exact, std::iter::empty(), &limits).is_ok());
}

#[test]
fn todo_title_rules_use_configured_limit() {
    let limits = ValidationLimits {
        title_max_chars: 5,
        ..ValidationLimits::default()
    };

    assert_eq!(validate_todo_title(" Sweep ", &limits).unwrap(), "Sweep");
    assert_eq!(
        messages(&validate_todo_title("Vacuum", &limits).unwrap_err()),
        ["Todo title must be between 1 and 5 characters."]
    );
    assert_eq!(
        validate_todo_title("", &limits).unwrap_err(),
        vec![ValidationError::TodoTitleRequired]
    );
}

#[test]
fn valid_contact_fields_are_trimmed() {
    let fields =
        validate_contact(" Mike ", "Jones", " 281-330-8004 ", &ValidationLimits::default())
            .unwrap();
    assert_eq!(
        fields,
        ContactFields {
            first_name: "Mike".to_string(),
            last_name: "Jones".to_string(),
            phone_number: "281-330-8004".to_string(),
        }
    );
}

#[test]
fn contact_errors_are_reported_in_field_order() {
    let errors = validate_contact("", "J0nes", "2813308004", &ValidationLimits::default())
        .unwrap_err();

    assert_eq!(
        errors,
        vec![
            ValidationError::NameRequired(NameField::First),
            ValidationError::NameNotAlphabetic(NameField::Last),
            ValidationError::PhoneNumberInvalidFormat,
        ]
    );
    assert_eq!(
        messages(&errors),
        [
            "First name is required.",
            "Last name contains invalid characters. The name must be alphabetic.",
            "Invalid phone number format. Use ###-###-####.",
        ]
    );
}

#[test]
fn long_non_alphabetic_name_reports_both_rules() {
    let name = format!("{}1", "a".repeat(25));
    let errors =
        validate_contact(&name, "Keys", "768-867-5309", &ValidationLimits::default()).unwrap_err();

    assert_eq!(
        messages(&errors),
        [
            "First name is too long. Maximum length is 25 characters.",
            "First name contains invalid characters. The name must be alphabetic.",
        ]
    );
}

#[test]
fn missing_phone_number_skips_format_check() {
    let errors =
        validate_contact("Jenny", "Keys", "  ", &ValidationLimits::default()).unwrap_err();
    assert_eq!(messages(&errors), ["Phone number is required."]);
}

#[test]
fn phone_number_digits_must_be_ascii() {
    let limits = ValidationLimits::default();
    for phone in ["١٢٣-٤٥٦-٧٨٩٠", "１２３-４５６-７８９０"] {
        let errors = validate_contact("Mike", "Jones", phone, &limits).unwrap_err();
        assert_eq!(
            errors,
            [ValidationError::PhoneNumberInvalidFormat],
            "{phone}"
        );
    }
    assert!(validate_contact("Mike", "Jones", "281-330-8004", &limits).is_ok());
}
